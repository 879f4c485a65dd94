//! Delimited-text exports of project and task listings.

use entities::{ProjectListing, TaskListing};

/// Renders a project listing as CSV, one row per project.
pub fn projects_to_csv(projects: &[ProjectListing]) -> String {
    let mut out = String::from("Project No.,ID,Name,Description,Start Date,End Date,Budget\n");
    for listing in projects {
        let p = &listing.project;
        let row = [
            listing.display_no.to_string(),
            p.id.to_string(),
            p.name.clone(),
            p.description.clone().unwrap_or_default(),
            p.start_date.to_string(),
            p.end_date.to_string(),
            format!("{:.2}", p.budget),
        ];
        push_row(&mut out, &row);
    }
    out
}

/// Renders a task listing as CSV, one row per task.
///
/// Takes whatever slice the caller provides, so filtered or searched
/// listings export exactly what was on screen.
pub fn tasks_to_csv(tasks: &[TaskListing]) -> String {
    let mut out = String::from(
        "Task No.,ID,Name,Status,Priority,Progress (%),Assigned To,Due Date,Is Overdue\n",
    );
    for listing in tasks {
        let t = &listing.task;
        let row = [
            listing.display_no.to_string(),
            t.id.to_string(),
            t.name.clone(),
            t.status.as_str().to_string(),
            t.priority.as_str().to_string(),
            t.progress.to_string(),
            t.assignee.clone().unwrap_or_default(),
            t.due_date.map(|d| d.to_string()).unwrap_or_default(),
            if listing.overdue { "Yes" } else { "No" }.to_string(),
        ];
        push_row(&mut out, &row);
    }
    out
}

fn push_row(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Quotes a field when it contains a delimiter, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entities::{Project, Task, TaskPriority, TaskStatus};

    fn project_listing() -> ProjectListing {
        ProjectListing {
            display_no: 1,
            project: Project {
                id: 42,
                user_id: 1,
                name: "Docks, phase \"two\"".to_string(),
                description: None,
                start_date: "2026-02-01".parse().unwrap(),
                end_date: "2026-11-30".parse().unwrap(),
                budget: 5000.0,
            },
        }
    }

    fn task_listing() -> TaskListing {
        TaskListing {
            display_no: 3,
            overdue: true,
            task: Task {
                id: 17,
                project_id: 42,
                name: "dredge channel".to_string(),
                status: TaskStatus::InProgress,
                priority: TaskPriority::High,
                progress: 25,
                assignee: None,
                due_date: Some("2026-03-01".parse().unwrap()),
            },
        }
    }

    #[test]
    fn test_projects_csv_quotes_special_fields() {
        let csv = projects_to_csv(&[project_listing()]);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Project No.,ID,Name,Description,Start Date,End Date,Budget"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,42,\"Docks, phase \"\"two\"\"\",,2026-02-01,2026-11-30,5000.00"
        );
    }

    #[test]
    fn test_tasks_csv_row() {
        let csv = tasks_to_csv(&[task_listing()]);
        let row = csv.lines().nth(1).unwrap();

        assert_eq!(row, "3,17,dredge channel,In Progress,High,25,,2026-03-01,Yes");
    }

    #[test]
    fn test_empty_listing_is_header_only() {
        let csv = tasks_to_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }
}
