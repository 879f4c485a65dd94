//! HTML project report.

use entities::{overall_progress, Project, Task, TaskListing, TaskStatus};

/// Renders an HTML report for a project and its task listings.
///
/// Pure function of its inputs: the caller fetches the project and tasks
/// through the repository layer (or supplies fixtures) and decides what
/// to do with the document.
pub fn project_report(project: &Project, tasks: &[TaskListing]) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<h1>Project Report: {}</h1>\n",
        escape_html(&project.name)
    ));
    html.push_str(&format!(
        "<p><strong>Description:</strong> {}</p>\n",
        escape_html(project.description.as_deref().unwrap_or(""))
    ));
    html.push_str(&format!(
        "<p><strong>Start Date:</strong> {}</p>\n",
        project.start_date
    ));
    html.push_str(&format!(
        "<p><strong>End Date:</strong> {}</p>\n",
        project.end_date
    ));
    html.push_str(&format!(
        "<p><strong>Budget:</strong> ${}</p>\n",
        format_amount(project.budget)
    ));

    html.push_str("<h2>Task Overview</h2>\n");
    if tasks.is_empty() {
        html.push_str("<p>No tasks recorded for this project.</p>\n");
        return html;
    }

    let records: Vec<Task> = tasks.iter().map(|l| l.task.clone()).collect();
    let completed = records
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let overdue = tasks.iter().filter(|l| l.overdue).count();

    html.push_str(&format!(
        "<p><strong>Overall Project Progress:</strong> {:.1}%</p>\n",
        overall_progress(&records)
    ));
    html.push_str(&format!(
        "<p><strong>Total Tasks:</strong> {}</p>\n",
        tasks.len()
    ));
    html.push_str(&format!(
        "<p><strong>Completed Tasks:</strong> {completed}</p>\n"
    ));
    html.push_str(&format!(
        "<p><strong>Overdue Tasks:</strong> <span style=\"color:red;\">{overdue}</span></p>\n"
    ));

    html.push_str(
        "<table class=\"tasks-table\">\n<tr>\
         <th>Task No.</th><th>Name</th><th>Status</th><th>Priority</th>\
         <th>Progress (%)</th><th>Assigned To</th><th>Due Date</th>\
         <th style=\"color:red;\">Is Overdue</th></tr>\n",
    );
    for listing in tasks {
        let task = &listing.task;
        let overdue_cell = if listing.overdue {
            "<td style=\"color:red; font-weight:bold;\">Yes</td>"
        } else {
            "<td>No</td>"
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}</tr>\n",
            listing.display_no,
            escape_html(&task.name),
            task.status.as_str(),
            task.priority.as_str(),
            task.progress,
            escape_html(task.assignee.as_deref().unwrap_or("")),
            task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            overdue_cell,
        ));
    }
    html.push_str("</table>\n");

    html.push_str(
        "<style>\n\
         .tasks-table { width: 100%; border-collapse: collapse; margin-top: 20px; }\n\
         .tasks-table th, .tasks-table td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n\
         .tasks-table th { background-color: #f2f2f2; }\n\
         </style>\n",
    );

    html
}

/// Escapes text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a monetary amount with thousands separators and two decimals.
fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}
