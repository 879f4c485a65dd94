//! Task CRUD, scoped by owning project, plus cross-project reads.

use std::sync::Arc;

use chrono::NaiveDate;
use entities::{NewTask, ProjectTask, Session, Task, TaskListing};

use crate::{
    schema::{ProjectTaskRow, TaskRow, DATE_FORMAT},
    Database, StoreError, StoreResult,
};

/// Service for managing tasks.
pub struct TaskService {
    db: Arc<Database>,
}

impl TaskService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Creates a task within a project; returns its id.
    pub async fn create(&self, project_id: i64, draft: &NewTask) -> StoreResult<i64> {
        validate_task(draft)?;

        let result = sqlx::query(
            "INSERT INTO tasks (project_id, name, status, priority, progress, assignee, due_date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(project_id)
        .bind(&draft.name)
        .bind(draft.status.as_str())
        .bind(draft.priority.as_str())
        .bind(i64::from(draft.progress))
        .bind(&draft.assignee)
        .bind(draft.due_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .execute(self.db.pool())
        .await?;

        let task_id = result.last_insert_rowid();
        tracing::debug!(task_id, project_id, "created task");
        Ok(task_id)
    }

    /// Lists a project's tasks in creation order.
    ///
    /// Display numbers and overdue flags are derived fresh against today's
    /// date on every call.
    pub async fn list_for_project(&self, project_id: i64) -> StoreResult<Vec<TaskListing>> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, project_id, name, status, priority, progress, assignee, due_date
             FROM tasks
             WHERE project_id = ?
             ORDER BY id ASC",
        )
        .bind(project_id)
        .fetch_all(self.db.pool())
        .await?;

        let tasks = rows.into_iter().map(Task::from).collect();
        Ok(TaskListing::annotate(tasks, today()))
    }

    /// Gets a task by id.
    pub async fn get(&self, task_id: i64) -> StoreResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(
            "SELECT id, project_id, name, status, priority, progress, assignee, due_date
             FROM tasks
             WHERE id = ?",
        )
        .bind(task_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Task::from))
    }

    /// Replaces every mutable field of a task.
    ///
    /// Errors with [`StoreError::NotFound`] when the id does not exist.
    pub async fn update(&self, task_id: i64, draft: &NewTask) -> StoreResult<()> {
        validate_task(draft)?;

        let result = sqlx::query(
            "UPDATE tasks
             SET name = ?, status = ?, priority = ?, progress = ?, assignee = ?, due_date = ?
             WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(draft.status.as_str())
        .bind(draft.priority.as_str())
        .bind(i64::from(draft.progress))
        .bind(&draft.assignee)
        .bind(draft.due_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(task_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Task", task_id));
        }
        Ok(())
    }

    /// Deletes a single task, independent of any project-level operation.
    pub async fn delete(&self, task_id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Task", task_id));
        }
        tracing::debug!(task_id, "deleted task");
        Ok(())
    }

    /// Lists every task across all of the session user's projects.
    pub async fn list_for_user(&self, session: &Session) -> StoreResult<Vec<ProjectTask>> {
        let rows: Vec<ProjectTaskRow> = sqlx::query_as(
            "SELECT p.name AS project_name,
                    t.id, t.project_id, t.name, t.status, t.priority, t.progress,
                    t.assignee, t.due_date
             FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.user_id = ?
             ORDER BY t.id ASC",
        )
        .bind(session.user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ProjectTask {
                project_id: row.task.project_id,
                project_name: row.project_name,
                task: Task::from(row.task),
            })
            .collect())
    }

    /// Overdue tasks across all of the session user's projects, most
    /// urgent (earliest due date) first.
    pub async fn overdue_for_user(&self, session: &Session) -> StoreResult<Vec<ProjectTask>> {
        let now = today();
        let mut overdue: Vec<ProjectTask> = self
            .list_for_user(session)
            .await?
            .into_iter()
            .filter(|pt| pt.is_overdue(now))
            .collect();
        overdue.sort_by_key(|pt| pt.task.due_date);
        Ok(overdue)
    }
}

fn validate_task(draft: &NewTask) -> StoreResult<()> {
    if draft.name.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "task name must not be empty".to_string(),
        ));
    }
    if draft.progress > 100 {
        return Err(StoreError::InvalidInput(
            "progress must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use entities::{NewProject, TaskPriority, TaskStatus};

    struct Fixture {
        projects: crate::ProjectService,
        tasks: TaskService,
        session: Session,
        project_id: i64,
    }

    async fn setup() -> Fixture {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let creds = crate::CredentialService::new(db.clone());
        creds.register("alice", "hunter2hunter2").await.unwrap();
        let session = creds.login("alice", "hunter2hunter2").await.unwrap().unwrap();

        let projects = crate::ProjectService::new(db.clone());
        let draft = NewProject::new(
            "Site works",
            "2026-01-01".parse().unwrap(),
            "2026-12-31".parse().unwrap(),
            100_000.0,
        );
        let project_id = projects.create(&session, &draft).await.unwrap();

        Fixture {
            projects,
            tasks: TaskService::new(db),
            session,
            project_id,
        }
    }

    fn yesterday() -> NaiveDate {
        today() - Duration::days(1)
    }

    fn tomorrow() -> NaiveDate {
        today() + Duration::days(1)
    }

    #[tokio::test]
    async fn test_create_then_list_round_trips() {
        let fx = setup().await;

        let draft = NewTask::new("excavation")
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::High)
            .with_progress(40)
            .with_assignee("bob")
            .with_due_date(tomorrow());
        let id = fx.tasks.create(fx.project_id, &draft).await.unwrap();

        let listings = fx.tasks.list_for_project(fx.project_id).await.unwrap();
        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.display_no, 1);
        assert!(!listing.overdue);
        assert_eq!(listing.task.id, id);
        assert_eq!(listing.task.name, "excavation");
        assert_eq!(listing.task.status, TaskStatus::InProgress);
        assert_eq!(listing.task.priority, TaskPriority::High);
        assert_eq!(listing.task.progress, 40);
        assert_eq!(listing.task.assignee.as_deref(), Some("bob"));
        assert_eq!(listing.task.due_date, Some(tomorrow()));
    }

    #[tokio::test]
    async fn test_overdue_derivation_on_reads() {
        let fx = setup().await;

        let late = NewTask::new("late")
            .with_status(TaskStatus::InProgress)
            .with_due_date(yesterday());
        let done = NewTask::new("done")
            .with_status(TaskStatus::Completed)
            .with_due_date(yesterday());
        let future = NewTask::new("future")
            .with_status(TaskStatus::NotStarted)
            .with_due_date(tomorrow());
        fx.tasks.create(fx.project_id, &late).await.unwrap();
        fx.tasks.create(fx.project_id, &done).await.unwrap();
        fx.tasks.create(fx.project_id, &future).await.unwrap();

        let listings = fx.tasks.list_for_project(fx.project_id).await.unwrap();
        let flags: Vec<bool> = listings.iter().map(|l| l.overdue).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let fx = setup().await;
        let id = fx
            .tasks
            .create(fx.project_id, &NewTask::new("original").with_assignee("bob"))
            .await
            .unwrap();

        let replacement = NewTask::new("renamed")
            .with_status(TaskStatus::OnHold)
            .with_priority(TaskPriority::Low)
            .with_progress(90);
        fx.tasks.update(id, &replacement).await.unwrap();

        let task = fx.tasks.get(id).await.unwrap().unwrap();
        assert_eq!(task.name, "renamed");
        assert_eq!(task.status, TaskStatus::OnHold);
        assert_eq!(task.priority, TaskPriority::Low);
        assert_eq!(task.progress, 90);
        // Full-record replace: the assignee was cleared, not kept.
        assert_eq!(task.assignee, None);
    }

    #[tokio::test]
    async fn test_status_transitions_are_free_form() {
        let fx = setup().await;
        let id = fx
            .tasks
            .create(
                fx.project_id,
                &NewTask::new("t").with_status(TaskStatus::Completed),
            )
            .await
            .unwrap();

        // Backward transition is allowed.
        fx.tasks
            .update(id, &NewTask::new("t").with_status(TaskStatus::InProgress))
            .await
            .unwrap();
        let task = fx.tasks.get(id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_owned_tasks() {
        let fx = setup().await;
        let a = fx
            .tasks
            .create(fx.project_id, &NewTask::new("a"))
            .await
            .unwrap();
        let b = fx
            .tasks
            .create(fx.project_id, &NewTask::new("b"))
            .await
            .unwrap();

        fx.projects.delete(fx.project_id).await.unwrap();

        assert!(fx
            .tasks
            .list_for_project(fx.project_id)
            .await
            .unwrap()
            .is_empty());
        assert!(fx.tasks.get(a).await.unwrap().is_none());
        assert!(fx.tasks.get(b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_task_delete_is_independent_and_renumbers() {
        let fx = setup().await;
        let _a = fx
            .tasks
            .create(fx.project_id, &NewTask::new("a"))
            .await
            .unwrap();
        let b = fx
            .tasks
            .create(fx.project_id, &NewTask::new("b"))
            .await
            .unwrap();
        let c = fx
            .tasks
            .create(fx.project_id, &NewTask::new("c"))
            .await
            .unwrap();

        fx.tasks.delete(b).await.unwrap();

        let listings = fx.tasks.list_for_project(fx.project_id).await.unwrap();
        let numbers: Vec<u32> = listings.iter().map(|l| l.display_no).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(listings[1].task.id, c);
        // The project itself is untouched.
        assert!(fx.projects.get(fx.project_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_missing_ids_fail_loudly() {
        let fx = setup().await;

        assert!(matches!(
            fx.tasks.update(999, &NewTask::new("ghost")).await.unwrap_err(),
            StoreError::NotFound { id: 999, .. }
        ));
        assert!(matches!(
            fx.tasks.delete(999).await.unwrap_err(),
            StoreError::NotFound { id: 999, .. }
        ));
    }

    #[tokio::test]
    async fn test_progress_validated_server_side() {
        let fx = setup().await;

        let too_much = NewTask::new("t").with_progress(101);
        assert!(matches!(
            fx.tasks.create(fx.project_id, &too_much).await.unwrap_err(),
            StoreError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn test_cross_project_overdue_summary() {
        let fx = setup().await;
        let other = fx
            .projects
            .create(
                &fx.session,
                &NewProject::new(
                    "Second",
                    "2026-01-01".parse().unwrap(),
                    "2026-12-31".parse().unwrap(),
                    0.0,
                ),
            )
            .await
            .unwrap();

        let very_late = NewTask::new("very late")
            .with_status(TaskStatus::InProgress)
            .with_due_date(yesterday() - Duration::days(5));
        let late = NewTask::new("late")
            .with_status(TaskStatus::InProgress)
            .with_due_date(yesterday());
        let on_time = NewTask::new("on time").with_due_date(tomorrow());
        fx.tasks.create(fx.project_id, &late).await.unwrap();
        fx.tasks.create(other, &very_late).await.unwrap();
        fx.tasks.create(other, &on_time).await.unwrap();

        let all = fx.tasks.list_for_user(&fx.session).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].project_name, "Site works");

        let overdue = fx.tasks.overdue_for_user(&fx.session).await.unwrap();
        let names: Vec<&str> = overdue.iter().map(|pt| pt.task.name.as_str()).collect();
        // Earliest due date first.
        assert_eq!(names, vec!["very late", "late"]);
    }
}
