//! Project CRUD, scoped by owning user.

use std::sync::Arc;

use entities::{NewProject, Project, ProjectListing, Session};

use crate::{
    schema::{ProjectRow, DATE_FORMAT},
    Database, StoreError, StoreResult,
};

/// Service for managing projects.
pub struct ProjectService {
    db: Arc<Database>,
}

impl ProjectService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Creates a project owned by the session user; returns its id.
    pub async fn create(&self, session: &Session, draft: &NewProject) -> StoreResult<i64> {
        validate_project(draft)?;

        let result = sqlx::query(
            "INSERT INTO projects (user_id, name, description, start_date, end_date, budget)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(session.user_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.start_date.format(DATE_FORMAT).to_string())
        .bind(draft.end_date.format(DATE_FORMAT).to_string())
        .bind(draft.budget)
        .execute(self.db.pool())
        .await?;

        let project_id = result.last_insert_rowid();
        tracing::debug!(project_id, user_id = session.user_id, "created project");
        Ok(project_id)
    }

    /// Lists the session user's projects in creation order.
    ///
    /// Each project carries its display number, recomputed on this read.
    pub async fn list_for_user(&self, session: &Session) -> StoreResult<Vec<ProjectListing>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, user_id, name, description, start_date, end_date, budget
             FROM projects
             WHERE user_id = ?
             ORDER BY id ASC",
        )
        .bind(session.user_id)
        .fetch_all(self.db.pool())
        .await?;

        let projects = rows.into_iter().map(Project::from).collect();
        Ok(ProjectListing::number(projects))
    }

    /// Gets a project by id.
    pub async fn get(&self, project_id: i64) -> StoreResult<Option<Project>> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "SELECT id, user_id, name, description, start_date, end_date, budget
             FROM projects
             WHERE id = ?",
        )
        .bind(project_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Project::from))
    }

    /// Replaces every mutable field of a project.
    ///
    /// Errors with [`StoreError::NotFound`] when the id does not exist.
    pub async fn update(&self, project_id: i64, draft: &NewProject) -> StoreResult<()> {
        validate_project(draft)?;

        let result = sqlx::query(
            "UPDATE projects
             SET name = ?, description = ?, start_date = ?, end_date = ?, budget = ?
             WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.start_date.format(DATE_FORMAT).to_string())
        .bind(draft.end_date.format(DATE_FORMAT).to_string())
        .bind(draft.budget)
        .bind(project_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Project", project_id));
        }
        Ok(())
    }

    /// Deletes a project and every task it owns, in one transaction.
    ///
    /// No orphaned tasks can survive: either both deletes commit or
    /// neither does.
    pub async fn delete(&self, project_id: i64) -> StoreResult<()> {
        let mut tx = self.db.pool().begin().await?;

        let tasks_removed = sqlx::query("DELETE FROM tasks WHERE project_id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the task delete.
            return Err(StoreError::not_found("Project", project_id));
        }

        tx.commit().await?;
        tracing::debug!(project_id, tasks_removed, "deleted project");
        Ok(())
    }
}

fn validate_project(draft: &NewProject) -> StoreResult<()> {
    if draft.name.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "project name must not be empty".to_string(),
        ));
    }
    if draft.budget < 0.0 || draft.budget.is_nan() {
        return Err(StoreError::InvalidInput(
            "budget must be non-negative".to_string(),
        ));
    }
    Ok(())
}
