//! Table definitions and row types.
//!
//! Rows are the raw shapes SQLite hands back; conversions into the entity
//! types live here so the services deal only in entities.

use entities::{Project, Task, TaskPriority, TaskStatus, User};
use sqlx::FromRow;

/// Idempotent DDL, one statement per table.
pub const CREATE_TABLES: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        start_date TEXT,
        end_date TEXT,
        budget REAL,
        FOREIGN KEY (user_id) REFERENCES users (id)
    )",
    "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        status TEXT DEFAULT 'Not Started',
        priority TEXT DEFAULT 'Medium',
        progress INTEGER DEFAULT 0,
        assignee TEXT,
        due_date TEXT,
        FOREIGN KEY (project_id) REFERENCES projects (id)
    )",
];

/// Dates are stored as ISO-8601 calendar dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(s, DATE_FORMAT)
        .unwrap_or_else(|_| chrono::Utc::now().date_naive())
}

/// Database row for User.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

/// Database row for Project.
#[derive(Debug, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            start_date: parse_date(&row.start_date),
            end_date: parse_date(&row.end_date),
            budget: row.budget,
        }
    }
}

/// Database row for Task.
#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub status: String,
    pub priority: Option<String>,
    pub progress: i64,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            status: TaskStatus::parse(&row.status).unwrap_or_default(),
            // NULL only in rows written before the priority migration.
            priority: row
                .priority
                .as_deref()
                .and_then(TaskPriority::parse)
                .unwrap_or_default(),
            progress: row.progress.clamp(0, 100) as u8,
            assignee: row.assignee,
            due_date: row
                .due_date
                .as_deref()
                .and_then(|s| chrono::NaiveDate::parse_from_str(s, DATE_FORMAT).ok()),
        }
    }
}

/// Database row for a task joined with its owning project.
#[derive(Debug, FromRow)]
pub struct ProjectTaskRow {
    pub project_name: String,
    #[sqlx(flatten)]
    pub task: TaskRow,
}
