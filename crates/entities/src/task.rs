//! Task entity definitions and derived read-time values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task status.
///
/// Transitions are free-form: any status may move to any other status,
/// including backward (e.g. Completed back to InProgress).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not begun.
    #[default]
    NotStarted,
    /// Work is underway.
    InProgress,
    /// Work is paused.
    OnHold,
    /// Work is finished.
    Completed,
    /// Work was abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Converts the status to its storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from its storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Not Started" => Some(Self::NotStarted),
            "In Progress" => Some(Self::InProgress),
            "On Hold" => Some(Self::OnHold),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true for statuses that end a task's active life.
    ///
    /// Closed tasks are never flagged overdue, however old their due date.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// All statuses, in presentation order.
    pub fn all() -> [TaskStatus; 5] {
        [
            Self::NotStarted,
            Self::InProgress,
            Self::OnHold,
            Self::Completed,
            Self::Cancelled,
        ]
    }
}

/// Task priority. Added in a later schema revision, so older databases
/// gain the column through an incremental migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can slip without consequence.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Converts the priority to its storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses a priority from its storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

/// A task within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// Owning project's id.
    pub project_id: i64,
    /// Task name.
    pub name: String,
    /// Current status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Progress percentage, 0 through 100.
    pub progress: u8,
    /// Who the task is assigned to, free text.
    pub assignee: Option<String>,
    /// When the task is due.
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Whether the task is overdue as of `today`.
    ///
    /// True iff the due date is strictly before `today` and the task is
    /// still open. Recomputed on every read, never persisted.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && !self.status.is_closed(),
            None => false,
        }
    }
}

/// Fields for creating or fully replacing a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Task name, must be non-empty.
    pub name: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Progress percentage, 0 through 100.
    pub progress: u8,
    /// Who the task is assigned to.
    pub assignee: Option<String>,
    /// When the task is due.
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Creates a draft task with default status, priority, and progress.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            progress: 0,
            assignee: None,
            due_date: None,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the progress percentage.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// A task annotated with its per-project display number and overdue flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListing {
    /// Sequential number within the owning project's tasks.
    pub display_no: u32,
    /// Whether the task was overdue at read time.
    pub overdue: bool,
    /// The underlying task record.
    pub task: Task,
}

impl TaskListing {
    /// Numbers tasks 1..N in the given (creation) order and computes the
    /// overdue flag for each against `today`.
    pub fn annotate(tasks: Vec<Task>, today: NaiveDate) -> Vec<TaskListing> {
        tasks
            .into_iter()
            .zip(1u32..)
            .map(|(task, display_no)| TaskListing {
                display_no,
                overdue: task.is_overdue(today),
                task,
            })
            .collect()
    }
}

/// A task paired with the project it belongs to, for cross-project views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTask {
    /// Owning project's id.
    pub project_id: i64,
    /// Owning project's name.
    pub project_name: String,
    /// The task record.
    pub task: Task,
}

impl ProjectTask {
    /// Whether the task is overdue as of `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.task.is_overdue(today)
    }
}

/// Arithmetic mean of progress across tasks, 0.0 when there are none.
pub fn overall_progress(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let total: u32 = tasks.iter().map(|t| u32::from(t.progress)).sum();
    f64::from(total) / tasks.len() as f64
}
