//! Filtering of task listings ahead of display or export.

use entities::{TaskListing, TaskStatus};

/// Filter options for task listings.
///
/// All criteria are conjunctive; the default filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Keep only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Keep only tasks assigned to this person (exact match).
    pub assignee: Option<String>,
    /// Keep only tasks flagged overdue.
    pub overdue_only: bool,
    /// Keep only tasks whose name or assignee contains this text,
    /// case-insensitively.
    pub search: Option<String>,
}

impl TaskFilter {
    /// Whether a listing passes the filter.
    pub fn matches(&self, listing: &TaskListing) -> bool {
        if let Some(status) = self.status {
            if listing.task.status != status {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if listing.task.assignee.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        if self.overdue_only && !listing.overdue {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let name_hit = listing.task.name.to_lowercase().contains(&term);
            let assignee_hit = listing
                .task
                .assignee
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&term));
            if !name_hit && !assignee_hit {
                return false;
            }
        }
        true
    }

    /// Returns the listings that pass the filter, in their original order.
    pub fn apply(&self, listings: &[TaskListing]) -> Vec<TaskListing> {
        listings
            .iter()
            .filter(|l| self.matches(l))
            .cloned()
            .collect()
    }
}
