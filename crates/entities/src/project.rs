//! Project entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A project owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// Owning user's id.
    pub user_id: i64,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Planned start date.
    pub start_date: NaiveDate,
    /// Planned end date.
    pub end_date: NaiveDate,
    /// Allocated budget, non-negative.
    pub budget: f64,
}

/// Fields for creating or fully replacing a project.
///
/// Updates use full-record replace semantics: every field here overwrites
/// the stored value, there is no partial patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name, must be non-empty.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Planned start date.
    pub start_date: NaiveDate,
    /// Planned end date.
    pub end_date: NaiveDate,
    /// Allocated budget, must be non-negative.
    pub budget: f64,
}

impl NewProject {
    /// Creates a draft project with an empty description.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date,
            end_date,
            budget,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A project annotated with its per-user display number.
///
/// Display numbers are a read-time presentation aid: a contiguous 1..N
/// sequence in creation order, recomputed on every fetch. They shift when
/// earlier projects are deleted and must never be treated as identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListing {
    /// Sequential number within the owning user's projects.
    pub display_no: u32,
    /// The underlying project record.
    pub project: Project,
}

impl ProjectListing {
    /// Numbers projects 1..N in the given (creation) order.
    pub fn number(projects: Vec<Project>) -> Vec<ProjectListing> {
        projects
            .into_iter()
            .zip(1u32..)
            .map(|(project, display_no)| ProjectListing {
                display_no,
                project,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn project(id: i64, name: &str) -> Project {
        Project {
            id,
            user_id: 1,
            name: name.to_string(),
            description: None,
            start_date: date("2026-01-01"),
            end_date: date("2026-06-30"),
            budget: 1000.0,
        }
    }

    #[test]
    fn test_numbering_is_contiguous() {
        let listings = ProjectListing::number(vec![
            project(3, "first"),
            project(9, "second"),
            project(21, "third"),
        ]);

        let numbers: Vec<u32> = listings.iter().map(|l| l.display_no).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_numbering_closes_gaps_after_delete() {
        // Ids 3 and 21 remain after deleting the middle project; numbers
        // must still be 1 and 2, not 1 and 3.
        let listings = ProjectListing::number(vec![project(3, "first"), project(21, "third")]);

        assert_eq!(listings[0].display_no, 1);
        assert_eq!(listings[1].display_no, 2);
        assert_eq!(listings[1].project.id, 21);
    }
}
