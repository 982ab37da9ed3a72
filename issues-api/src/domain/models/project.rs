use serde::Serialize;
use time::OffsetDateTime;

use super::{IssueId, ProjectId};

/// A named grouping of issues with an explicit, ordered membership list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    pub name: String,
    pub issues: Vec<IssueId>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_on: OffsetDateTime,
}

impl Project {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Membership list with the first occurrence of `issue_id` removed, or
    /// `None` when the project does not list it.
    pub fn issues_without(&self, issue_id: IssueId) -> Option<Vec<IssueId>> {
        let index = self.issues.iter().position(|id| *id == issue_id)?;
        let mut issues = self.issues.clone();
        issues.remove(index);
        Some(issues)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub created_on: OffsetDateTime,
    pub updated_on: OffsetDateTime,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            name: name.into(),
            created_on: now,
            updated_on: now,
        }
    }
}

/// Targeted updates the service issues against a single project.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectUpdate {
    /// Append an issue id to the membership list.
    PushIssue(IssueId),
    /// Replace the membership list and refresh `updated_on`.
    SetIssues {
        issues: Vec<IssueId>,
        updated_on: OffsetDateTime,
    },
}
