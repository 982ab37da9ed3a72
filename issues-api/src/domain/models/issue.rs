use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{IssueId, ProjectId};

/// A persisted issue document.
///
/// Field names double as the wire format, so this serializes to exactly the
/// ten keys clients see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    pub project_id: ProjectId,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_on: OffsetDateTime,
}

/// An issue that has not been inserted yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub project_id: ProjectId,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: OffsetDateTime,
    pub updated_on: OffsetDateTime,
}

impl NewIssue {
    pub fn with_id(self, id: IssueId) -> Issue {
        Issue {
            id,
            project_id: self.project_id,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open: self.open,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}

/// Filters accepted by the list endpoint. Every key is optional; blank values
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueQuery {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<String>,
}

/// Equality filter handed to the issue store.
///
/// `ids` restricts results to a membership set; the remaining fields are
/// intersected with it when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFilter {
    pub ids: Vec<IssueId>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueFilter {
    /// Builds a filter over `ids` from the non-blank values of `query`.
    pub fn from_query(ids: Vec<IssueId>, query: &IssueQuery) -> Self {
        Self {
            ids,
            issue_title: non_blank(query.issue_title.as_deref()),
            issue_text: non_blank(query.issue_text.as_deref()),
            created_by: non_blank(query.created_by.as_deref()),
            assigned_to: non_blank(query.assigned_to.as_deref()),
            status_text: non_blank(query.status_text.as_deref()),
            open: non_blank(query.open.as_deref()).map(|open| parse_open(&open)),
        }
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
            wanted.as_deref().map_or(true, |wanted| wanted == actual)
        }

        self.ids.contains(&issue.id)
            && field_matches(&self.issue_title, &issue.issue_title)
            && field_matches(&self.issue_text, &issue.issue_text)
            && field_matches(&self.created_by, &issue.created_by)
            && field_matches(&self.assigned_to, &issue.assigned_to)
            && field_matches(&self.status_text, &issue.status_text)
            && self.open.map_or(true, |open| open == issue.open)
    }
}

/// Body of an issue submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateIssueRequest {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

/// Body of an issue update: the target `_id` plus any mutable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateIssueRequest {
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteIssueRequest {
    pub id: Option<String>,
}

/// Trims `value` and drops it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Only the literal `"true"` means open; anything else, `"false"` included,
/// means closed.
pub fn parse_open(value: &str) -> bool {
    value.trim() == "true"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: i64, status_text: &str, open: bool) -> Issue {
        let now = OffsetDateTime::now_utc();
        Issue {
            id: IssueId::new(id),
            project_id: ProjectId::new(1),
            issue_title: "Title".to_string(),
            issue_text: "Text".to_string(),
            created_by: "Creator".to_string(),
            assigned_to: String::new(),
            status_text: status_text.to_string(),
            open,
            created_on: now,
            updated_on: now,
        }
    }

    #[test]
    fn open_only_accepts_literal_true() {
        assert!(parse_open("true"));
        assert!(parse_open(" true "));
        assert!(!parse_open("false"));
        assert!(!parse_open("TRUE"));
        assert!(!parse_open("yes"));
    }

    #[test]
    fn blank_query_values_are_ignored() {
        let query = IssueQuery {
            issue_title: Some("   ".to_string()),
            status_text: Some(" IN_PROGRESS ".to_string()),
            open: Some("".to_string()),
            ..Default::default()
        };

        let filter = IssueFilter::from_query(vec![IssueId::new(1)], &query);

        assert_eq!(filter.issue_title, None);
        assert_eq!(filter.status_text.as_deref(), Some("IN_PROGRESS"));
        assert_eq!(filter.open, None);
    }

    #[test]
    fn filter_requires_membership_and_every_field() {
        let query = IssueQuery {
            status_text: Some("IN_PROGRESS".to_string()),
            open: Some("false".to_string()),
            ..Default::default()
        };
        let filter = IssueFilter::from_query(vec![IssueId::new(1), IssueId::new(2)], &query);

        assert!(filter.matches(&issue(1, "IN_PROGRESS", false)));
        assert!(!filter.matches(&issue(2, "IN_PROGRESS", true)));
        assert!(!filter.matches(&issue(2, "DONE", false)));
        assert!(!filter.matches(&issue(3, "IN_PROGRESS", false)));
    }

    #[test]
    fn issue_serializes_the_documented_keys() {
        let value = serde_json::to_value(issue(5, "", true)).unwrap();
        let mut keys = value
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        keys.sort();

        assert_eq!(
            keys,
            [
                "_id",
                "assigned_to",
                "created_by",
                "created_on",
                "issue_text",
                "issue_title",
                "open",
                "project_id",
                "status_text",
                "updated_on",
            ]
        );
        assert_eq!(value["_id"], "5");
    }
}
