use async_trait::async_trait;

use crate::domain::{
    models::{Issue, IssueFilter, IssueId, NewIssue},
    RepositoryError,
};

/// Result of a single-document delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn acknowledged(&self) -> bool {
        self.deleted_count > 0
    }
}

/// Outbound port for the `issues` collection.
///
/// Pure passthrough to storage: no validation, one store call per method.
#[async_trait]
pub trait IssueRepository: Send + Sync + 'static {
    async fn find_one(&self, id: IssueId) -> Result<Option<Issue>, RepositoryError>;

    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, RepositoryError>;

    async fn insert_one(&self, issue: &NewIssue) -> Result<IssueId, RepositoryError>;

    /// Rewrites every mutable field of the stored document with `issue`.
    async fn update_one(&self, issue: &Issue) -> Result<(), RepositoryError>;

    async fn delete_one(&self, id: IssueId) -> Result<DeleteOutcome, RepositoryError>;
}
