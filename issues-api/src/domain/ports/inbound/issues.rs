use async_trait::async_trait;

use crate::domain::{
    models::{CreateIssueRequest, DeleteIssueRequest, Issue, IssueQuery, UpdateIssueRequest},
    IssueError,
};

/// Inbound port for issue operations.
///
/// This trait defines the use cases that HTTP handlers can invoke.
#[async_trait]
pub trait IssueService: Send + Sync + 'static {
    /// List the issues of a project, narrowed by any non-blank filters.
    async fn list_issues(
        &self,
        project_name: &str,
        query: &IssueQuery,
    ) -> Result<Vec<Issue>, IssueError>;

    /// Create an issue, creating the project on first use.
    ///
    /// Orchestrates: validate → find or create project → insert issue →
    /// push its id onto the project → re-fetch.
    async fn create_issue(
        &self,
        project_name: &str,
        request: &CreateIssueRequest,
    ) -> Result<Issue, IssueError>;

    /// Apply the changed fields of `request`. Returns the `_id` as sent.
    async fn update_issue(&self, request: &UpdateIssueRequest) -> Result<String, IssueError>;

    /// Delete an issue and pull it from its project. Returns the id.
    async fn delete_issue(
        &self,
        project_name: &str,
        request: &DeleteIssueRequest,
    ) -> Result<String, IssueError>;
}
