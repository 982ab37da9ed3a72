use async_trait::async_trait;

use crate::domain::{models::Project, IssueError};

#[async_trait]
pub trait ProjectLookup: Send + Sync + 'static {
    /// Resolve a project by its trimmed name.
    ///
    /// A blank name is invalid input; an unknown name is `Ok(None)`.
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, IssueError>;
}
