use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::Project,
    ports::{inbound::ProjectLookup, outbound::ProjectRepository},
    IssueError,
};

pub struct ProjectLookupImpl<P> {
    projects: Arc<P>,
}

impl<P> ProjectLookupImpl<P> {
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl<P: ProjectRepository> ProjectLookup for ProjectLookupImpl<P> {
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, IssueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IssueError::InvalidProjectName);
        }

        Ok(self.projects.find_one(name).await?)
    }
}
