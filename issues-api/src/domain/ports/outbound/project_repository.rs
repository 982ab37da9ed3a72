use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectId, ProjectUpdate},
    RepositoryError,
};

/// Outbound port for the `projects` collection.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// First project stored under `name`, if any.
    async fn find_one(&self, name: &str) -> Result<Option<Project>, RepositoryError>;

    async fn insert_one(&self, project: &NewProject) -> Result<ProjectId, RepositoryError>;

    async fn update_one(
        &self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<(), RepositoryError>;
}
