use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::{
    models::{IssueId, NewProject, Project, ProjectId, ProjectUpdate},
    ports::outbound::ProjectRepository,
    RepositoryError,
};

/// Project store backed by the `projects` table. Member issue ids live in
/// the `issues BIGINT[]` column, in insertion order.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    issues: Vec<i64>,
    created_on: OffsetDateTime,
    updated_on: OffsetDateTime,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.id),
            name: row.name,
            issues: row.issues.into_iter().map(IssueId::new).collect(),
            created_on: row.created_on,
            updated_on: row.updated_on,
        }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_one(&self, name: &str) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, issues, created_on, updated_on
            FROM projects
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Project::from))
    }

    async fn insert_one(&self, project: &NewProject) -> Result<ProjectId, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (name, issues, created_on, updated_on)
            VALUES ($1, '{}', $2, $3)
            RETURNING id
            "#,
        )
        .bind(&project.name)
        .bind(project.created_on)
        .bind(project.updated_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProjectId::new(id))
    }

    async fn update_one(
        &self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<(), RepositoryError> {
        match update {
            ProjectUpdate::PushIssue(issue_id) => {
                sqlx::query(
                    r#"
                    UPDATE projects SET issues = array_append(issues, $2) WHERE id = $1
                    "#,
                )
                .bind(id.as_i64())
                .bind(issue_id.as_i64())
                .execute(&self.pool)
                .await?;
            }
            ProjectUpdate::SetIssues { issues, updated_on } => {
                let issues = issues.iter().map(IssueId::as_i64).collect::<Vec<_>>();
                sqlx::query(
                    r#"
                    UPDATE projects SET issues = $2, updated_on = $3 WHERE id = $1
                    "#,
                )
                .bind(id.as_i64())
                .bind(&issues)
                .bind(*updated_on)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }
}
