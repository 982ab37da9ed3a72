use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::{
    models::{Issue, IssueFilter, IssueId, NewIssue, ProjectId},
    ports::outbound::{DeleteOutcome, IssueRepository},
    RepositoryError,
};

/// Issue store backed by the `issues` table.
#[derive(Clone)]
pub struct PostgresIssueRepository {
    pool: PgPool,
}

impl PostgresIssueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct IssueRow {
    id: i64,
    project_id: i64,
    issue_title: String,
    issue_text: String,
    created_by: String,
    assigned_to: String,
    status_text: String,
    open: bool,
    created_on: OffsetDateTime,
    updated_on: OffsetDateTime,
}

impl From<IssueRow> for Issue {
    fn from(row: IssueRow) -> Self {
        Self {
            id: IssueId::new(row.id),
            project_id: ProjectId::new(row.project_id),
            issue_title: row.issue_title,
            issue_text: row.issue_text,
            created_by: row.created_by,
            assigned_to: row.assigned_to,
            status_text: row.status_text,
            open: row.open,
            created_on: row.created_on,
            updated_on: row.updated_on,
        }
    }
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn find_one(&self, id: IssueId) -> Result<Option<Issue>, RepositoryError> {
        let row = sqlx::query_as::<_, IssueRow>(
            r#"
            SELECT id, project_id, issue_title, issue_text, created_by, assigned_to, status_text, open, created_on, updated_on
            FROM issues
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Issue::from))
    }

    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, RepositoryError> {
        let ids = filter.ids.iter().map(IssueId::as_i64).collect::<Vec<_>>();

        let rows = sqlx::query_as::<_, IssueRow>(
            r#"
            SELECT id, project_id, issue_title, issue_text, created_by, assigned_to, status_text, open, created_on, updated_on
            FROM issues
            WHERE id = ANY($1)
              AND ($2::text IS NULL OR issue_title = $2)
              AND ($3::text IS NULL OR issue_text = $3)
              AND ($4::text IS NULL OR created_by = $4)
              AND ($5::text IS NULL OR assigned_to = $5)
              AND ($6::text IS NULL OR status_text = $6)
              AND ($7::bool IS NULL OR open = $7)
            "#,
        )
        .bind(&ids)
        .bind(filter.issue_title.as_deref())
        .bind(filter.issue_text.as_deref())
        .bind(filter.created_by.as_deref())
        .bind(filter.assigned_to.as_deref())
        .bind(filter.status_text.as_deref())
        .bind(filter.open)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Issue::from).collect())
    }

    async fn insert_one(&self, issue: &NewIssue) -> Result<IssueId, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO issues (project_id, issue_title, issue_text, created_by, assigned_to, status_text, open, created_on, updated_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(issue.project_id.as_i64())
        .bind(&issue.issue_title)
        .bind(&issue.issue_text)
        .bind(&issue.created_by)
        .bind(&issue.assigned_to)
        .bind(&issue.status_text)
        .bind(issue.open)
        .bind(issue.created_on)
        .bind(issue.updated_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(IssueId::new(id))
    }

    async fn update_one(&self, issue: &Issue) -> Result<(), RepositoryError> {
        // project_id and created_on are immutable and never rewritten
        sqlx::query(
            r#"
            UPDATE issues
            SET issue_title = $2, issue_text = $3, created_by = $4, assigned_to = $5, status_text = $6, open = $7, updated_on = $8
            WHERE id = $1
            "#,
        )
        .bind(issue.id.as_i64())
        .bind(&issue.issue_title)
        .bind(&issue.issue_text)
        .bind(&issue.created_by)
        .bind(&issue.assigned_to)
        .bind(&issue.status_text)
        .bind(issue.open)
        .bind(issue.updated_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_one(&self, id: IssueId) -> Result<DeleteOutcome, RepositoryError> {
        let query_result = sqlx::query(
            r#"
            DELETE FROM issues WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(DeleteOutcome {
            deleted_count: query_result.rows_affected(),
        })
    }
}
