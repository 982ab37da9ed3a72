use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{
        non_blank, parse_open, CreateIssueRequest, DeleteIssueRequest, Issue, IssueFilter,
        IssueId, IssueQuery, NewIssue, NewProject, ProjectId, ProjectUpdate, UpdateIssueRequest,
    },
    ports::{
        inbound::{IssueService, ProjectLookup},
        outbound::{IssueRepository, ProjectRepository},
    },
    services::ProjectLookupImpl,
    IssueError, RepositoryError,
};

/// Implementation of the IssueService inbound port.
///
/// Keeps the `issues` and `projects` collections in sync with explicit dual
/// writes. The writes are not atomic: a failure between them is logged and
/// left as is.
pub struct IssueServiceImpl<I, P> {
    issues: Arc<I>,
    projects: Arc<P>,
    lookup: ProjectLookupImpl<P>,
}

impl<I, P> IssueServiceImpl<I, P> {
    pub fn new(issues: Arc<I>, projects: Arc<P>) -> Self {
        Self {
            issues,
            lookup: ProjectLookupImpl::new(Arc::clone(&projects)),
            projects,
        }
    }
}

impl<I: IssueRepository, P: ProjectRepository> IssueServiceImpl<I, P> {
    async fn find_or_create_project(&self, name: &str) -> Result<ProjectId, IssueError> {
        if let Some(project) = self.lookup.find_project_by_name(name).await? {
            return Ok(project.id);
        }

        let name = name.trim();
        let id = self.projects.insert_one(&NewProject::named(name)).await?;
        tracing::debug!(project = name, %id, "created project");

        Ok(id)
    }

    async fn list(&self, project_name: &str, query: &IssueQuery) -> Result<Vec<Issue>, IssueError> {
        let project = self
            .lookup
            .find_project_by_name(project_name)
            .await?
            .ok_or(IssueError::ProjectNotFound)?;

        if !project.has_issues() {
            return Ok(Vec::new());
        }

        let filter = IssueFilter::from_query(project.issues, query);
        Ok(self.issues.find_many(&filter).await?)
    }

    async fn create(
        &self,
        project_name: &str,
        request: &CreateIssueRequest,
    ) -> Result<Issue, IssueError> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            present(request.issue_title.as_deref()),
            present(request.issue_text.as_deref()),
            present(request.created_by.as_deref()),
        ) else {
            return Err(IssueError::RequiredFieldsMissing);
        };

        let project_id = self.find_or_create_project(project_name).await?;

        let now = OffsetDateTime::now_utc();
        let new_issue = NewIssue {
            project_id,
            issue_title: issue_title.to_string(),
            issue_text: issue_text.to_string(),
            created_by: created_by.to_string(),
            assigned_to: present(request.assigned_to.as_deref())
                .unwrap_or_default()
                .to_string(),
            status_text: present(request.status_text.as_deref())
                .unwrap_or_default()
                .to_string(),
            open: true,
            created_on: now,
            updated_on: now,
        };

        let id = self.issues.insert_one(&new_issue).await?;
        self.projects
            .update_one(project_id, &ProjectUpdate::PushIssue(id))
            .await?;

        self.issues.find_one(id).await?.ok_or_else(|| {
            RepositoryError::Unavailable(format!("issue {id} missing right after insert")).into()
        })
    }

    async fn update(&self, request: &UpdateIssueRequest) -> Result<String, IssueError> {
        let raw_id = request
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(IssueError::MissingId)?;

        let id = raw_id
            .trim()
            .parse::<IssueId>()
            .map_err(|_| IssueError::CouldNotUpdate(raw_id.trim().to_string()))?;

        let mut issue = self
            .issues
            .find_one(id)
            .await?
            .ok_or_else(|| IssueError::CouldNotUpdate(id.to_string()))?;

        if !apply_changes(&mut issue, request) {
            return Err(IssueError::NoUpdateFields(id.to_string()));
        }

        issue.updated_on = OffsetDateTime::now_utc();
        self.issues.update_one(&issue).await?;

        Ok(raw_id.to_string())
    }

    async fn delete(
        &self,
        project_name: &str,
        request: &DeleteIssueRequest,
    ) -> Result<String, IssueError> {
        let raw_id = request
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(IssueError::MissingId)?;

        let id = raw_id
            .trim()
            .parse::<IssueId>()
            .map_err(|_| IssueError::CouldNotDelete(raw_id.trim().to_string()))?;

        if self.issues.find_one(id).await?.is_none() {
            return Err(IssueError::CouldNotDelete(id.to_string()));
        }

        let project = self.lookup.find_project_by_name(project_name).await?;
        if let Some((project_id, issues)) =
            project.and_then(|project| Some((project.id, project.issues_without(id)?)))
        {
            let update = ProjectUpdate::SetIssues {
                issues,
                updated_on: OffsetDateTime::now_utc(),
            };
            if let Err(err) = self.projects.update_one(project_id, &update).await {
                tracing::warn!(%project_id, issue_id = %id, "failed to pull issue from project: {err}");
            }
        }

        let outcome = self.issues.delete_one(id).await?;
        if !outcome.acknowledged() {
            return Err(IssueError::CouldNotDelete(id.to_string()));
        }

        Ok(id.to_string())
    }
}

/// Logs storage failures at the service boundary; other errors are expected
/// outcomes and pass through quietly.
fn log_failure<T>(operation: &str, result: Result<T, IssueError>) -> Result<T, IssueError> {
    if let Err(IssueError::Storage(err)) = &result {
        tracing::error!("{operation} failed: {err:?}");
    }
    result
}

/// A body value counts as supplied when it is a non-empty string.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Overwrites each supplied, non-blank field that differs from `issue`.
///
/// `open` only ever flips the stored flag, and only when the parsed value
/// differs from it.
fn apply_changes(issue: &mut Issue, request: &UpdateIssueRequest) -> bool {
    let mut changed = false;

    for (field, value) in [
        (&mut issue.issue_title, &request.issue_title),
        (&mut issue.issue_text, &request.issue_text),
        (&mut issue.created_by, &request.created_by),
        (&mut issue.assigned_to, &request.assigned_to),
        (&mut issue.status_text, &request.status_text),
    ] {
        if let Some(value) = non_blank(value.as_deref()) {
            if *field != value {
                *field = value;
                changed = true;
            }
        }
    }

    if let Some(open) = non_blank(request.open.as_deref()) {
        if parse_open(&open) != issue.open {
            issue.open = !issue.open;
            changed = true;
        }
    }

    changed
}

#[async_trait]
impl<I: IssueRepository, P: ProjectRepository> IssueService for IssueServiceImpl<I, P> {
    async fn list_issues(
        &self,
        project_name: &str,
        query: &IssueQuery,
    ) -> Result<Vec<Issue>, IssueError> {
        log_failure("list_issues", self.list(project_name, query).await)
    }

    async fn create_issue(
        &self,
        project_name: &str,
        request: &CreateIssueRequest,
    ) -> Result<Issue, IssueError> {
        log_failure("create_issue", self.create(project_name, request).await)
    }

    async fn update_issue(&self, request: &UpdateIssueRequest) -> Result<String, IssueError> {
        log_failure("update_issue", self.update(request).await)
    }

    async fn delete_issue(
        &self,
        project_name: &str,
        request: &DeleteIssueRequest,
    ) -> Result<String, IssueError> {
        log_failure("delete_issue", self.delete(project_name, request).await)
    }
}
