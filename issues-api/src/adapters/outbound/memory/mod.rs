//! In-memory repositories for tests.
//!
//! Both repositories share an [`OperationLog`] so tests can assert which store
//! calls a use case made, and can switch the store into a failing mode.

use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Arc, Mutex, RwLock,
};

use async_trait::async_trait;

use crate::domain::{
    models::{
        Issue, IssueFilter, IssueId, NewIssue, NewProject, Project, ProjectId, ProjectUpdate,
    },
    ports::outbound::{DeleteOutcome, IssueRepository, ProjectRepository},
    RepositoryError,
};

#[derive(Clone, Default)]
pub struct OperationLog {
    operations: Arc<Mutex<Vec<&'static str>>>,
    failing: Arc<AtomicBool>,
    failing_operations: Arc<Mutex<Vec<&'static str>>>,
}

#[allow(dead_code)]
impl OperationLog {
    /// Every store call made so far, e.g. `"issues.insert_one"`.
    pub fn operations(&self) -> Vec<&'static str> {
        self.operations.lock().unwrap().clone()
    }

    /// Store calls other than reads.
    pub fn writes(&self) -> Vec<&'static str> {
        self.operations()
            .into_iter()
            .filter(|op| !op.contains(".find_"))
            .collect()
    }

    pub fn clear(&self) {
        self.operations.lock().unwrap().clear();
    }

    /// Make every following store call fail.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Make every following call to `operation` fail, e.g.
    /// `"projects.update_one"`.
    pub fn fail_on(&self, operation: &'static str) {
        self.failing_operations.lock().unwrap().push(operation);
    }

    fn record(&self, operation: &'static str) -> Result<(), RepositoryError> {
        self.operations.lock().unwrap().push(operation);
        if self.failing.load(Ordering::SeqCst)
            || self.failing_operations.lock().unwrap().contains(&operation)
        {
            return Err(RepositoryError::Unavailable(format!("{operation} refused")));
        }
        Ok(())
    }
}

pub struct InMemoryIssueRepository {
    log: OperationLog,
    next_id: AtomicI64,
    ignore_deletes: AtomicBool,
    issues: RwLock<Vec<Issue>>,
}

#[allow(dead_code)]
impl InMemoryIssueRepository {
    pub fn new(log: OperationLog) -> Self {
        Self {
            log,
            next_id: AtomicI64::new(1),
            ignore_deletes: AtomicBool::new(false),
            issues: RwLock::new(Vec::new()),
        }
    }

    /// Make `delete_one` report zero deleted documents and keep the issue.
    pub fn ignore_deletes(&self) {
        self.ignore_deletes.store(true, Ordering::SeqCst);
    }

    /// All stored issues (for test assertions).
    pub fn all_issues(&self) -> Vec<Issue> {
        self.issues.read().unwrap().clone()
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn find_one(&self, id: IssueId) -> Result<Option<Issue>, RepositoryError> {
        self.log.record("issues.find_one")?;
        let issues = self.issues.read().unwrap();
        Ok(issues.iter().find(|issue| issue.id == id).cloned())
    }

    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, RepositoryError> {
        self.log.record("issues.find_many")?;
        let issues = self.issues.read().unwrap();
        Ok(issues
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn insert_one(&self, issue: &NewIssue) -> Result<IssueId, RepositoryError> {
        self.log.record("issues.insert_one")?;
        let id = IssueId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.issues.write().unwrap().push(issue.clone().with_id(id));
        Ok(id)
    }

    async fn update_one(&self, issue: &Issue) -> Result<(), RepositoryError> {
        self.log.record("issues.update_one")?;
        let mut issues = self.issues.write().unwrap();
        if let Some(stored) = issues.iter_mut().find(|stored| stored.id == issue.id) {
            *stored = Issue {
                project_id: stored.project_id,
                created_on: stored.created_on,
                ..issue.clone()
            };
        }
        Ok(())
    }

    async fn delete_one(&self, id: IssueId) -> Result<DeleteOutcome, RepositoryError> {
        self.log.record("issues.delete_one")?;
        if self.ignore_deletes.load(Ordering::SeqCst) {
            return Ok(DeleteOutcome { deleted_count: 0 });
        }
        let mut issues = self.issues.write().unwrap();
        let before = issues.len();
        issues.retain(|issue| issue.id != id);
        Ok(DeleteOutcome {
            deleted_count: (before - issues.len()) as u64,
        })
    }
}

pub struct InMemoryProjectRepository {
    log: OperationLog,
    next_id: AtomicI64,
    projects: RwLock<Vec<Project>>,
}

#[allow(dead_code)]
impl InMemoryProjectRepository {
    pub fn new(log: OperationLog) -> Self {
        Self {
            log,
            next_id: AtomicI64::new(1),
            projects: RwLock::new(Vec::new()),
        }
    }

    /// All stored projects (for test assertions).
    pub fn all_projects(&self) -> Vec<Project> {
        self.projects.read().unwrap().clone()
    }

    pub fn by_name(&self, name: &str) -> Option<Project> {
        self.all_projects()
            .into_iter()
            .find(|project| project.name == name)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_one(&self, name: &str) -> Result<Option<Project>, RepositoryError> {
        self.log.record("projects.find_one")?;
        let projects = self.projects.read().unwrap();
        Ok(projects.iter().find(|project| project.name == name).cloned())
    }

    async fn insert_one(&self, project: &NewProject) -> Result<ProjectId, RepositoryError> {
        self.log.record("projects.insert_one")?;
        let id = ProjectId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.projects.write().unwrap().push(Project {
            id,
            name: project.name.clone(),
            issues: Vec::new(),
            created_on: project.created_on,
            updated_on: project.updated_on,
        });
        Ok(id)
    }

    async fn update_one(
        &self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<(), RepositoryError> {
        self.log.record("projects.update_one")?;
        let mut projects = self.projects.write().unwrap();
        let Some(project) = projects.iter_mut().find(|project| project.id == id) else {
            return Ok(());
        };

        match update {
            ProjectUpdate::PushIssue(issue_id) => project.issues.push(*issue_id),
            ProjectUpdate::SetIssues { issues, updated_on } => {
                project.issues = issues.clone();
                project.updated_on = *updated_on;
            }
        }
        Ok(())
    }
}
