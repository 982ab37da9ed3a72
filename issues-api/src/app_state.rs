use std::sync::Arc;

use crate::domain::ports::inbound::IssueService;

#[derive(Clone)]
pub struct AppState {
    pub issue_service: Arc<dyn IssueService>,
}

impl AppState {
    pub fn new(issue_service: Arc<dyn IssueService>) -> Self {
        Self { issue_service }
    }
}
