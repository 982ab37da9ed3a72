//! Composition root: the only place that names concrete outbound adapters.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{PostgresIssueRepository, PostgresProjectRepository},
    app_state::AppState,
    domain::services::IssueServiceImpl,
};

/// Wire the issue service to Postgres-backed repositories sharing `pool`.
pub fn postgres_app_state(pool: PgPool) -> AppState {
    let issues = Arc::new(PostgresIssueRepository::new(pool.clone()));
    let projects = Arc::new(PostgresProjectRepository::new(pool));

    AppState::new(Arc::new(IssueServiceImpl::new(issues, projects)))
}
