use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{IssueAck, IssueBody},
    app_state::AppState,
    domain::{models::IssueQuery, IssueError},
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/:project",
        get(list_issues)
            .post(create_issue)
            .put(update_issue)
            .delete(delete_issue),
    )
}

#[instrument(name = "GET /api/issues/:project", skip(app_state, query))]
async fn list_issues(
    State(app_state): State<AppState>,
    Path(project): Path<String>,
    query: Result<Query<IssueQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("rejected query string: {}", rejection.body_text());
            return IssueError::InvalidQuery(rejection.body_text()).into_response();
        }
    };

    match app_state.issue_service.list_issues(&project, &query).await {
        Ok(issues) => Json(issues).into_response(),
        Err(err) => err.into_response(),
    }
}

#[instrument(name = "POST /api/issues/:project", skip(app_state, body))]
async fn create_issue(
    State(app_state): State<AppState>,
    Path(project): Path<String>,
    body: IssueBody,
) -> Response {
    match app_state
        .issue_service
        .create_issue(&project, &body.into())
        .await
    {
        Ok(issue) => Json(issue).into_response(),
        Err(err) => err.into_response(),
    }
}

#[instrument(
    name = "PUT /api/issues/:project",
    skip(app_state, body),
    fields(issue_id = ?body.id)
)]
async fn update_issue(
    State(app_state): State<AppState>,
    Path(project): Path<String>,
    body: IssueBody,
) -> Response {
    match app_state.issue_service.update_issue(&body.into()).await {
        Ok(id) => Json(IssueAck::updated(id)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[instrument(
    name = "DELETE /api/issues/:project",
    skip(app_state, body),
    fields(issue_id = ?body.id)
)]
async fn delete_issue(
    State(app_state): State<AppState>,
    Path(project): Path<String>,
    body: IssueBody,
) -> Response {
    match app_state
        .issue_service
        .delete_issue(&project, &body.into())
        .await
    {
        Ok(id) => Json(IssueAck::deleted(id)).into_response(),
        Err(err) => err.into_response(),
    }
}
