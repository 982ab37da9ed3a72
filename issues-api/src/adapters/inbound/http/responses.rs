//! JSON payloads for the issue endpoints.
//!
//! Outcomes are reported in the body, not the status line: every response
//! here is `200 OK`, and clients branch on `error`, `result` or `status`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::IssueError;

/// Acknowledgement for a successful update or delete.
#[derive(Debug, Serialize)]
pub struct IssueAck {
    pub result: &'static str,
    #[serde(rename = "_id")]
    pub id: String,
}

impl IssueAck {
    pub fn updated(id: String) -> Self {
        Self {
            result: "successfully updated",
            id,
        }
    }

    pub fn deleted(id: String) -> Self {
        Self {
            result: "successfully deleted",
            id,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

/// Marker payload for lookups and failures that carry no message.
#[derive(Debug, Serialize)]
struct StatusBody {
    status: u16,
}

impl IntoResponse for IssueError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidProjectName | Self::InvalidQuery(_) => Some(StatusCode::BAD_REQUEST),
            Self::ProjectNotFound => Some(StatusCode::NOT_FOUND),
            Self::Storage(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            _ => None,
        };

        match status {
            Some(status) => Json(StatusBody {
                status: status.as_u16(),
            })
            .into_response(),
            None => Json(ErrorBody {
                error: self.to_string(),
                id: self.issue_id().map(str::to_string),
            })
            .into_response(),
        }
    }
}
