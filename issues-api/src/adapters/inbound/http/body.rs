use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::{Deserialize, Deserializer};

use crate::domain::models::{CreateIssueRequest, DeleteIssueRequest, UpdateIssueRequest};

/// Request body shared by the issue endpoints.
///
/// Accepts JSON or `application/x-www-form-urlencoded`. A body that is
/// missing or cannot be read is treated as empty, so handlers always see the
/// same "missing field" outcomes regardless of how the client encoded it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IssueBody {
    #[serde(rename = "_id", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub issue_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub issue_text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_by: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub assigned_to: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status_text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub open: Option<String>,
}

impl From<IssueBody> for CreateIssueRequest {
    fn from(body: IssueBody) -> Self {
        Self {
            issue_title: body.issue_title,
            issue_text: body.issue_text,
            created_by: body.created_by,
            assigned_to: body.assigned_to,
            status_text: body.status_text,
        }
    }
}

impl From<IssueBody> for UpdateIssueRequest {
    fn from(body: IssueBody) -> Self {
        Self {
            id: body.id,
            issue_title: body.issue_title,
            issue_text: body.issue_text,
            created_by: body.created_by,
            assigned_to: body.assigned_to,
            status_text: body.status_text,
            open: body.open,
        }
    }
}

impl From<IssueBody> for DeleteIssueRequest {
    fn from(body: IssueBody) -> Self {
        Self { id: body.id }
    }
}

/// Reads a scalar as a string: `true` becomes `"true"`, `3` becomes `"3"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Flag(bool),
        Number(serde_json::Number),
    }

    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(text) => text,
            Scalar::Flag(flag) => flag.to_string(),
            Scalar::Number(number) => number.to_string(),
        }),
    )
}

#[async_trait]
impl<S> FromRequest<S> for IssueBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let body = if is_form {
            Form::<IssueBody>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| rejection.body_text())
        } else {
            // serde's derived struct visitor also accepts sequences, so only
            // objects are read as field maps
            Json::<serde_json::Value>::from_request(req, state)
                .await
                .map_err(|rejection| rejection.body_text())
                .and_then(|Json(value)| match value {
                    serde_json::Value::Object(_) => {
                        serde_json::from_value::<IssueBody>(value).map_err(|err| err.to_string())
                    }
                    other => Err(format!("expected a JSON object, got {other}")),
                })
        };

        Ok(body.unwrap_or_else(|rejection| {
            tracing::debug!("treating unreadable body as empty: {rejection}");
            Self::default()
        }))
    }
}
