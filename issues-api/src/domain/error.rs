use thiserror::Error;

/// Failures raised by the storage adapters.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during issue operations.
///
/// The display strings are the messages clients receive.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("invalid project name")]
    InvalidProjectName,
    #[error("project not found")]
    ProjectNotFound,
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error("required field(s) missing")]
    RequiredFieldsMissing,
    #[error("missing _id")]
    MissingId,
    #[error("could not update")]
    CouldNotUpdate(String),
    #[error("no update field(s) sent")]
    NoUpdateFields(String),
    #[error("could not delete")]
    CouldNotDelete(String),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl IssueError {
    /// The offending `_id`, for errors that report one.
    pub fn issue_id(&self) -> Option<&str> {
        match self {
            Self::CouldNotUpdate(id) | Self::NoUpdateFields(id) | Self::CouldNotDelete(id) => {
                Some(id)
            }
            _ => None,
        }
    }
}
