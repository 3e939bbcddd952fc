use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checklist_core::ChecklistError;

// ---------------------------------------------------------------------------
// Internal sentinels for explicit statuses
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 404 through the `anyhow::Error` chain.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

/// Carries an explicit HTTP 400 for request-shape problems.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<NotFoundError>().is_some() {
            return StatusCode::NOT_FOUND;
        }
        if self.0.downcast_ref::<BadRequestError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        let Some(e) = self.0.downcast_ref::<ChecklistError>() else {
            return StatusCode::INTERNAL_SERVER_ERROR;
        };
        match e {
            ChecklistError::InvalidIdentity(_)
            | ChecklistError::NoIdentity
            | ChecklistError::RemoteNotConfigured => StatusCode::BAD_REQUEST,
            ChecklistError::InvalidDocument(_) | ChecklistError::RemoteMalformed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ChecklistError::NotReady => StatusCode::CONFLICT,
            ChecklistError::RemoteUnavailable(_) | ChecklistError::RemoteBackend { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ChecklistError::RecordDb(_)
            | ChecklistError::HomeNotFound
            | ChecklistError::Io(_)
            | ChecklistError::Yaml(_)
            | ChecklistError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:#}", self.0);
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
