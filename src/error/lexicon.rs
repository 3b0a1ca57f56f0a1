use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lexicon_schema::FailureBody;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LexiconError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request was understood but a field failed validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl LexiconError {
    pub fn status(&self) -> StatusCode {
        match self {
            LexiconError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LexiconError::NotFound(_) => StatusCode::NOT_FOUND,
            LexiconError::DatabaseError(_)
            | LexiconError::IoError(_)
            | LexiconError::RactorError(_)
            | LexiconError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for LexiconError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(e) => {
                LexiconError::UnexpectedError(format!("Failed to read request body: {e}"))
            }
            other => LexiconError::InvalidRequest(other.body_text()),
        }
    }
}

impl IntoResponse for LexiconError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            LexiconError::InvalidRequest(reason) => {
                tracing::warn!(status = %status, reason = %reason, "Request rejected");
                FailureBody::new(Some(reason.clone()))
            }
            LexiconError::NotFound(what) => {
                tracing::warn!(status = %status, what = %what, "Record not found");
                FailureBody::new(None)
            }
            _ => {
                tracing::error!(status = %status, error = %self, "Request failed");
                FailureBody::new(None)
            }
        };
        (status, Json(body)).into_response()
    }
}
