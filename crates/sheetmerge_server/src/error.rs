use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sheetmerge_io_xlsx::MergeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid multipart form: {0}")]
    InvalidForm(String),

    #[error("no files uploaded")]
    NoFiles,

    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("invalid input pattern: {0}")]
    InvalidPattern(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Status code and public body text for this error.
    pub fn status_and_body(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidForm(_) => (StatusCode::BAD_REQUEST, "Failed to parse form"),
            Self::NoFiles => (StatusCode::BAD_REQUEST, "No files uploaded"),
            Self::Merge(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to write merged file",
            ),
            Self::InvalidPattern(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }
        (status, body).into_response()
    }
}
