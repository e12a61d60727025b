use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Coarse classification of a failure, used for logging and fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable or non-2xx response
    Transport,
    /// Body was not valid JSON or did not have the expected shape
    Parse,
    /// Persisted storage could not be read or written
    Storage,
    Other,
}

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::HttpClient(e) if e.is_decode() => FailureKind::Parse,
            AppError::HttpClient(_) | AppError::ExternalApi(_) => FailureKind::Transport,
            AppError::Parse(_) => FailureKind::Parse,
            AppError::Storage(_) | AppError::Redis(_) | AppError::Io(_) => FailureKind::Storage,
            AppError::Template(_) | AppError::InvalidInput(_) => FailureKind::Other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage(_)
            | AppError::Redis(_)
            | AppError::Io(_)
            | AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) | AppError::Parse(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
