use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum HomepageError {
    #[error("Database error: {0}")]
    Storage(#[from] SqlxError),

    #[error("Invalid username or password")]
    Authentication,

    #[error("{0}")]
    Validation(String),

    #[error("Admin login required")]
    Unauthorized,

    #[error("Listing scrape failed: {0}")]
    Scrape(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] argon2::Error),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl HomepageError {
    pub fn validation(msg: impl Into<String>) -> Self {
        HomepageError::Validation(msg.into())
    }

    /// Failures of the external listing source; never fatal.
    pub fn is_scrape(&self) -> bool {
        matches!(
            self,
            HomepageError::Scrape(_) | HomepageError::Reqwest(_) | HomepageError::UrlParse(_)
        )
    }
}

impl IntoResponse for HomepageError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            HomepageError::Storage(_)
            | HomepageError::PasswordHash(_)
            | HomepageError::Join(_)
            | HomepageError::Session(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal error occurred. Please try again.".to_string(),
                };
                (status, body)
            }
            HomepageError::Authentication => {
                let status = StatusCode::UNAUTHORIZED;
                let body = ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Invalid username or password.".to_string(),
                };
                (status, body)
            }
            HomepageError::Unauthorized => {
                let status = StatusCode::FORBIDDEN;
                let body = ApiErrorBody {
                    code: "FORBIDDEN".to_string(),
                    message: "Admin login required.".to_string(),
                };
                (status, body)
            }
            HomepageError::Validation(msg) => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorBody {
                    code: "VALIDATION".to_string(),
                    message: msg,
                };
                (status, body)
            }
            HomepageError::Scrape(_) | HomepageError::Reqwest(_) | HomepageError::UrlParse(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "Listing source is unavailable.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
