use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::play::models::PlayError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Play error: {0}")]
    Play(#[from] PlayError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied")]
    AccessDenied,

    #[error("Api error: {0} - {1}")]
    Api(StatusCode, String),

    #[error("Failed to verify token: {0}")]
    JwtVerification(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Sqlx(e) => {
                error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
            ServerError::Json(e) => {
                warn!("Failed to (de)serialize payload: {}", e);
                (StatusCode::BAD_REQUEST, "Malformed payload").into_response()
            }
            ServerError::Http(e) => {
                error!("Outgoing request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
            ServerError::Play(e) => {
                debug!("Play error: {}", e);
                let status = match e {
                    PlayError::QuizUnavailable(_) | PlayError::UnknownSession(_) => {
                        StatusCode::NOT_FOUND
                    }
                };
                (status, e.to_string()).into_response()
            }
            ServerError::NotFound(msg) => {
                debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg).into_response()
            }
            ServerError::AccessDenied => {
                warn!("Access denied");
                (StatusCode::FORBIDDEN, "Access denied").into_response()
            }
            ServerError::Api(status, msg) => {
                warn!("Api error: {} - {}", status, msg);
                (status, msg).into_response()
            }
            ServerError::JwtVerification(msg) => {
                warn!("Failed to verify token: {}", msg);
                (StatusCode::UNAUTHORIZED, "Invalid token").into_response()
            }
            ServerError::Validation(msg) => {
                debug!("Rejected input: {}", msg);
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ServerError::Internal(msg) => {
                error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
