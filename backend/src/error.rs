use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::api::ApiErrorBody;
use log::error;

/// Error type of every handler.
///
/// Implements [`ResponseError`] so handlers can return `Result<_, ApiError>`
/// and use `?`; the body is always an [`ApiErrorBody`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The posted record broke the registration rules. Maps field path to
    /// message.
    #[error("The registration is invalid")]
    Validation(BTreeMap<String, String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("Registration {0} not found")]
    NotFound(String),

    #[error("Staff {0} is already registered")]
    Conflict(String),

    #[error("The photo exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, fields) = match self {
            ApiError::Validation(fields) => (self.to_string(), fields.clone()),
            ApiError::Database(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                error!("{}", self);
                ("An internal error occurred".to_string(), BTreeMap::new())
            }
            _ => (self.to_string(), BTreeMap::new()),
        };

        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: message,
            code: self.code().to_string(),
            fields,
        })
    }
}
