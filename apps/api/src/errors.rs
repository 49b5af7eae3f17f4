use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The body is always `{"error": "<message>"}`, the shape the client reads back.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is missing or blank. Never retried.
    #[error("{0}")]
    InvalidInput(String),

    /// The body was refused before parsing, e.g. wrong content type or over
    /// the size limit. Keeps the rejection's own status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The generation call failed or produced unusable output.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: LlmError,
    },
}

impl AppError {
    pub fn upstream(context: &'static str) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Upstream { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                AppError::InvalidInput(rejection.body_text())
            }
            _ => AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidInput(msg) | AppError::Rejected { message: msg, .. } => msg.clone(),
            AppError::Upstream { source, .. } => {
                tracing::error!("{self}");
                source.to_string()
            }
        };

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
