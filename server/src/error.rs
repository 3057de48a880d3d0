//! HTTP error mapping and the terminal panic handler.
//!
//! # Design
//! Every failure a handler can produce is an `AppError`, which renders as
//! `{"error": <category>, "message": <detail>}` with the matching status.
//! Absence from the service arrives as `None`/`false` and is turned into
//! `NotFound` here rather than inside the service. Anything the handlers do
//! not anticipate (a panic) is caught by `CatchPanicLayer` and answered by
//! [`handle_panic`] with the generic 500 body.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::ValidationError;

pub const DEFAULT_ERROR_NAME: &str = "Internal Server Error";
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// A field broke one of the todo rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body was JSON but a field had the wrong type or was `null`, or
    /// it was not sent as JSON at all.
    #[error("{0}")]
    InvalidBody(String),

    /// The body was not parseable JSON.
    #[error("{0}")]
    MalformedJson(String),

    #[error("Todo with id {id} not found")]
    NotFound { id: String },

    #[error("Route {method} {path} not found")]
    RouteNotFound { method: String, path: String },
}

impl AppError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) | Self::MalformedJson(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Category reported in the `error` field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) => ValidationError::CATEGORY,
            Self::MalformedJson(_) => "Bad Request",
            Self::NotFound { .. } | Self::RouteNotFound { .. } => "Not Found",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => Self::InvalidBody(err.body_text()),
            JsonRejection::MissingJsonContentType(err) => Self::InvalidBody(err.body_text()),
            other => Self::MalformedJson(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        let body = ErrorBody {
            error: self.name().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Last-resort responder for `CatchPanicLayer`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        DEFAULT_ERROR_MESSAGE.to_string()
    };
    tracing::error!(panic = %message, "request handler panicked");

    let body = ErrorBody {
        error: DEFAULT_ERROR_NAME.to_string(),
        message,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
