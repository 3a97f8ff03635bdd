use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::{header, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::application::pipeline::PipelineError;
use crate::domain::{Error, ErrorKind, Outcome, ValidationErrors};

const VALIDATION_DETAIL: &str = "One or more validation errors occurred.";
const INTERNAL_DETAIL: &str = "An unexpected error occurred.";

/// Failure categories surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(anyhow::Error),
}

/// Problem response body. Field names are part of the client contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Validation Error",
            ApiError::NotFound(_) => "Not Found",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Forbidden(_) => "Forbidden",
            ApiError::Conflict(_) => "Conflict",
            ApiError::Internal(_) => "Server Error",
        }
    }

    /// Client-facing body. Internal errors are reduced to a generic detail.
    pub fn problem(&self) -> ProblemDetails {
        let (detail, errors) = match self {
            ApiError::Validation(errors) => {
                (VALIDATION_DETAIL.to_string(), Some(errors.fields().clone()))
            }
            ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg) => (msg.clone(), None),
            ApiError::Internal(_) => (INTERNAL_DETAIL.to_string(), None),
        };

        ProblemDetails {
            status: self.status().as_u16(),
            title: self.title().to_string(),
            detail: Some(detail),
            errors,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "Validation error: {}", errors),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!("Unhandled error reached the HTTP boundary: {:#}", err);
        }

        (
            self.status(),
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self.problem()),
        )
            .into_response()
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self.into_result() {
            Ok(value) => (StatusCode::OK, Json(value)).into_response(),
            Err(err) => ApiError::from(err).into_response(),
        }
    }
}

// Convert from domain errors
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::Validation(std::iter::once(err).collect()),
            ErrorKind::NotFound => ApiError::NotFound(err.message().to_string()),
            ErrorKind::Unauthorized => ApiError::Unauthorized(err.message().to_string()),
            ErrorKind::Forbidden => ApiError::Forbidden(err.message().to_string()),
            ErrorKind::Conflict => ApiError::Conflict(err.message().to_string()),
            ErrorKind::None | ErrorKind::NullValue | ErrorKind::Unexpected => {
                ApiError::Internal(anyhow::Error::new(err))
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Invalid(errors) => ApiError::Validation(errors),
            PipelineError::Unhandled(name) => {
                ApiError::Internal(anyhow::anyhow!("No handler registered for request {}", name))
            }
            PipelineError::Unexpected(e) => ApiError::Internal(e),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
