//! HTTP error mapping to RFC-9457 Problem Details

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::contract::SettingsError;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: SettingsError) -> Problem {
    let detail = error.to_string();
    match error {
        SettingsError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Module Not Found").with_detail(detail)
        }
        SettingsError::PathNotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Setting Not Found").with_detail(detail)
        }
        SettingsError::TypeMismatch { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Type Mismatch").with_detail(detail)
        }
        SettingsError::OutOfRange { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Out Of Range").with_detail(detail)
        }
        SettingsError::UnknownChoice { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Unknown Choice").with_detail(detail)
        }
        SettingsError::UnsupportedKind { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Unsupported Value Type").with_detail(detail)
        }
        SettingsError::DuplicateEntry { .. } => {
            Problem::new(StatusCode::CONFLICT, "Duplicate Entry").with_detail(detail)
        }
        SettingsError::DuplicateModule { .. } => {
            Problem::new(StatusCode::CONFLICT, "Module Already Registered").with_detail(detail)
        }
        SettingsError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}
