use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

extern crate log;

pub type Result<T> = core::result::Result<T, Error>;

/// Web-layer error. The kinds mirror the service's tiny failure taxonomy:
/// rejected client input, or an unexpected internal fault. Transport
/// interruptions never surface here - a disconnected stream is simply
/// dropped by axum.
#[derive(Debug)]
pub struct Error {
    pub error_kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// Missing or malformed client input, reported as a 400 with a fixed
    /// JSON body and no side effects.
    Invalid,
    Internal,
}

impl Error {
    pub fn invalid(message: &str) -> Self {
        Self {
            error_kind: ErrorKind::Invalid,
            message: message.to_string(),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            error_kind: ErrorKind::Internal,
            message: message.to_string(),
        }
    }
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.error_kind {
            ErrorKind::Invalid => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": self.message})),
            )
                .into_response(),
            ErrorKind::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
        }
    }
}
