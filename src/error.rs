//! Error taxonomy shared by the collaborators and the handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Startup configuration problems. Fatal: the server never binds.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing {0}")]
    MissingCredential(&'static str),
}

/// Failures talking to the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record has no field with this name. Only raised by writes.
    #[error("Property \"{field}\" not found on page")]
    NotFound { field: String },
    #[error("Notion API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Notion request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport(e.to_string())
    }
}

/// Failures talking to the generation service. Never retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("OpenAI API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("OpenAI request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.to_string())
    }
}

/// Everything a handler can fail with, mapped onto the `{ok:false}` envelope.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::Store(_) | HandlerError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "ok": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}
