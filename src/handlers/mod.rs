//! Request handlers. Each one reads a page, prompts the model, writes the
//! result back, and answers with the `{ok, page_id, ...}` envelope.
//!
//! Every collaborator call is awaited in turn; a request never fans out.

pub mod grid;
pub mod recap;
pub mod social;

use std::sync::Arc;

use axum::Json;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::config::{Config, Sampling};
use crate::consts::{STATUS_DONE, STATUS_FIELD};
use crate::error::HandlerError;
use crate::generator::{CompletionRequest, Generator};
use crate::prompts::Prompt;
use crate::store::RecordStore;

/// What every handler gets: configuration and the two collaborators.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub generator: Arc<dyn Generator>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, store: Arc<dyn RecordStore>, generator: Arc<dyn Generator>) -> Self {
        Self {
            config,
            store,
            generator,
        }
    }

    /// Request body value if given, else the page's field, else empty.
    pub(crate) async fn resolve(
        &self,
        page_id: &str,
        provided: Option<&str>,
        field: &str,
    ) -> Result<String, HandlerError> {
        if let Some(value) = provided.filter(|v| !v.is_empty()) {
            return Ok(value.to_string());
        }
        Ok(self
            .store
            .read_field(page_id, field)
            .await?
            .unwrap_or_default())
    }

    /// One completion, trimmed.
    pub(crate) async fn generate(
        &self,
        prompt: Prompt,
        requested_model: Option<&str>,
        base: Sampling,
    ) -> Result<String, HandlerError> {
        let request = CompletionRequest {
            system: prompt.system,
            user: prompt.user,
            model: self.config.model_for(requested_model),
            sampling: self.config.sampling(base),
        };
        let reply = self.generator.complete(&request).await?;
        Ok(reply.trim().to_string())
    }

    pub(crate) async fn mark_done(&self, page_id: &str) -> Result<(), HandlerError> {
        self.store
            .set_choice_field(page_id, STATUS_FIELD, STATUS_DONE)
            .await?;
        Ok(())
    }
}

/// Only POST is served. An empty body reads as `{}`.
pub(crate) fn parse_body<T>(method: &Method, body: &[u8]) -> Result<T, HandlerError>
where
    T: DeserializeOwned + Default,
{
    if *method != Method::POST {
        return Err(HandlerError::MethodNotAllowed);
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| HandlerError::BadRequest(format!("Invalid JSON body: {e}")))
}

pub(crate) fn require_page_id(page_id: Option<&str>) -> Result<&str, HandlerError> {
    match page_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(HandlerError::BadRequest("Missing page_id".to_string())),
    }
}

/// Turn a handler outcome into the HTTP response, logging failures.
pub(crate) fn respond<T: Serialize>(endpoint: &str, result: Result<T, HandlerError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            match e.status() {
                StatusCode::INTERNAL_SERVER_ERROR => error!(endpoint, error = %e, "request failed"),
                status => warn!(endpoint, %status, error = %e, "request rejected"),
            }
            e.into_response()
        }
    }
}

/// Accept strings as-is and render numbers or booleans as text, so a
/// caller can send `"week": 3`.
pub(crate) fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
