//! `POST /api/grid`: answer the page's question in Grid's voice.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{AppState, SharedState, loose_text, parse_body, require_page_id, respond};
use crate::config::Sampling;
use crate::consts::fields;
use crate::error::HandlerError;
use crate::prompts::grid::build_grid_prompt;

pub const SAMPLING: Sampling = Sampling::new(0.6, 700);
const NO_REPLY: &str = "(no reply)";

#[derive(Debug, Default, Deserialize)]
pub struct GridRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub question: Option<String>,
    #[serde(default)]
    pub grid_system_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GridResponse {
    pub ok: bool,
    pub page_id: String,
    pub reply: String,
}

pub async fn handle(State(state): State<SharedState>, method: Method, body: Bytes) -> Response {
    respond("grid", run(&state, &method, &body).await)
}

pub async fn run(
    state: &AppState,
    method: &Method,
    body: &[u8],
) -> Result<GridResponse, HandlerError> {
    let req: GridRequest = parse_body(method, body)?;
    let page_id = require_page_id(req.page_id.as_deref())?;
    info!(page_id, "grid request");

    let question = state
        .resolve(page_id, req.question.as_deref(), fields::USER_QUESTION)
        .await?;
    if question.trim().is_empty() {
        return Err(HandlerError::BadRequest(
            "No User Question found on page and none provided".to_string(),
        ));
    }

    let prompt = build_grid_prompt(&question, req.grid_system_prompt.as_deref());
    let mut reply = state
        .generate(prompt, req.model.as_deref(), SAMPLING)
        .await?;
    if reply.is_empty() {
        reply = NO_REPLY.to_string();
    }

    state
        .store
        .write_text_field(page_id, fields::GRID_REPLY, &reply)
        .await?;
    state.mark_done(page_id).await?;

    Ok(GridResponse {
        ok: true,
        page_id: page_id.to_string(),
        reply,
    })
}
