//! `POST /api/recap`: write the weekly Last Squad Standing recap.

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
use crate::prompts::recap::{RecapInputs, build_recap_prompt};

pub const SAMPLING: Sampling = Sampling::new(0.65, 500);
const NO_RECAP: &str = "(no recap)";

#[derive(Debug, Default, Deserialize)]
pub struct RecapRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub week: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub biggest_upset: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub eliminated: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub alive: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub notes: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecapResponse {
    pub ok: bool,
    pub page_id: String,
    pub recap: String,
}

pub async fn handle(State(state): State<SharedState>, method: Method, body: Bytes) -> Response {
    respond("recap", run(&state, &method, &body).await)
}

pub async fn run(
    state: &AppState,
    method: &Method,
    body: &[u8],
) -> Result<RecapResponse, HandlerError> {
    let req: RecapRequest = parse_body(method, body)?;
    let page_id = require_page_id(req.page_id.as_deref())?;
    info!(page_id, "recap request");

    let inputs = RecapInputs {
        week: state.resolve(page_id, req.week.as_deref(), fields::WEEK).await?,
        summary: state
            .resolve(page_id, req.summary.as_deref(), fields::STANDINGS_SUMMARY)
            .await?,
        biggest_upset: state
            .resolve(page_id, req.biggest_upset.as_deref(), fields::BIGGEST_UPSET)
            .await?,
        eliminated: state
            .resolve(page_id, req.eliminated.as_deref(), fields::ELIMINATED)
            .await?,
        alive: state
            .resolve(page_id, req.alive.as_deref(), fields::STILL_ALIVE)
            .await?,
        notes: state.resolve(page_id, req.notes.as_deref(), fields::NOTES).await?,
    };

    let prompt = build_recap_prompt(&inputs, req.system_prompt.as_deref());
    let mut recap = state
        .generate(prompt, req.model.as_deref(), SAMPLING)
        .await?;
    if recap.is_empty() {
        recap = NO_RECAP.to_string();
    }

    state
        .store
        .write_text_field(page_id, fields::RECAP, &recap)
        .await?;
    state.mark_done(page_id).await?;

    Ok(RecapResponse {
        ok: true,
        page_id: page_id.to_string(),
        recap,
    })
}
