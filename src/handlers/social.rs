//! `POST /api/recap-social`: turn a recap into five platform posts.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AppState, SharedState, loose_text, parse_body, require_page_id, respond};
use crate::config::Sampling;
use crate::consts::fields;
use crate::error::HandlerError;
use crate::prompts::social::build_social_prompt;
use crate::splitter::{Platform, split_sections, truncate_for_x};

pub const SAMPLING: Sampling = Sampling::new(0.7, 700);

#[derive(Debug, Default, Deserialize)]
pub struct SocialRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub page_id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub recap: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub hashtags: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub cta: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialResponse {
    pub ok: bool,
    #[serde(rename = "page_id")]
    pub page_id: String,
    pub x_post: String,
    pub ig_caption: String,
    pub yt_desc: String,
    pub facebook: String,
    pub tiktok: String,
    pub lean: bool,
}

/// The page field each platform's post lands in.
pub fn field_for(platform: Platform) -> &'static str {
    match platform {
        Platform::X => fields::X_POST,
        Platform::Instagram => fields::IG_CAPTION,
        Platform::YouTube => fields::YT_DESCRIPTION,
        Platform::Facebook => fields::FACEBOOK_POST,
        Platform::TikTok => fields::TIKTOK_CAPTION,
    }
}

pub async fn handle(State(state): State<SharedState>, method: Method, body: Bytes) -> Response {
    respond("recap-social", run(&state, &method, &body).await)
}

pub async fn run(
    state: &AppState,
    method: &Method,
    body: &[u8],
) -> Result<SocialResponse, HandlerError> {
    let req: SocialRequest = parse_body(method, body)?;
    let page_id = require_page_id(req.page_id.as_deref())?;
    info!(page_id, lean = state.config.lean, "recap-social request");

    let recap = state
        .resolve(page_id, req.recap.as_deref(), fields::RECAP)
        .await?;
    if recap.trim().is_empty() {
        return Err(HandlerError::BadRequest(
            "No recap found. Generate with /api/recap first or pass recap in body.".to_string(),
        ));
    }
    let hashtags = state
        .resolve(page_id, req.hashtags.as_deref(), fields::HASHTAGS)
        .await?;
    let cta = state
        .resolve(page_id, req.cta.as_deref(), fields::CTA)
        .await?;

    let prompt = build_social_prompt(&recap, &hashtags, &cta, req.system_prompt.as_deref());
    let raw = state
        .generate(prompt, req.model.as_deref(), SAMPLING)
        .await?;

    let mut sections = split_sections(&raw);
    sections.x_post = truncate_for_x(&sections.x_post);

    for platform in Platform::ALL {
        let text = sections.get(platform);
        if text.is_empty() {
            debug!(page_id, ?platform, "section missing, leaving field alone");
            continue;
        }
        state
            .store
            .write_text_field(page_id, field_for(platform), text)
            .await?;
    }
    state.mark_done(page_id).await?;

    Ok(SocialResponse {
        ok: true,
        page_id: page_id.to_string(),
        x_post: sections.x_post,
        ig_caption: sections.ig_caption,
        yt_desc: sections.yt_description,
        facebook: sections.facebook,
        tiktok: sections.tiktok,
        lean: state.config.lean,
    })
}
