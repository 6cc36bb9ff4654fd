//! Process-wide configuration, built once at startup.
//!
//! Handlers and collaborators receive a [`Config`] (or the pieces they need)
//! explicitly; nothing below `main` reads the environment.

use crate::consts::DEFAULT_MODEL;
use crate::error::ConfigError;

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Sampling {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    /// The lean-mode variant: 0.1 cooler and 60% of the token budget.
    pub fn lean(self) -> Self {
        let temperature = ((self.temperature - 0.1) * 100.0).round() / 100.0;
        Self {
            temperature: temperature.max(0.0),
            max_tokens: self.max_tokens * 3 / 5,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    openai_api_key: String,
    notion_secret: String,
    pub default_model: String,
    pub lean: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"[REDACTED]")
            .field("notion_secret", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("lean", &self.lean)
            .finish()
    }
}

impl Config {
    /// Validate credentials and fill in defaults.
    ///
    /// Blank credentials count as missing.
    pub fn new(
        openai_api_key: Option<String>,
        notion_secret: Option<String>,
        default_model: Option<String>,
        lean: bool,
    ) -> Result<Self, ConfigError> {
        let openai_api_key = non_blank(openai_api_key)
            .ok_or(ConfigError::MissingCredential("OPENAI_API_KEY"))?;
        let notion_secret =
            non_blank(notion_secret).ok_or(ConfigError::MissingCredential("NOTION_SECRET"))?;
        let default_model = non_blank(default_model).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            openai_api_key,
            notion_secret,
            default_model,
            lean,
        })
    }

    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    pub fn notion_secret(&self) -> &str {
        &self.notion_secret
    }

    /// Sampling for an endpoint, lowered when lean mode is on.
    pub fn sampling(&self, base: Sampling) -> Sampling {
        if self.lean { base.lean() } else { base }
    }

    /// Model for one request: the caller's choice if given, else the default.
    pub fn model_for(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(model) if !model.is_empty() => model.to_string(),
            _ => self.default_model.clone(),
        }
    }
}

/// `LEAN_MODE` is on only for a case-insensitive `true`.
pub fn parse_lean(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
