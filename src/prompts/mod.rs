pub mod grid;
pub mod recap;
pub mod social;

/// The two instructions one generation call needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Caller-supplied system text wins over the built-in one unless it is blank.
pub(crate) fn system_or(override_text: Option<&str>, default: &str) -> String {
    match override_text {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_default() {
        assert_eq!(system_or(Some("custom"), "default"), "custom");
    }

    #[test]
    fn blank_override_is_ignored() {
        assert_eq!(system_or(Some("   "), "default"), "default");
        assert_eq!(system_or(None, "default"), "default");
    }
}
