pub mod memory;
pub mod notion;

use async_trait::async_trait;

use crate::error::StoreError;

/// One run of formatted text, reduced to what we read back out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub plain_text: String,
}

impl TextRun {
    pub fn new(plain_text: impl Into<String>) -> Self {
        Self {
            plain_text: plain_text.into(),
        }
    }
}

/// A record field as the store hands it back.
///
/// Resolved once at the store boundary; everything above the store only
/// sees the flattened plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Scalar fields (numbers, selects, urls, ...) rendered as text.
    PlainText(String),
    RichText(Vec<TextRun>),
    Title(Vec<TextRun>),
    /// The record has no field with this name.
    Absent,
}

impl FieldValue {
    /// Concatenate the field's text in order. `Absent` flattens to empty.
    pub fn flatten(&self) -> String {
        match self {
            FieldValue::PlainText(text) => text.clone(),
            FieldValue::RichText(runs) | FieldValue::Title(runs) => {
                runs.iter().map(|r| r.plain_text.as_str()).collect()
            }
            FieldValue::Absent => String::new(),
        }
    }

    /// `None` for an absent field, flattened text otherwise.
    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Absent => None,
            other => Some(other.flatten()),
        }
    }
}

/// Where records live. Notion in production, a map in tests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Plain text of a field, or `None` if the record has no such field.
    async fn read_field(&self, record_id: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a rich-text field. Fails with [`StoreError::NotFound`] if
    /// the record has no such field.
    async fn write_text_field(
        &self,
        record_id: &str,
        field: &str,
        text: &str,
    ) -> Result<(), StoreError>;

    /// Pick an option on a single-choice field. Silently does nothing if
    /// the record has no such field.
    async fn set_choice_field(
        &self,
        record_id: &str,
        field: &str,
        option: &str,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_text_concatenates_runs_in_order() {
        let value = FieldValue::RichText(vec![
            TextRun::new("Week 3 "),
            TextRun::new("was "),
            TextRun::new("wild."),
        ]);
        assert_eq!(value.flatten(), "Week 3 was wild.");
    }

    #[test]
    fn title_flattens_like_rich_text() {
        let value = FieldValue::Title(vec![TextRun::new("Grid"), TextRun::new(" Q&A")]);
        assert_eq!(value.flatten(), "Grid Q&A");
    }

    #[test]
    fn absent_is_none_but_flattens_empty() {
        assert_eq!(FieldValue::Absent.flatten(), "");
        assert_eq!(FieldValue::Absent.into_text(), None);
    }

    #[test]
    fn empty_rich_text_is_some_empty() {
        assert_eq!(FieldValue::RichText(vec![]).into_text(), Some(String::new()));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            FieldValue::PlainText("3".to_string()).into_text(),
            Some("3".to_string())
        );
    }
}
