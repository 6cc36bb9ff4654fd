use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::RecordStore;
use crate::error::StoreError;

/// One store operation, as recorded by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Read { field: String },
    Write { field: String, text: String },
    SetChoice { field: String, option: String },
}

/// In-process record store. Pages are maps of field name to text; every
/// call is logged so tests can assert on what a handler touched.
#[derive(Default)]
pub struct MemoryStore {
    pages: Mutex<HashMap<String, HashMap<String, String>>>,
    log: Mutex<Vec<StoreCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given fields (empty values are still fields).
    pub fn with_page(self, id: &str, fields: &[(&str, &str)]) -> Self {
        let page = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.pages.lock().unwrap().insert(id.to_string(), page);
        self
    }

    pub fn field(&self, id: &str, field: &str) -> Option<String> {
        self.pages
            .lock()
            .unwrap()
            .get(id)
            .and_then(|page| page.get(field).cloned())
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.log.lock().unwrap().clone()
    }

    /// Fields written, in order.
    pub fn written_fields(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Write { field, .. } => Some(field),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StoreCall) {
        self.log.lock().unwrap().push(call);
    }

    fn with_page_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, StoreError> {
        let mut pages = self.pages.lock().unwrap();
        let page = pages.get_mut(id).ok_or_else(|| StoreError::Api {
            status: 404,
            body: format!("Could not find page with ID: {id}"),
        })?;
        Ok(f(page))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_field(&self, record_id: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.record(StoreCall::Read {
            field: field.to_string(),
        });
        self.with_page_mut(record_id, |page| page.get(field).cloned())
    }

    async fn write_text_field(
        &self,
        record_id: &str,
        field: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        self.record(StoreCall::Write {
            field: field.to_string(),
            text: text.to_string(),
        });
        self.with_page_mut(record_id, |page| match page.get_mut(field) {
            Some(value) => {
                *value = text.to_string();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                field: field.to_string(),
            }),
        })?
    }

    async fn set_choice_field(
        &self,
        record_id: &str,
        field: &str,
        option: &str,
    ) -> Result<(), StoreError> {
        self.record(StoreCall::SetChoice {
            field: field.to_string(),
            option: option.to_string(),
        });
        self.with_page_mut(record_id, |page| {
            if let Some(value) = page.get_mut(field) {
                *value = option.to_string();
            }
        })
    }
}
