//! Notion-backed [`RecordStore`].
//!
//! Every operation re-fetches the page first: reads need the property id,
//! writes need to know the property exists and what type it is.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value, json};

use super::{FieldValue, RecordStore, TextRun};
use crate::consts::{NOTION_API_BASE, NOTION_RUN_LIMIT, NOTION_VERSION};
use crate::error::StoreError;

pub struct NotionStore {
    secret: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for NotionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionStore")
            .field("base_url", &self.base_url)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A property as listed on the page object.
struct PropertyRef {
    id: String,
    kind: String,
}

impl NotionStore {
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_base_url(secret, NOTION_API_BASE)
    }

    pub fn with_base_url(secret: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, StoreError> {
        let mut req = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret)
            .header("Notion-Version", NOTION_VERSION);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, body });
        }
        Ok(resp.json().await?)
    }

    async fn property(&self, page_id: &str, field: &str) -> Result<Option<PropertyRef>, StoreError> {
        let page = self
            .call(Method::GET, &format!("/v1/pages/{page_id}"), None)
            .await?;
        Ok(page
            .get("properties")
            .and_then(|props| props.get(field))
            .map(|prop| PropertyRef {
                id: str_at(prop, "id").to_string(),
                kind: str_at(prop, "type").to_string(),
            }))
    }

    /// Fetch a property's value, following pagination for list-valued ones.
    async fn field_value(&self, page_id: &str, property_id: &str) -> Result<FieldValue, StoreError> {
        let path = format!("/v1/pages/{page_id}/properties/{property_id}");
        let mut runs = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let url = match &cursor {
                Some(c) => format!("{path}?start_cursor={c}"),
                None => path.clone(),
            };
            let body = self.call(Method::GET, &url, None).await?;

            if str_at(&body, "object") != "list" {
                return Ok(scalar_value(&body));
            }

            if let Some(items) = body.get("results").and_then(Value::as_array) {
                runs.extend(items.iter().map(|item| TextRun::new(run_text(item))));
            }

            let has_more = body.get("has_more").and_then(Value::as_bool).unwrap_or(false);
            match body.get("next_cursor").and_then(Value::as_str) {
                Some(next) if has_more => cursor = Some(next.to_string()),
                _ => {
                    let kind = body
                        .get("property_item")
                        .map(|p| str_at(p, "type"))
                        .unwrap_or_default();
                    return Ok(match kind {
                        "title" => FieldValue::Title(runs),
                        "rich_text" => FieldValue::RichText(runs),
                        _ => FieldValue::PlainText(
                            runs.into_iter().map(|r| r.plain_text).collect(),
                        ),
                    });
                }
            }
        }
    }

    async fn update(&self, page_id: &str, field: &str, value: Value) -> Result<(), StoreError> {
        let mut properties = Map::new();
        properties.insert(field.to_string(), value);
        let body = json!({ "properties": properties });
        self.call(Method::PATCH, &format!("/v1/pages/{page_id}"), Some(&body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for NotionStore {
    async fn read_field(&self, record_id: &str, field: &str) -> Result<Option<String>, StoreError> {
        let value = match self.property(record_id, field).await? {
            Some(prop) => self.field_value(record_id, &prop.id).await?,
            None => FieldValue::Absent,
        };
        Ok(value.into_text())
    }

    async fn write_text_field(
        &self,
        record_id: &str,
        field: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        if self.property(record_id, field).await?.is_none() {
            return Err(StoreError::NotFound {
                field: field.to_string(),
            });
        }
        self.update(record_id, field, json!({ "rich_text": rich_text_runs(text) }))
            .await
    }

    async fn set_choice_field(
        &self,
        record_id: &str,
        field: &str,
        option: &str,
    ) -> Result<(), StoreError> {
        let Some(prop) = self.property(record_id, field).await? else {
            return Ok(());
        };
        // Notion's built-in status type takes the same shape under its own key.
        let key = if prop.kind == "status" { "status" } else { "select" };
        let mut choice = Map::new();
        choice.insert(key.to_string(), json!({ "name": option }));
        self.update(record_id, field, Value::Object(choice)).await
    }
}

/// Split text into rich-text runs that each fit Notion's per-run limit.
pub fn rich_text_runs(text: &str) -> Vec<Value> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![json!({ "type": "text", "text": { "content": "" } })];
    }
    chars
        .chunks(NOTION_RUN_LIMIT)
        .map(|chunk| {
            let content: String = chunk.iter().collect();
            json!({ "type": "text", "text": { "content": content } })
        })
        .collect()
}

fn str_at<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Text of one property item in a paginated list.
fn run_text(item: &Value) -> &str {
    let kind = str_at(item, "type");
    item.get(kind)
        .and_then(|inner| inner.get("plain_text"))
        .and_then(Value::as_str)
        .or_else(|| item.get("plain_text").and_then(Value::as_str))
        .unwrap_or_default()
}

/// Render a non-paginated property item as plain text.
fn scalar_value(item: &Value) -> FieldValue {
    let kind = str_at(item, "type");
    let inner = item.get(kind).unwrap_or(&Value::Null);
    FieldValue::PlainText(render_scalar(kind, inner))
}

fn render_scalar(kind: &str, inner: &Value) -> String {
    match (kind, inner) {
        (_, Value::Null) => String::new(),
        ("select" | "status", v) => str_at(v, "name").to_string(),
        ("multi_select", Value::Array(options)) => options
            .iter()
            .map(|o| str_at(o, "name"))
            .collect::<Vec<_>>()
            .join(", "),
        ("date", v) => str_at(v, "start").to_string(),
        ("formula", v) => {
            let kind = str_at(v, "type");
            render_scalar(kind, v.get(kind).unwrap_or(&Value::Null))
        }
        ("title" | "rich_text", v) => str_at(v, "plain_text").to_string(),
        (_, Value::String(s)) => s.clone(),
        (_, Value::Number(n)) => n.to_string(),
        (_, Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
