//! Selector schema data model
//!
//! The JSON shape is shared with the crawler configuration store:
//!
//! ```json
//! {
//!   "name": "Product Information",
//!   "baseSelector": "li.miglog-prod",
//!   "fields": [
//!     { "name": "name", "selector": ".description strong", "type": "text" },
//!     { "name": "category", "selector": "[data-gtm]", "type": "attr", "attr": "data-gtm", "jsonPath": "category" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

pub const DEFAULT_SCHEMA_NAME: &str = "Product Information";
pub const FALLBACK_BASE_SELECTOR: &str = "div.product";

/// Reusable extraction template for one product-tile shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSchema {
    pub name: String,
    pub base_selector: String,
    #[serde(default)]
    pub fields: Vec<SelectorField>,
}

/// One named value to pull out of a matched base element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorField {
    pub name: String,
    pub selector: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// How the value is read from the element the selector resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Trimmed text content
    Text,
    /// Attribute value, optionally parsed as JSON and walked by `json_path`
    Attr {
        attr: String,
        #[serde(rename = "jsonPath", default, skip_serializing_if = "Option::is_none")]
        json_path: Option<String>,
    },
    /// Element text parsed as JSON (e.g. a JSON-LD script)
    Json {
        #[serde(rename = "jsonPath", default, skip_serializing_if = "Option::is_none")]
        json_path: Option<String>,
    },
    /// Inner markup
    Html,
}

impl SelectorSchema {
    pub fn new(base_selector: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_SCHEMA_NAME.to_string(),
            base_selector: base_selector.into(),
            fields: vec![],
        }
    }

    /// Schema returned when no known product container is present
    pub fn fallback() -> Self {
        Self::new(FALLBACK_BASE_SELECTOR)
    }

    pub fn field(&self, name: &str) -> Option<&SelectorField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Load a schema stored by the configuration layer
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl SelectorField {
    pub fn text(name: &str, selector: &str) -> Self {
        Self::with_kind(name, selector, FieldKind::Text)
    }

    pub fn html(name: &str, selector: &str) -> Self {
        Self::with_kind(name, selector, FieldKind::Html)
    }

    pub fn attr(name: &str, selector: &str, attr: &str) -> Self {
        Self::with_kind(
            name,
            selector,
            FieldKind::Attr {
                attr: attr.to_string(),
                json_path: None,
            },
        )
    }

    /// Attribute holding embedded JSON
    pub fn attr_json(name: &str, selector: &str, attr: &str, json_path: &str) -> Self {
        Self::with_kind(
            name,
            selector,
            FieldKind::Attr {
                attr: attr.to_string(),
                json_path: Some(json_path.to_string()),
            },
        )
    }

    pub fn json(name: &str, selector: &str, json_path: &str) -> Self {
        Self::with_kind(
            name,
            selector,
            FieldKind::Json {
                json_path: Some(json_path.to_string()),
            },
        )
    }

    fn with_kind(name: &str, selector: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
            kind,
        }
    }
}
