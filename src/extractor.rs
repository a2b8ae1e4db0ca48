//! Sample product extraction
//!
//! Applies a [`SelectorSchema`] to HTML. The base element is located with
//! `baseSelector`; each field selector is resolved against the base element
//! first (the element itself, then its descendants) and against the whole
//! document second. Field failures are logged and leave an empty value.

use scraper::{ElementRef, Html, Selector};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::FieldError;
use crate::json_path::resolve as resolve_path;
use crate::schema::{FieldKind, SelectorField, SelectorSchema};

/// Normalized preview record shown to the administrator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleProduct {
    #[serde(rename = "productID")]
    pub product_id: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub brand: String,
    #[serde(rename = "priceWithTax")]
    pub price_with_tax: f64,
    #[serde(rename = "unitDetails")]
    pub unit_details: String,
    #[serde(rename = "productCategory")]
    pub product_category: String,
    pub image: String,
    #[serde(rename = "productURL")]
    pub product_url: String,
}

/// Raw field values in schema order, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    values: Vec<(String, String)>,
}

impl ExtractedFields {
    /// Later writes to the same name replace the earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl SampleProduct {
    /// Map raw schema fields onto the fixed output keys
    pub fn from_fields(fields: &ExtractedFields) -> Self {
        let text = |name: &str| fields.get(name).unwrap_or_default().to_string();

        Self {
            product_id: text("productId"),
            product_name: text("name"),
            brand: text("brand"),
            price_with_tax: parse_price(fields.get("price").unwrap_or_default()),
            unit_details: text("pricePerUnit"),
            product_category: text("category"),
            image: text("image"),
            product_url: text("productUrl"),
        }
    }

    /// Make relative `image` and `productURL` values absolute against `base`
    pub fn resolve_urls(&mut self, base: &Url) {
        for value in [&mut self.image, &mut self.product_url] {
            if value.is_empty() {
                continue;
            }
            match base.join(value) {
                Ok(joined) if matches!(joined.scheme(), "http" | "https") => {
                    *value = joined.to_string();
                }
                _ => debug!(value = %value, "left unresolved"),
            }
        }
    }
}

/// Apply `schema` to `html` and normalize the result.
///
/// Returns `None` when the base selector matches nothing.
pub fn generate_sample_product(html: &str, schema: &SelectorSchema) -> Option<SampleProduct> {
    extract_fields(html, schema).map(|fields| SampleProduct::from_fields(&fields))
}

/// Apply `schema` to `html` without normalization.
///
/// Every schema field gets an entry; fields that fail to extract are empty.
pub fn extract_fields(html: &str, schema: &SelectorSchema) -> Option<ExtractedFields> {
    let document = Html::parse_document(html);

    let base_selector = match compile(&schema.base_selector) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(schema = %schema.name, error = %e, "unusable base selector");
            return None;
        }
    };

    let Some(base) = document.select(&base_selector).next() else {
        debug!(schema = %schema.name, base = %schema.base_selector, "base element not found");
        return None;
    };

    let mut fields = ExtractedFields::default();
    for field in &schema.fields {
        let value = match extract_value(&document, base, field) {
            Ok(value) => value,
            Err(e @ FieldError::NoMatch(_)) => {
                debug!(field = %field.name, error = %e, "field not present");
                String::new()
            }
            Err(e) => {
                warn!(field = %field.name, selector = %field.selector, error = %e, "field extraction failed");
                String::new()
            }
        };
        fields.insert(field.name.clone(), value);
    }

    Some(fields)
}

/// Extract one field relative to an already located base element
pub(crate) fn extract_value<'a>(
    document: &'a Html,
    base: ElementRef<'a>,
    field: &SelectorField,
) -> Result<String, FieldError> {
    let selector = compile(&field.selector)?;
    let element = resolve_element(document, base, &selector)
        .ok_or_else(|| FieldError::NoMatch(field.selector.clone()))?;

    read_kind(element, &field.kind)
}

/// Base element itself, then its descendants, then the whole document
pub(crate) fn resolve_element<'a>(
    document: &'a Html,
    base: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    if selector.matches(&base) {
        return Some(base);
    }

    base.select(selector)
        .next()
        .or_else(|| document.select(selector).next())
}

pub(crate) fn compile(selector: &str) -> Result<Selector, FieldError> {
    Selector::parse(selector).map_err(|e| FieldError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn read_kind(element: ElementRef<'_>, kind: &FieldKind) -> Result<String, FieldError> {
    match kind {
        FieldKind::Text => Ok(element.text().collect::<String>().trim().to_string()),
        FieldKind::Html => Ok(element.inner_html()),
        FieldKind::Attr { attr, json_path } => {
            let raw = element
                .value()
                .attr(attr)
                .ok_or_else(|| FieldError::MissingAttribute(attr.clone()))?;

            let Some(path) = json_path else {
                return Ok(raw.to_string());
            };

            // Attributes that are not JSON keep their raw value
            match serde_json::from_str::<Value>(raw) {
                Ok(json) => {
                    resolve_path(&json, path).ok_or_else(|| FieldError::PathNotFound(path.clone()))
                }
                Err(_) => Ok(raw.to_string()),
            }
        }
        FieldKind::Json { json_path } => {
            let text = element.text().collect::<String>();
            let json: Value = serde_json::from_str(text.trim())
                .map_err(|e| FieldError::InvalidJson(e.to_string()))?;

            let path = json_path.as_deref().unwrap_or_default();
            resolve_path(&json, path).ok_or_else(|| FieldError::PathNotFound(path.to_string()))
        }
    }
}

/// First number in `text`, `0` when there is none.
///
/// `,` groups thousands when a `.` follows later or exactly three digits
/// follow it; otherwise it is the decimal separator.
pub fn parse_price(text: &str) -> f64 {
    let token: Vec<char> = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .collect();

    let mut number = String::new();
    let mut seen_decimal = false;

    for (i, &c) in token.iter().enumerate() {
        match c {
            ',' => {
                let rest = &token[i + 1..];
                let digits_after = rest.iter().take_while(|c| c.is_ascii_digit()).count();
                if rest.contains(&'.') || digits_after == 3 {
                    continue;
                }
                if seen_decimal {
                    break;
                }
                number.push('.');
                seen_decimal = true;
            }
            '.' => {
                if seen_decimal {
                    break;
                }
                number.push('.');
                seen_decimal = true;
            }
            digit => number.push(digit),
        }
    }

    number
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}
