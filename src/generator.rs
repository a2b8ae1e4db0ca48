//! Selector schema generation
//!
//! Best-effort detection over one retailer's tile markup. Unknown markup
//! degrades to fewer fields or to [`SelectorSchema::fallback`], never to an
//! error.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::extractor::{compile, extract_value};
use crate::patterns::{FieldPattern, Probe, BASE_CONTAINERS, FIELD_PATTERNS};
use crate::schema::{SelectorField, SelectorSchema};

/// Build a selector schema from a pasted product HTML sample
pub fn generate_selector_schema(html: &str) -> SelectorSchema {
    let document = Html::parse_document(html);

    let Some((base, pattern)) = find_base_element(&document) else {
        debug!("no known product container, using fallback schema");
        return SelectorSchema::fallback();
    };

    let mut schema = SelectorSchema::new(derive_base_selector(base, pattern));
    debug!(base = %schema.base_selector, "base container found");

    // Field probes are independent of each other and of the base match
    for field_pattern in FIELD_PATTERNS {
        match probe_field(&document, base, &schema.base_selector, field_pattern) {
            Some(field) => {
                debug!(field = %field.name, selector = %field.selector, "field detected");
                schema.fields.push(field);
            }
            None => debug!(field = field_pattern.name, "field not detected"),
        }
    }

    schema
}

fn find_base_element(document: &Html) -> Option<(ElementRef<'_>, &'static str)> {
    BASE_CONTAINERS.iter().find_map(|pattern| {
        let selector = Selector::parse(pattern).ok()?;
        document.select(&selector).next().map(|el| (el, *pattern))
    })
}

/// `tag.class1.class2`, keeping the class attribute's order
fn derive_base_selector(element: ElementRef<'_>, pattern: &str) -> String {
    let mut classes: Vec<&str> = Vec::new();
    for class in element.value().attr("class").unwrap_or_default().split_whitespace() {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    let mut derived = element.value().name().to_string();
    for class in classes {
        derived.push('.');
        derived.push_str(&escape_css_ident(class));
    }

    // The parse error borrows `derived`; render it before deciding
    let rejected = Selector::parse(&derived).err().map(|e| e.to_string());
    match rejected {
        None => derived,
        Some(e) => {
            warn!(derived = %derived, error = %e, "derived base selector rejected");
            pattern.to_string()
        }
    }
}

fn escape_css_ident(ident: &str) -> String {
    if ident == "-" {
        return "\\-".to_string();
    }

    let mut escaped = String::with_capacity(ident.len());
    let leading_dash = ident.starts_with('-');

    for (i, c) in ident.chars().enumerate() {
        if c.is_ascii_digit() && (i == 0 || (i == 1 && leading_dash)) {
            // Identifiers cannot start with a digit, nor with `-` and a digit
            escaped.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            escaped.push(c);
        } else {
            escaped.push('\\');
            escaped.push(c);
        }
    }

    escaped
}

/// First candidate that yields a value the extractor would also find
fn probe_field(
    document: &Html,
    base: ElementRef<'_>,
    base_selector: &str,
    pattern: &FieldPattern,
) -> Option<SelectorField> {
    let candidates: Vec<SelectorField> = match pattern.probe {
        Probe::BaseAttr(attrs) => attrs
            .iter()
            .map(|attr| SelectorField::attr(pattern.name, base_selector, attr))
            .collect(),
        probe => {
            let kinds = probe.kinds();
            pattern
                .candidates
                .iter()
                .filter(|selector| compile(selector).is_ok())
                .flat_map(|selector| {
                    kinds.iter().map(move |kind| SelectorField {
                        name: pattern.name.to_string(),
                        selector: selector.to_string(),
                        kind: kind.clone(),
                    })
                })
                .collect()
        }
    };

    candidates.into_iter().find(|field| {
        extract_value(document, base, field).is_ok_and(|value| !value.trim().is_empty())
    })
}
