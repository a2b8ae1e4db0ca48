//! Known retailer markup conventions
//!
//! Both tables are tried in order. Candidates inside a field pattern are
//! alternatives for the same value; the first one that yields a value wins.

use crate::schema::FieldKind;

/// Product tile wrappers, highest priority first
pub const BASE_CONTAINERS: &[&str] = &[
    "li.miglog-prod",
    "div.product-tile",
    "div.tileBlock",
    "article.product-item",
    "div.product-item",
];

/// How a detected field reads its value
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    Text,
    Attr(&'static str),
    AttrJson {
        attr: &'static str,
        json_path: &'static str,
    },
    /// Tried in order; `@graph` wrapped JSON-LD needs its own path
    Json {
        json_paths: &'static [&'static str],
    },
    /// First of these attributes present on the base element itself
    BaseAttr(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldPattern {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
    pub probe: Probe,
}

impl Probe {
    /// Field kinds to try for the non-base probes, in order
    pub fn kinds(&self) -> Vec<FieldKind> {
        match *self {
            Probe::Text => vec![FieldKind::Text],
            Probe::Attr(attr) => vec![FieldKind::Attr {
                attr: attr.to_string(),
                json_path: None,
            }],
            Probe::AttrJson { attr, json_path } => vec![FieldKind::Attr {
                attr: attr.to_string(),
                json_path: Some(json_path.to_string()),
            }],
            Probe::Json { json_paths } => json_paths
                .iter()
                .map(|path| FieldKind::Json {
                    json_path: Some(path.to_string()),
                })
                .collect(),
            Probe::BaseAttr(_) => vec![],
        }
    }
}

pub const FIELD_PATTERNS: &[FieldPattern] = &[
    FieldPattern {
        name: "name",
        candidates: &[
            ".description strong",
            ".product-name",
            r#"[itemprop="name"]"#,
            "h3.title",
        ],
        probe: Probe::Text,
    },
    FieldPattern {
        name: "price",
        candidates: &[
            ".line .price .number",
            "span.price",
            ".product-price",
            r#"[itemprop="price"]"#,
        ],
        probe: Probe::Text,
    },
    FieldPattern {
        name: "image",
        candidates: &["img.pic[src]", ".imgContainer img[src]", "img[src]"],
        probe: Probe::Attr("src"),
    },
    FieldPattern {
        name: "imageAlt",
        candidates: &["img.pic[alt]", ".imgContainer img[alt]", "img[alt]"],
        probe: Probe::Attr("alt"),
    },
    FieldPattern {
        name: "description",
        candidates: &[r#"script[type="application/ld+json"]"#],
        probe: Probe::Json {
            json_paths: &["description", "@graph.0.description"],
        },
    },
    FieldPattern {
        name: "brand",
        candidates: &[".brand-name", r#"[itemprop="brand"]"#, ".brand"],
        probe: Probe::Text,
    },
    FieldPattern {
        name: "productId",
        candidates: &[],
        probe: Probe::BaseAttr(&["data-product-code", "id"]),
    },
    FieldPattern {
        name: "category",
        candidates: &["[data-gtm]"],
        probe: Probe::AttrJson {
            attr: "data-gtm",
            json_path: "category",
        },
    },
    FieldPattern {
        name: "pricePerUnit",
        candidates: &[".pricePerUnit", ".unit-price", ".price-per-unit"],
        probe: Probe::Text,
    },
    FieldPattern {
        name: "depositFee",
        candidates: &[".depositFee", ".deposit"],
        probe: Probe::Text,
    },
    FieldPattern {
        name: "productUrl",
        candidates: &["a.imgContainer[href]", "a.title[href]", "a[href]"],
        probe: Probe::Attr("href"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_all_selectors_parse() {
        for selector in BASE_CONTAINERS {
            assert!(Selector::parse(selector).is_ok(), "{selector}");
        }
        for pattern in FIELD_PATTERNS {
            for selector in pattern.candidates {
                assert!(Selector::parse(selector).is_ok(), "{}: {selector}", pattern.name);
            }
        }
    }

    #[test]
    fn test_field_names_unique() {
        let mut names: Vec<&str> = FIELD_PATTERNS.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FIELD_PATTERNS.len());
    }
}
