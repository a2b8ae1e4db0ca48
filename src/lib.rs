//! Selector schema generation and sample product extraction
//!
//! Used when configuring a retailer crawler from a pasted product tile:
//! - [`generate_selector_schema`] guesses a reusable CSS selector schema
//! - [`generate_sample_product`] applies a schema and normalizes the result
//! - [`preview`] does both and renders the JSON the configuration form shows

pub mod error;
pub mod extractor;
pub mod generator;
pub mod json_path;
pub mod patterns;
pub mod preview;
pub mod schema;

#[cfg(test)]
mod fixtures;

pub use error::SchemaError;
pub use extractor::{extract_fields, generate_sample_product, ExtractedFields, SampleProduct};
pub use generator::generate_selector_schema;
pub use preview::{preview, preview_with_schema, Preview, SampleView};
pub use schema::{FieldKind, SelectorField, SelectorSchema};
