//! JSON boundary for the crawler configuration form
//!
//! The form shows the generated schema and the sample product side by side
//! before the schema is saved. A sample whose base selector matched nothing
//! renders as `{}`.

use serde::{Serialize, Serializer};
use url::Url;

use crate::error::SchemaError;
use crate::extractor::{generate_sample_product, SampleProduct};
use crate::generator::generate_selector_schema;
use crate::schema::SelectorSchema;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub schema: SelectorSchema,
    #[serde(serialize_with = "serialize_sample")]
    pub sample_product: Option<SampleProduct>,
}

/// Sample product as the form renders it: `{}` when absent
#[derive(Debug, Clone, Copy)]
pub struct SampleView<'a>(pub Option<&'a SampleProduct>);

impl Serialize for SampleView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(product) => product.serialize(serializer),
            None => serde_json::Map::new().serialize(serializer),
        }
    }
}

fn serialize_sample<S: Serializer>(
    sample: &Option<SampleProduct>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    SampleView(sample.as_ref()).serialize(serializer)
}

/// Generate a schema from `html` and preview it against the same markup
pub fn preview(html: &str) -> Preview {
    let schema = generate_selector_schema(html);
    preview_with_schema(html, schema)
}

/// Preview an existing (e.g. stored) schema against `html`
pub fn preview_with_schema(html: &str, schema: SelectorSchema) -> Preview {
    let sample_product = generate_sample_product(html, &schema);
    Preview {
        schema,
        sample_product,
    }
}

impl Preview {
    pub fn resolve_urls(&mut self, base: &Url) {
        if let Some(product) = self.sample_product.as_mut() {
            product.resolve_urls(base);
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_fields;
    use crate::fixtures::PRODUCT_TILE;
    use serde_json::{json, Value};

    #[test]
    fn test_round_trip_every_detected_field_has_value() {
        let schema = generate_selector_schema(PRODUCT_TILE);
        assert!(!schema.fields.is_empty());

        let fields = extract_fields(PRODUCT_TILE, &schema).unwrap();
        for field in &schema.fields {
            let value = fields.get(&field.name).unwrap();
            assert!(!value.is_empty(), "{} came back empty", field.name);
        }
        assert_eq!(fields.get("description"), Some("Fresh pasteurised milk, 3% fat"));
        assert_eq!(fields.get("imageAlt"), Some("Milk 3% 1L"));
        assert_eq!(fields.get("depositFee"), Some("+ deposit 0.30 ₪"));
    }

    #[test]
    fn test_preview_json() {
        let preview = preview(PRODUCT_TILE);
        let value: Value = serde_json::from_str(&preview.to_pretty_json().unwrap()).unwrap();

        assert_eq!(
            value["schema"]["baseSelector"],
            "li.miglog-prod.miglog-sellingmethod-by_unit"
        );
        assert_eq!(
            value["sampleProduct"],
            json!({
                "productID": "P_7290004131074",
                "productName": "Milk 3% 1L",
                "brand": "Tnuva",
                "priceWithTax": 6.9,
                "unitDetails": "6.90 ₪ per 1 liter",
                "productCategory": "Dairy/Milk",
                "image": "https://res.cdn.example/products/7290004131074.jpg",
                "productURL": "/online/he/p/P_7290004131074"
            })
        );
    }

    #[test]
    fn test_fallback_preview_renders_empty_sample() {
        let preview = preview("<p>not a product</p>");
        assert_eq!(preview.schema, SelectorSchema::fallback());
        assert_eq!(preview.sample_product, None);

        let value = serde_json::to_value(&preview).unwrap();
        assert_eq!(value["sampleProduct"], json!({}));
        assert_eq!(value["schema"]["fields"], json!([]));
    }

    #[test]
    fn test_stored_schema_preview() {
        let stored = SelectorSchema::from_json(
            r#"{
                "name": "Shufersal tile",
                "baseSelector": "li.miglog-prod",
                "fields": [
                    { "name": "name", "selector": ".description strong", "type": "text" },
                    { "name": "productUrl", "selector": "a.imgContainer", "type": "attr", "attr": "href" }
                ]
            }"#,
        )
        .unwrap();

        let mut preview = preview_with_schema(PRODUCT_TILE, stored);
        preview.resolve_urls(&Url::parse("https://www.shop.example/").unwrap());

        let product = preview.sample_product.unwrap();
        assert_eq!(product.product_name, "Milk 3% 1L");
        assert_eq!(
            product.product_url,
            "https://www.shop.example/online/he/p/P_7290004131074"
        );
        assert_eq!(product.brand, "");
    }

    #[test]
    fn test_sample_view() {
        assert_eq!(serde_json::to_string(&SampleView(None)).unwrap(), "{}");
    }
}
