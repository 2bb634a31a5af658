//! Shape resolution for Strapi entries.
//!
//! Strapi v4 wraps entry fields in `attributes` next to the `id`; v5 (and v4
//! with the flattening plugin) puts them directly on the entry. An entry is
//! resolved once into an [`EntryView`] and every field is read through it, so
//! a record is never assembled from a mix of both shapes.

use serde_json::{Map, Value};

use crate::error::{CmsError, Result};

/// Which response shape an entry was delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{ "id": 1, "attributes": { ... } }`
    Nested,
    /// `{ "id": 1, ... }`
    Flat,
}

/// Uniform read access to an entry's fields, whichever shape it came in.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    id: Option<i64>,
    fields: &'a Map<String, Value>,
    shape: Shape,
}

impl<'a> EntryView<'a> {
    /// Resolve the shape of a single entry.
    ///
    /// A present, non-null `attributes` key selects the nested shape. The
    /// outer `id` wins over any `id` inside `attributes`.
    pub fn resolve(entry: &'a Value) -> Result<Self> {
        let outer = entry
            .as_object()
            .ok_or_else(|| CmsError::Malformed(format!("entry is not an object: {}", entry)))?;
        let outer_id = parse_id(outer.get("id"));

        match outer.get("attributes") {
            None | Some(Value::Null) => Ok(Self {
                id: outer_id,
                fields: outer,
                shape: Shape::Flat,
            }),
            Some(Value::Object(attributes)) => Ok(Self {
                id: outer_id.or_else(|| parse_id(attributes.get("id"))),
                fields: attributes,
                shape: Shape::Nested,
            }),
            Some(other) => Err(CmsError::Malformed(format!(
                "attributes is not an object: {}",
                other
            ))),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Raw field value. JSON `null` reads as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.str(key).map(str::to_string)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }
}

/// Entry ids are integers; some proxies and plugins stringify them.
fn parse_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_entry() {
        let entry = json!({ "id": 4, "attributes": { "title": "Ice Hotel" } });
        let view = EntryView::resolve(&entry).unwrap();

        assert_eq!(view.shape(), Shape::Nested);
        assert_eq!(view.id(), Some(4));
        assert_eq!(view.str("title"), Some("Ice Hotel"));
    }

    #[test]
    fn test_flat_entry() {
        let entry = json!({ "id": 4, "title": "Ice Hotel" });
        let view = EntryView::resolve(&entry).unwrap();

        assert_eq!(view.shape(), Shape::Flat);
        assert_eq!(view.id(), Some(4));
        assert_eq!(view.str("title"), Some("Ice Hotel"));
    }

    #[test]
    fn test_null_attributes_is_flat() {
        let entry = json!({ "id": 4, "attributes": null, "title": "Ice Hotel" });
        let view = EntryView::resolve(&entry).unwrap();

        assert_eq!(view.shape(), Shape::Flat);
        assert_eq!(view.str("title"), Some("Ice Hotel"));
    }

    #[test]
    fn test_nested_view_does_not_read_outer_fields() {
        let entry = json!({ "id": 4, "title": "outer", "attributes": { "slug": "inner" } });
        let view = EntryView::resolve(&entry).unwrap();

        assert_eq!(view.str("title"), None);
        assert_eq!(view.str("slug"), Some("inner"));
    }

    #[test]
    fn test_outer_id_wins() {
        let entry = json!({ "id": 4, "attributes": { "id": 99 } });
        assert_eq!(EntryView::resolve(&entry).unwrap().id(), Some(4));

        let entry = json!({ "attributes": { "id": 99 } });
        assert_eq!(EntryView::resolve(&entry).unwrap().id(), Some(99));
    }

    #[test]
    fn test_numeric_string_ids() {
        let entry = json!({ "id": "7", "title": "Ice Hotel" });
        assert_eq!(EntryView::resolve(&entry).unwrap().id(), Some(7));

        let entry = json!({ "attributes": { "id": " 12 " } });
        assert_eq!(EntryView::resolve(&entry).unwrap().id(), Some(12));

        let entry = json!({ "id": "abc", "title": "Ice Hotel" });
        assert_eq!(EntryView::resolve(&entry).unwrap().id(), None);
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let entry = json!({ "id": 1, "location": null, "rating": 4 });
        let view = EntryView::resolve(&entry).unwrap();

        assert!(view.get("location").is_none());
        assert_eq!(view.f64("rating"), Some(4.0));
    }

    #[test]
    fn test_rejects_non_object_entries() {
        assert!(matches!(
            EntryView::resolve(&json!("nope")),
            Err(CmsError::Malformed(_))
        ));
        assert!(matches!(
            EntryView::resolve(&json!({ "id": 1, "attributes": [1, 2] })),
            Err(CmsError::Malformed(_))
        ));
    }
}
