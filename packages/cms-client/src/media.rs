//! Media field resolution.
//!
//! Upload relations arrive in several shapes depending on Strapi version and
//! populate settings:
//!
//! - `{ "data": { "id": 1, "attributes": { "url": ... } } }`
//! - `{ "data": { "attributes": { "url": ... } } }`
//! - `{ "id": 1, "url": ... }`
//!
//! and for multi-media fields `{ "data": [ ... ] }` or a bare array.

use serde_json::Value;

use crate::types::MediaRef;
use crate::view::EntryView;

/// Resolve a single-media field. `None` when absent, `{ "data": null }`, or
/// when the file has no usable URL.
pub fn resolve_media(value: Option<&Value>) -> Option<MediaRef> {
    let value = value?;
    match value.get("data") {
        Some(data) => media_entry(data),
        None => media_entry(value),
    }
}

/// Resolve a multi-media field.
///
/// Returns `None` only when upstream did not send the field (or sent
/// `{ "data": null }`); an empty gallery stays an empty vector. Entries
/// without a URL are dropped.
pub fn resolve_media_list(value: Option<&Value>) -> Option<Vec<MediaRef>> {
    let value = value?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) => return None,
            Some(single) => return Some(media_entry(single).into_iter().collect()),
            None => return Some(media_entry(value).into_iter().collect()),
        },
        _ => return None,
    };

    Some(entries.iter().filter_map(media_entry).collect())
}

fn media_entry(entry: &Value) -> Option<MediaRef> {
    let view = EntryView::resolve(entry).ok()?;
    let url = view.str("url").filter(|url| !url.is_empty())?;

    Some(MediaRef {
        id: view.id(),
        url: url.to_string(),
        alternative_text: view.string("alternativeText"),
        name: view.string("name"),
        caption: view.string("caption"),
        width: view.u32("width"),
        height: view.u32("height"),
        mime: view.string("mime"),
    })
}
