//! Mapping of raw collection responses into normalized records.

use serde_json::Value;
use tracing::debug;

use crate::blocks::parse_description;
use crate::error::{CmsError, Result};
use crate::media::{resolve_media, resolve_media_list};
use crate::types::{AttractionRecord, Coordinates};
use crate::view::EntryView;

/// Build an [`AttractionRecord`] from the first entry of a collection
/// response.
///
/// `Ok(None)` means upstream answered with no matching entry. Errors mean the
/// payload could not be read as an attraction at all. `requested_slug` fills
/// in `slug` when the entry does not carry one.
pub fn normalize_attraction(body: &Value, requested_slug: &str) -> Result<Option<AttractionRecord>> {
    let Some(entry) = entries(body)?.first() else {
        return Ok(None);
    };

    let view = EntryView::resolve(entry)?;
    debug!(shape = ?view.shape(), id = ?view.id(), "Resolved attraction entry");

    let id = view
        .id()
        .ok_or_else(|| CmsError::Malformed("entry has no numeric id".into()))?;
    let title = view
        .string("title")
        .ok_or_else(|| CmsError::Malformed(format!("entry {} has no title", id)))?;
    let slug = view
        .string("slug")
        .unwrap_or_else(|| requested_slug.to_string());

    Ok(Some(AttractionRecord {
        id,
        title,
        slug,
        location: view.string("location"),
        rating: view.f64("rating"),
        duration: view.string("duration"),
        price_sek: view.f64("priceSEK"),
        category: view.string("category"),
        available_from: view.string("availableFrom"),
        available_to: view.string("availableTo"),
        group_of_people: view.i64("groupOfPeople"),
        kids: view.string("kids"),
        activity: view.string("activity"),
        coordinates: parse_coordinates(view.get("coordinates")),
        description: parse_description(view.get("description")),
        short_desc: view.string("shortDesc"),
        image_cover: resolve_media(view.get("imageCover")),
        image_poster: resolve_media(view.get("imagePoster")),
        images: resolve_media_list(view.get("images")),
        updated_at: view.string("updatedAt"),
    }))
}

/// Extract the `slug` of every entry in a collection response, in order.
///
/// Entries that are unreadable or have an empty slug are skipped.
pub fn normalize_slugs(body: &Value) -> Result<Vec<String>> {
    let slugs = entries(body)?
        .iter()
        .filter_map(|entry| EntryView::resolve(entry).ok())
        .filter_map(|view| view.string("slug"))
        .filter(|slug| !slug.is_empty())
        .collect();

    Ok(slugs)
}

/// The `data` array of a collection response. Absent or null `data` reads as
/// an empty result set.
fn entries(body: &Value) -> Result<&[Value]> {
    if !body.is_object() {
        return Err(CmsError::Malformed("response body is not an object".into()));
    }

    match body.get("data") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(CmsError::Malformed(format!(
            "data is not an array: {}",
            other
        ))),
    }
}

/// Accepts `{ lat, lng }` and the legacy `{ "DD": { lat, lng } }` wrapper.
/// Numeric strings are read as numbers.
fn parse_coordinates(value: Option<&Value>) -> Option<Coordinates> {
    let value = value?;
    let point = match value.get("DD") {
        Some(dd) if dd.is_object() => dd,
        _ if value.is_object() => value,
        _ => return None,
    };

    let number = |key: &str| {
        point.get(key).and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
    };

    Some(Coordinates {
        lat: number("lat"),
        lng: number("lng"),
    })
}
