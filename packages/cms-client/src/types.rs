use serde::{Deserialize, Serialize};

/// Outcome of a single-record lookup.
///
/// Transport failures, error statuses, empty result sets and malformed
/// payloads all collapse into `NotFound`; the caller only ever has to choose
/// between rendering content and rendering a not-found page.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

impl<T> From<Lookup<T>> for Option<T> {
    fn from(lookup: Lookup<T>) -> Self {
        lookup.into_option()
    }
}

/// A normalized attraction, independent of which Strapi response shape it
/// was read from.
///
/// Numeric fields are passed through as received. Media URLs are left
/// relative; use [`crate::CmsConfig::media_url`] to make them absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionRecord {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "priceSEK", default, skip_serializing_if = "Option::is_none")]
    pub price_sek: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_of_people: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kids: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<DescriptionBlock>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_cover: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_poster: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<MediaRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Geographic position. Either half may be missing upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A media file reference from the Strapi upload plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Usually a path relative to the CMS origin.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// One block of the rich-text `description` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DescriptionBlock {
    Paragraph {
        children: Vec<TextSpan>,
    },
    Heading {
        level: u8,
        children: Vec<TextSpan>,
    },
    Quote {
        children: Vec<TextSpan>,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        children: Vec<TextSpan>,
    },
    List {
        format: ListFormat,
        items: Vec<Vec<TextSpan>>,
    },
    /// Block kinds this crate has no dedicated variant for (images, custom
    /// blocks). The inline text is kept so nothing silently disappears.
    Other {
        kind: String,
        children: Vec<TextSpan>,
    },
}

impl DescriptionBlock {
    /// Concatenated plain text of the block. List items are joined by newlines.
    pub fn plain_text(&self) -> String {
        match self {
            DescriptionBlock::Paragraph { children }
            | DescriptionBlock::Heading { children, .. }
            | DescriptionBlock::Quote { children }
            | DescriptionBlock::Code { children, .. }
            | DescriptionBlock::Other { children, .. } => spans_text(children),
            DescriptionBlock::List { items, .. } => items
                .iter()
                .map(|item| spans_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn spans_text(spans: &[TextSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    #[default]
    Unordered,
}

/// A run of inline text with its formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    /// Target URL when the span came from an inline link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
