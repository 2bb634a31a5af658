//! Plain-text rendering of an attraction detail page.

use std::fmt;

use cms_client::{AttractionRecord, CmsConfig, DescriptionBlock, ListFormat, TextSpan};

/// Render the detail page: title, summary, cover image, facts, description
/// and gallery. Media paths are made absolute against the configured CMS.
pub fn render_attraction(attraction: &AttractionRecord, config: &CmsConfig) -> String {
    Page { attraction, config }.to_string()
}

struct Page<'a> {
    attraction: &'a AttractionRecord,
    config: &'a CmsConfig,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attraction = self.attraction;

        writeln!(f, "{}", attraction.title)?;
        writeln!(f, "{}", "=".repeat(attraction.title.chars().count()))?;

        if let Some(short_desc) = &attraction.short_desc {
            writeln!(f, "\n{}", short_desc)?;
        }

        if let Some(cover) = &attraction.image_cover {
            let alt = cover
                .alternative_text
                .as_deref()
                .unwrap_or(&attraction.title);
            writeln!(f, "\n[image: {}] {}", alt, self.config.media_url(&cover.url))?;
        }

        let facts = facts(attraction);
        if !facts.is_empty() {
            writeln!(f)?;
            for (label, value) in facts {
                writeln!(f, "- {}: {}", label, value)?;
            }
        }

        if let Some(description) = &attraction.description {
            for block in description {
                writeln!(f)?;
                render_block(f, block)?;
            }
        }

        if let Some(images) = attraction.images.as_deref().filter(|i| !i.is_empty()) {
            writeln!(f, "\nGallery:")?;
            for image in images {
                writeln!(f, "- {}", self.config.media_url(&image.url))?;
            }
        }

        Ok(())
    }
}

fn facts(attraction: &AttractionRecord) -> Vec<(&'static str, String)> {
    let mut facts = Vec::new();

    if let Some(rating) = attraction.rating {
        facts.push(("Rating", rating.to_string()));
    }
    if let Some(duration) = &attraction.duration {
        facts.push(("Duration", duration.clone()));
    }
    if let Some(price) = attraction.price_sek {
        facts.push(("Price", format!("{} SEK", price)));
    }
    if let Some(location) = &attraction.location {
        facts.push(("Location", location.clone()));
    }
    if let Some(category) = &attraction.category {
        facts.push(("Category", category.clone()));
    }
    if let Some(activity) = &attraction.activity {
        facts.push(("Activity", activity.clone()));
    }
    if let Some(group) = attraction.group_of_people {
        facts.push(("Group size", group.to_string()));
    }
    if let Some(kids) = &attraction.kids {
        facts.push(("Kids", kids.clone()));
    }
    match (&attraction.available_from, &attraction.available_to) {
        (Some(from), Some(to)) => facts.push(("Available", format!("{} to {}", from, to))),
        (Some(from), None) => facts.push(("Available", format!("from {}", from))),
        (None, Some(to)) => facts.push(("Available", format!("until {}", to))),
        (None, None) => {}
    }
    if let Some(coordinates) = attraction.coordinates {
        if let (Some(lat), Some(lng)) = (coordinates.lat, coordinates.lng) {
            facts.push(("Coordinates", format!("{}, {}", lat, lng)));
        }
    }

    facts
}

fn render_block(f: &mut fmt::Formatter<'_>, block: &DescriptionBlock) -> fmt::Result {
    match block {
        DescriptionBlock::Paragraph { children } | DescriptionBlock::Other { children, .. } => {
            writeln!(f, "{}", spans(children))
        }
        DescriptionBlock::Heading { level, children } => {
            let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
            writeln!(f, "{} {}", hashes, spans(children))
        }
        DescriptionBlock::Quote { children } => spans(children)
            .lines()
            .try_for_each(|line| writeln!(f, "> {}", line)),
        DescriptionBlock::Code { children, .. } => spans(children)
            .lines()
            .try_for_each(|line| writeln!(f, "    {}", line)),
        DescriptionBlock::List { format, items } => {
            for (i, item) in items.iter().enumerate() {
                match format {
                    ListFormat::Ordered => writeln!(f, "{}. {}", i + 1, spans(item))?,
                    ListFormat::Unordered => writeln!(f, "* {}", spans(item))?,
                }
            }
            Ok(())
        }
    }
}

/// Inline text; links are shown as `text <url>`.
fn spans(runs: &[TextSpan]) -> String {
    runs.iter()
        .map(|span| match &span.link {
            Some(link) => format!("{} <{}>", span.text, link),
            None => span.text.clone(),
        })
        .collect()
}
