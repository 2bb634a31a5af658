//! Subcommand handlers.
//!
//! Each handler writes the page to `out` and diagnostics to `err`, and
//! reports an [`Outcome`] that `main` turns into the process exit code.

use std::io::Write;

use anyhow::{Context, Result};
use cms_client::{AttractionRecord, CmsClient, Lookup, Transport};
use colored::Colorize;

use crate::render;

/// How a subcommand finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The CMS answered but has no matching attraction
    NotFound,
    /// The CMS could not be asked or its answer could not be read
    Failed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    pub json: bool,
    pub explain: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SlugsOptions {
    pub paths: bool,
    pub explain: bool,
}

/// Show the detail page for one attraction.
///
/// Without `explain` every failure reads as "not found", the same way a page
/// request would see it. With `explain` the underlying error is reported.
pub async fn show<T: Transport>(
    client: &CmsClient<T>,
    slug: &str,
    options: ShowOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let lookup = if options.explain {
        match client.try_fetch_attraction_by_slug(slug).await {
            Ok(Some(attraction)) => Lookup::Found(attraction),
            Ok(None) => Lookup::NotFound,
            Err(e) => {
                writeln!(err, "{} {}: {}", "Lookup failed:".red().bold(), slug, e)?;
                return Ok(Outcome::Failed);
            }
        }
    } else {
        client.fetch_attraction_by_slug(slug).await
    };

    match lookup {
        Lookup::Found(attraction) => {
            write_attraction(client, &attraction, options.json, out)?;
            Ok(Outcome::Done)
        }
        Lookup::NotFound => {
            writeln!(err, "{} {}", "Attraction not found:".red().bold(), slug)?;
            Ok(Outcome::NotFound)
        }
    }
}

fn write_attraction<T: Transport>(
    client: &CmsClient<T>,
    attraction: &AttractionRecord,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(attraction).context("Failed to serialize attraction")?;
        writeln!(out, "{}", text)?;
    } else {
        write!(out, "{}", render::render_attraction(attraction, client.config()))?;
    }
    Ok(())
}

/// List the slugs of all attractions.
///
/// An empty list is not an error: pages are then resolved on demand. With
/// `explain` a failed listing is reported instead of printing nothing.
pub async fn slugs<T: Transport>(
    client: &CmsClient<T>,
    options: SlugsOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let slugs = if options.explain {
        match client.try_list_known_slugs().await {
            Ok(slugs) => slugs,
            Err(e) => {
                writeln!(err, "{} {}", "Listing slugs failed:".red().bold(), e)?;
                return Ok(Outcome::Failed);
            }
        }
    } else {
        client.list_known_slugs().await
    };

    if slugs.is_empty() {
        writeln!(
            err,
            "{}",
            "No slugs available; pages will be resolved on demand".yellow()
        )?;
    }
    for slug in slugs {
        if options.paths {
            writeln!(out, "/attractions/{}", slug)?;
        } else {
            writeln!(out, "{}", slug)?;
        }
    }
    Ok(Outcome::Done)
}
