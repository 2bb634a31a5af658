//! Attractions CLI
//!
//! Renders attraction detail pages from the CMS in the terminal and lists
//! the slugs available for static path generation.

mod commands;
mod config;
mod render;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cms_client::CmsClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Outcome, ShowOptions, SlugsOptions};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "attractions")]
#[command(about = "Browse Expedition Lapland attractions from the CMS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detail page for one attraction
    Show {
        slug: String,
        /// Print the normalized record as JSON instead of a page
        #[arg(long)]
        json: bool,
        /// Report why a lookup failed instead of treating it as not found
        #[arg(long)]
        explain: bool,
    },

    /// List the slugs of all attractions
    Slugs {
        /// Print page paths (`/attractions/<slug>`) instead of bare slugs
        #[arg(long)]
        paths: bool,
        /// Report why listing failed instead of printing nothing
        #[arg(long)]
        explain: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cms_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = CmsClient::with_http_client(config.cms.clone(), config.http_client()?);

    tracing::debug!(
        base_url = %config.cms.base_url,
        collection = %config.cms.collection,
        "CMS client ready"
    );

    let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
    let outcome = match cli.command {
        Commands::Show {
            slug,
            json,
            explain,
        } => {
            let options = ShowOptions { json, explain };
            commands::show(&client, &slug, options, &mut out, &mut err).await?
        }
        Commands::Slugs { paths, explain } => {
            let options = SlugsOptions { paths, explain };
            commands::slugs(&client, options, &mut out, &mut err).await?
        }
    };

    Ok(match outcome {
        Outcome::Done => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
        Outcome::NotFound => ExitCode::from(2),
    })
}
