//! # Chapter Feeds
//!
//! Turns chapter listings on manga and web-novel publisher sites into
//! RSS 2.0 feeds, for sites that don't publish their own.
//!
//! ## Supported sources
//!
//! Run `chapter_feeds --list` for the registered provider ids. Each provider
//! knows one site: how to locate the chapter listing, which nodes or JSON
//! keys carry the fields, and which date grammar the site writes.
//!
//! ## Usage
//!
//! ```sh
//! chapter_feeds urasunday.com 1234 > feed.xml
//! ```
//!
//! ## Architecture
//!
//! 1. **Resolve**: the registry maps the provider id to its implementation
//! 2. **Fetch**: the provider pulls the source document(s) over HTTP
//! 3. **Normalize**: fields are extracted into a source-agnostic channel model
//! 4. **Serialize**: the channel is rendered as RSS 2.0, newest items first
//!
//! A provider may instead return a redirect target when the source already
//! publishes its own feed; that target is printed in place of a document.

use std::error::Error;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod dates;
mod error;
mod feed;
mod fetch;
mod providers;
mod utils;

use cli::Cli;
use fetch::SourceClient;
use providers::{FeedOutcome, Registry};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr) // stdout carries the feed document
        .init();

    let start_time = Instant::now();

    let args = Cli::parse();
    debug!(?args.provider, ?args.work_id, "Parsed CLI arguments");

    let registry = Registry::with_default_providers();

    if args.list {
        for id in registry.ids() {
            println!("{id}");
        }
        return Ok(());
    }

    // clap enforces the positionals whenever --list is absent
    let (Some(provider_id), Some(work_id)) = (args.provider.as_deref(), args.work_id.as_deref())
    else {
        return Ok(());
    };

    let provider = registry.resolve(provider_id)?;
    let client = SourceClient::new();

    match provider.fetch_feed(&client, work_id).await? {
        FeedOutcome::Feed(channel) => {
            let xml = channel.into_rss().to_string();
            match &args.output {
                Some(path) => {
                    tokio::fs::write(path, &xml).await?;
                    info!(path = %path, bytes = xml.len(), "Wrote feed document");
                }
                None => println!("{xml}"),
            }
        }
        FeedOutcome::Redirect(target) => {
            info!(%target, "Source publishes its own feed");
            println!("{target}");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        provider = provider_id,
        work = work_id,
        "Execution complete"
    );

    Ok(())
}
