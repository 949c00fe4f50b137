// Standalone address scanner, exercised by its fixture tests.
#[allow(dead_code)]
mod address;
mod models;
mod scrapers;
mod sink;

use anyhow::Context;
use clap::Parser;
use models::DirectoryKind;
use reqwest::Client;
use scraper::Html;
use scrapers::fetch::{fetch_root, FETCH_SETTLE, ROOT_RETRY_BACKOFF};
use scrapers::{cca, growthzone, storefront, DirectoryBrowser, WalkStats};
use sink::RecordSink;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Walk a chamber-of-commerce member directory and submit every business
/// profile it lists to the company storage API.
#[derive(Parser)]
#[command(name = "chamber-scout")]
struct Cli {
    /// Directory root URL ("https://" is assumed when no scheme is given)
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    info!("🏢 Chamber Scout - Business Directory Scraper");
    info!("=============================================");
    info!("");

    let root = Url::parse(&normalize_root_url(&cli.url))
        .with_context(|| format!("invalid directory URL: {}", cli.url))?;

    // One HTTP client shared by every fetch and the storage sink
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")?;

    // Launched up front so script-rendered directories can use it; dropped
    // on every exit path, which shuts Chrome down.
    let browser = DirectoryBrowser::launch()?;

    match run(&client, &browser, &root).await? {
        Some(stats) => {
            info!("");
            info!(
                "✅ Done: {} profile links, {} inserted, {} duplicates, {} submit failures, {} profiles skipped",
                stats.links, stats.inserted, stats.duplicates, stats.failed, stats.skipped
            );
        }
        None => info!("Nothing to walk."),
    }

    Ok(())
}

/// Fetch and classify the directory root, then hand off to its walk.
async fn run(
    client: &Client,
    browser: &DirectoryBrowser,
    root: &Url,
) -> anyhow::Result<Option<WalkStats>> {
    info!("Fetching directory root: {root}");
    let mut body = fetch_root(client, root.as_str(), ROOT_RETRY_BACKOFF).await?;
    tokio::time::sleep(FETCH_SETTLE).await;

    if wants_browser_render(root.as_str()) {
        info!("Hashbang URL; rendering the root in the browser");
        body = match browser.render(root.as_str()) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!("Browser render failed ({err:#}); continuing with an empty page");
                String::new()
            }
        };
    }

    let kind = classify_body(&body);
    info!("Detected directory type: {kind}");

    let sink = RecordSink::from_env(client.clone());

    let stats = match kind {
        DirectoryKind::GrowthZone => growthzone::walk(client, &sink, root, &body).await,
        DirectoryKind::Cca => cca::walk(client, &sink, root, &body).await,
        DirectoryKind::Storefront => storefront::walk(browser, &sink, root).await,
        DirectoryKind::Unknown => {
            warn!("Unknown or unsupported directory layout; nothing to walk");
            return Ok(None);
        }
    };

    Ok(Some(stats))
}

fn classify_body(body: &str) -> DirectoryKind {
    let doc = Html::parse_document(body);
    scrapers::classify(&doc)
}

/// Accept bare hostnames: anything without a scheme gets "https://".
fn normalize_root_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Hashbang directories build their listing client-side; the plain fetch
/// only returns an empty shell.
fn wants_browser_render(url: &str) -> bool {
    url.contains("#!")
}
