use crate::models::BusinessRecord;
use crate::scrapers::fetch::{fetch_page, FETCH_SETTLE, PROFILE_TIMEOUT};
use crate::scrapers::fields;
use crate::scrapers::types::WalkStats;
use crate::sink::RecordSink;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

static SEL_CARDS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".gz-cards").expect("invalid selector: .gz-cards"));
static SEL_CARD_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".card-title").expect("invalid selector: .card-title"));
static SEL_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid selector: a"));
static SEL_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("invalid selector: h1"));
static SEL_CONTACT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="details-links"]"#).expect("invalid selector: details-links")
});

/// Walk a GrowthZone member directory.
///
/// GrowthZone lists every member on the one root page, so the walk is a
/// single link collection followed by one profile fetch per member.
/// Profiles that cannot be fetched are skipped; everything else becomes a
/// record and goes to the sink.
pub async fn walk(client: &Client, sink: &RecordSink, root: &Url, body: &str) -> WalkStats {
    let links = collect_profile_links(body, root);
    info!("Found {} member profiles", links.len());

    let mut stats = WalkStats {
        links: links.len(),
        ..Default::default()
    };

    for link in &links {
        let body = match fetch_page(client, link, Some(PROFILE_TIMEOUT)).await {
            Ok(body) => body,
            Err(err) => {
                warn!("Skipping profile {link}: {err:#}");
                stats.skipped += 1;
                continue;
            }
        };
        tokio::time::sleep(FETCH_SETTLE).await;

        let record = parse_profile(&body);
        debug!("Extracted: {record:?}");
        stats.tally(sink.submit(&record).await);
    }

    stats
}

/// Profile links from the first card container, resolved against `root`.
fn collect_profile_links(body: &str, root: &Url) -> Vec<String> {
    let doc = Html::parse_document(body);
    let Some(cards) = doc.select(&SEL_CARDS).next() else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for title in cards.select(&SEL_CARD_TITLE) {
        // Card titles without a link are decoration, not members.
        let Some(href) = title
            .select(&SEL_ANCHOR)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            continue;
        };
        match root.join(href) {
            Ok(url) => links.push(url.to_string()),
            Err(err) => warn!("Skipping unresolvable profile link {href}: {err}"),
        }
    }
    links
}

/// Contact fields from one member profile page.
///
/// The name sits in the page's `h1`; everything else is microdata inside
/// the contact block. A profile without the block still yields a record.
fn parse_profile(body: &str) -> BusinessRecord {
    let doc = Html::parse_document(body);
    let name = doc
        .select(&SEL_NAME)
        .next()
        .map(fields::stripped_text)
        .unwrap_or_default();

    match doc.select(&SEL_CONTACT).next() {
        Some(scope) => BusinessRecord::new(
            name,
            fields::microdata_website(scope),
            fields::microdata_phone(scope),
            fields::microdata_address(scope),
        ),
        None => BusinessRecord {
            name,
            ..Default::default()
        },
    }
}
