use crate::models::BusinessRecord;
use crate::scrapers::fetch::{fetch_page, FETCH_SETTLE};
use crate::scrapers::fields;
use crate::scrapers::types::WalkStats;
use crate::sink::RecordSink;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

// The listing marker needs the spaces: the class sits between others in
// the attribute and the bare name also appears in unrelated class names.
static SEL_LISTING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*=" ccaMemListing "]"#).expect("invalid selector: ccaMemListing")
});
static SEL_PROFILE_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="ccaMemProfileLnk"] a"#)
        .expect("invalid selector: ccaMemProfileLnk a")
});
static SEL_NEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="ccaNext"]"#).expect("invalid selector: ccaNext"));
static SEL_NAME: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="ccaNameBlock"]"#).expect("invalid selector: ccaNameBlock")
});

/// Walk a CCA member directory.
///
/// Listing pages chain through a next link; the walk collects profile
/// links page by page until a page has no next marker, then visits every
/// profile. All links resolve against the directory root.
pub async fn walk(client: &Client, sink: &RecordSink, root: &Url, body: &str) -> WalkStats {
    let (mut links, mut next) = scan_listing_page(body, root);

    while let Some(href) = next {
        let page_url = match root.join(&href) {
            Ok(url) => url,
            Err(err) => {
                warn!("Next link {href} does not resolve: {err}");
                break;
            }
        };
        let page = match fetch_page(client, page_url.as_str(), None).await {
            Ok(page) => page,
            Err(err) => {
                warn!("Pagination stops at {page_url}: {err:#}");
                break;
            }
        };

        let (mut page_links, page_next) = scan_listing_page(&page, root);
        links.append(&mut page_links);
        next = page_next;
    }

    info!("Found {} member profiles across all pages", links.len());

    let mut stats = WalkStats {
        links: links.len(),
        ..Default::default()
    };

    for link in &links {
        let body = match fetch_page(client, link, None).await {
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

/// Profile links and the next-page href from one listing page.
fn scan_listing_page(body: &str, root: &Url) -> (Vec<String>, Option<String>) {
    let doc = Html::parse_document(body);

    let mut links = Vec::new();
    for listing in doc.select(&SEL_LISTING) {
        let Some(href) = listing
            .select(&SEL_PROFILE_LINK)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            warn!("Member listing without a profile link; skipping");
            continue;
        };
        match root.join(href) {
            Ok(url) => links.push(url.to_string()),
            Err(err) => warn!("Skipping unresolvable profile link {href}: {err}"),
        }
    }

    let next = doc
        .select(&SEL_NEXT)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string);

    (links, next)
}

/// Contact fields from one member profile page.
///
/// CCA profiles have no single contact scope; every field block is found
/// document-wide by its class marker.
fn parse_profile(body: &str) -> BusinessRecord {
    let doc = Html::parse_document(body);
    let name = doc
        .select(&SEL_NAME)
        .next()
        .map(fields::stripped_text)
        .unwrap_or_default();

    BusinessRecord::new(
        name,
        fields::cca_website(&doc),
        fields::cca_phone(&doc),
        fields::cca_address(&doc),
    )
}
