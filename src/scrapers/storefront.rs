use crate::models::BusinessRecord;
use crate::scrapers::browser::DirectoryBrowser;
use crate::scrapers::fields;
use crate::scrapers::types::WalkStats;
use crate::sink::RecordSink;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

// Collection wants the bare card class exactly; decorated variants such
// as "SFcrdFtr" belong to other widgets. Classification is looser.
static SEL_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class="SFcrd"]"#).expect("invalid selector: SFcrd"));
static SEL_CONTACT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="SFbizctc"]"#).expect("invalid selector: SFbizctc"));
static SEL_NAME: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"h3[itemprop="name"]"#).expect("invalid selector: h3[itemprop=name]")
});

/// Walk a Storefront card directory.
///
/// The listing only materializes client-side and keeps appending cards as
/// you scroll, so the root is rendered under the browser and scrolled
/// until the page stops growing. Profile pages render under the browser
/// too, with their own settle pause.
pub async fn walk(browser: &DirectoryBrowser, sink: &RecordSink, root: &Url) -> WalkStats {
    let body = match browser.render_scrolled(root.as_str()) {
        Ok(body) => body,
        Err(err) => {
            warn!("Could not render storefront listing: {err:#}");
            String::new()
        }
    };

    let links = collect_card_links(&body, root);
    info!("Found {} storefront cards", links.len());

    let mut stats = WalkStats {
        links: links.len(),
        ..Default::default()
    };

    for link in &links {
        let body = match browser.render_profile(link) {
            Ok(body) => body,
            Err(err) => {
                warn!("Skipping profile {link}: {err:#}");
                stats.skipped += 1;
                continue;
            }
        };

        let record = parse_profile(&body);
        debug!("Extracted: {record:?}");
        stats.tally(sink.submit(&record).await);
    }

    stats
}

/// Profile links from the fully scrolled listing. Each card is itself an
/// anchor; cards without an href are skipped.
fn collect_card_links(body: &str, root: &Url) -> Vec<String> {
    let doc = Html::parse_document(body);
    let mut links = Vec::new();
    for card in doc.select(&SEL_CARD) {
        let Some(href) = card.value().attr("href") else {
            continue;
        };
        match root.join(href) {
            Ok(url) => links.push(url.to_string()),
            Err(err) => warn!("Skipping unresolvable card link {href}: {err}"),
        }
    }
    links
}

/// Contact fields from one storefront profile.
///
/// Name and microdata all sit inside the business contact block; a page
/// without the block yields an all-empty record.
fn parse_profile(body: &str) -> BusinessRecord {
    let doc = Html::parse_document(body);
    let Some(scope) = doc.select(&SEL_CONTACT).next() else {
        return BusinessRecord::default();
    };

    let name = scope
        .select(&SEL_NAME)
        .next()
        .map(fields::stripped_text)
        .unwrap_or_default();

    BusinessRecord::new(
        name,
        fields::microdata_website(scope),
        fields::microdata_phone(scope),
        fields::microdata_address(scope),
    )
}
