use crate::models::DirectoryKind;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static SEL_GROWTHZONE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="gz-cards"]"#).expect("invalid selector: gz-cards"));
static SEL_CCA: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*=" ccaMemListing "]"#).expect("invalid selector: ccaMemListing")
});
static SEL_STOREFRONT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="SFcrd"]"#).expect("invalid selector: SFcrd"));

/// Match a fetched directory root page against the known templates.
///
/// Structural markers are probed in fixed priority order; the first one with
/// at least one matching element wins. A page with none of them is
/// `Unknown`; classification itself never fails.
pub fn classify(doc: &Html) -> DirectoryKind {
    if doc.select(&SEL_GROWTHZONE).next().is_some() {
        return DirectoryKind::GrowthZone;
    }
    if doc.select(&SEL_CCA).next().is_some() {
        return DirectoryKind::Cca;
    }
    if doc.select(&SEL_STOREFRONT).next().is_some() {
        return DirectoryKind::Storefront;
    }
    DirectoryKind::Unknown
}
