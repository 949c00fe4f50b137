use crate::models::PostalAddress;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// Microdata markers used by GrowthZone and Storefront profile pages.
static SEL_TELEPHONE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop="telephone"]"#).expect("invalid selector: telephone")
});
static SEL_STREET: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop*="streetAddress"]"#).expect("invalid selector: streetAddress")
});
static SEL_LOCALITY: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop*="addressLocality"]"#).expect("invalid selector: addressLocality")
});
static SEL_REGION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop*="addressRegion"]"#).expect("invalid selector: addressRegion")
});
static SEL_POSTAL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop*="postalCode"]"#).expect("invalid selector: postalCode")
});
static SEL_WEBSITE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[itemprop="url"]"#).expect("invalid selector: url"));

// Block markers used by CCA profile pages.
static SEL_CCA_PHONE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="ccaPhone"]"#).expect("invalid selector: ccaPhone"));
static SEL_CCA_ADDR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="ccaAddr"]"#).expect("invalid selector: ccaAddr"));
static SEL_CCA_WEB: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[class*="ccaWebAddr"]"#).expect("invalid selector: ccaWebAddr")
});

/// Element text with every text node trimmed and concatenated.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(stripped_text)
        .unwrap_or_default()
}

/// Group a phone number's digits as NNN-NNN-NNNN, dropping everything else.
///
/// The separator lands whenever the accumulated output reaches lengths 3 and
/// 7, so short numbers keep a partial shape: `123` becomes `123-` and seven
/// digits become `123-456-7`.
fn group_phone_digits(raw: &str) -> String {
    let mut grouped = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() {
            grouped.push(c);
            if grouped.len() == 3 || grouped.len() == 7 {
                grouped.push('-');
            }
        }
    }
    grouped
}

/// Canonical state spelling: any casing of "tx" or "texas" becomes "Texas";
/// everything else passes through untouched.
fn normalize_state(state: String) -> String {
    if state.eq_ignore_ascii_case("tx") || state.eq_ignore_ascii_case("texas") {
        "Texas".to_string()
    } else {
        state
    }
}

/// Phone number from the microdata telephone marker inside `scope`.
pub fn microdata_phone(scope: ElementRef<'_>) -> String {
    scope
        .select(&SEL_TELEPHONE)
        .next()
        .map(|el| group_phone_digits(&stripped_text(el)))
        .unwrap_or_default()
}

/// Postal address from the four microdata address markers inside `scope`.
/// Each component falls back to an empty string on its own.
pub fn microdata_address(scope: ElementRef<'_>) -> PostalAddress {
    PostalAddress {
        street: first_text(scope, &SEL_STREET),
        city: first_text(scope, &SEL_LOCALITY),
        state: normalize_state(first_text(scope, &SEL_REGION)),
        postal_code: first_text(scope, &SEL_POSTAL),
    }
}

/// Website link target from the microdata url marker inside `scope`.
pub fn microdata_website(scope: ElementRef<'_>) -> String {
    scope
        .select(&SEL_WEBSITE)
        .next()
        .and_then(|el| el.value().attr("href"))
        .unwrap_or_default()
        .to_string()
}

/// Phone text from a `ccaPhone` block, passed through as displayed.
pub fn cca_phone(doc: &Html) -> String {
    doc.select(&SEL_CCA_PHONE)
        .next()
        .map(stripped_text)
        .unwrap_or_default()
}

/// Website text from a `ccaWebAddr` block.
pub fn cca_website(doc: &Html) -> String {
    doc.select(&SEL_CCA_WEB)
        .next()
        .map(stripped_text)
        .unwrap_or_default()
}

/// Postal address from a `ccaAddr` block.
///
/// The block's text nodes are trimmed and joined on a sentinel, then split
/// back apart: two segments are street + "City, ST 12345", three segments
/// fold the first two into the street. A block that does not fit the shape
/// yields an all-empty address rather than a partial one.
pub fn cca_address(doc: &Html) -> PostalAddress {
    let Some(el) = doc.select(&SEL_CCA_ADDR).next() else {
        return PostalAddress::default();
    };
    let joined = el
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("#");
    parse_cca_address(&joined)
}

fn parse_cca_address(joined: &str) -> PostalAddress {
    let parts: Vec<&str> = joined.split('#').collect();
    let (street, tail) = match parts[..] {
        [street, tail] => (street.to_string(), tail),
        [line1, line2, tail] => (format!("{line1} {line2}"), tail),
        _ => return PostalAddress::default(),
    };

    let segments: Vec<&str> = tail.split(',').collect();
    let Some(region) = segments.get(1) else {
        return PostalAddress::default();
    };
    let city = segments[0].to_string();

    // The region segment carries " ST 12345": the state sits two characters
    // wide, eight back from the end, and the code is the last five.
    let chars: Vec<char> = region.chars().collect();
    let n = chars.len();
    let state: String = chars[n.saturating_sub(8)..n.saturating_sub(6)].iter().collect();
    let postal_code: String = chars[n.saturating_sub(5)..].iter().collect();

    PostalAddress {
        street,
        city,
        state: normalize_state(state),
        postal_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn phone_groups_ten_digits() {
        assert_eq!(group_phone_digits("1234567890"), "123-456-7890");
    }

    #[test]
    fn phone_keeps_partial_groups_at_three_and_seven_digits() {
        assert_eq!(group_phone_digits("123"), "123-");
        assert_eq!(group_phone_digits("1234567"), "123-456-7");
    }

    #[test]
    fn phone_drops_formatting_characters() {
        assert_eq!(group_phone_digits("(903) 555-0199"), "903-555-0199");
        assert_eq!(group_phone_digits("903.555.0199 ext"), "903-555-0199");
    }

    #[test]
    fn phone_missing_marker_is_empty() {
        let document = doc("<div><span>no phone here</span></div>");
        assert_eq!(microdata_phone(document.root_element()), "");
    }

    #[test]
    fn state_spellings_canonicalize_to_texas() {
        for raw in ["tx", "TX", "texas", "Texas"] {
            assert_eq!(normalize_state(raw.to_string()), "Texas");
        }
    }

    #[test]
    fn other_states_pass_through() {
        assert_eq!(normalize_state("CA".to_string()), "CA");
        assert_eq!(normalize_state("Louisiana".to_string()), "Louisiana");
    }

    #[test]
    fn microdata_address_reads_all_four_markers() {
        let document = doc(
            r#"<div>
                <span itemprop="streetAddress">77 Commerce Way</span>
                <span itemprop="addressLocality">Tyler</span>
                <span itemprop="addressRegion">tx</span>
                <span itemprop="postalCode">75701</span>
            </div>"#,
        );
        let address = microdata_address(document.root_element());
        assert_eq!(
            address,
            PostalAddress {
                street: "77 Commerce Way".to_string(),
                city: "Tyler".to_string(),
                state: "Texas".to_string(),
                postal_code: "75701".to_string(),
            }
        );
    }

    #[test]
    fn microdata_address_components_fall_back_individually() {
        let document = doc(r#"<div><span itemprop="addressLocality">Tyler</span></div>"#);
        let address = microdata_address(document.root_element());
        assert_eq!(address.city, "Tyler");
        assert_eq!(address.street, "");
        assert_eq!(address.state, "");
        assert_eq!(address.postal_code, "");
    }

    #[test]
    fn microdata_website_reads_href() {
        let document =
            doc(r#"<div><a itemprop="url" href="https://acme.example">Website</a></div>"#);
        assert_eq!(microdata_website(document.root_element()), "https://acme.example");
    }

    #[test]
    fn microdata_website_without_href_is_empty() {
        let document = doc(r#"<div><a itemprop="url">Website</a></div>"#);
        assert_eq!(microdata_website(document.root_element()), "");
    }

    #[test]
    fn cca_phone_passes_text_through_unformatted() {
        let document = doc(r#"<div class="ccaPhone">(903) 555-0101</div>"#);
        assert_eq!(cca_phone(&document), "(903) 555-0101");
    }

    #[test]
    fn cca_website_reads_block_text() {
        let document = doc(r#"<span class="ccaWebAddr">alphahardware.example</span>"#);
        assert_eq!(cca_website(&document), "alphahardware.example");
    }

    #[test]
    fn cca_address_two_segments() {
        let document = doc(
            r#"<div class="ccaAddr"><span>12 Front St</span><span>Longview, TX 75601</span></div>"#,
        );
        assert_eq!(
            cca_address(&document),
            PostalAddress {
                street: "12 Front St".to_string(),
                city: "Longview".to_string(),
                state: "Texas".to_string(),
                postal_code: "75601".to_string(),
            }
        );
    }

    #[test]
    fn cca_address_three_segments_folds_street_lines() {
        let document = doc(
            r#"<div class="ccaAddr">
                <span>88 Commerce Way</span>
                <span>Suite 4</span>
                <span>Marshall, TX 75670</span>
            </div>"#,
        );
        let address = cca_address(&document);
        assert_eq!(address.street, "88 Commerce Way Suite 4");
        assert_eq!(address.city, "Marshall");
        assert_eq!(address.state, "Texas");
        assert_eq!(address.postal_code, "75670");
    }

    #[test]
    fn cca_address_extra_trailing_segment_still_reads_region() {
        assert_eq!(
            parse_cca_address("1 Square#Tyler, TX 75703, USA"),
            PostalAddress {
                street: "1 Square".to_string(),
                city: "Tyler".to_string(),
                state: "Texas".to_string(),
                postal_code: "75703".to_string(),
            }
        );
    }

    #[test]
    fn cca_address_wrong_shape_empties_everything() {
        assert_eq!(parse_cca_address("just one line"), PostalAddress::default());
        assert_eq!(
            parse_cca_address("12 Front St#no comma in tail"),
            PostalAddress::default()
        );
        assert_eq!(
            parse_cca_address("a#b#c#too many lines, TX 75601"),
            PostalAddress::default()
        );
    }

    #[test]
    fn cca_address_missing_block_is_empty() {
        let document = doc("<div>nothing here</div>");
        assert_eq!(cca_address(&document), PostalAddress::default());
    }
}
