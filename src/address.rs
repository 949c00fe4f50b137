//! Zip-anchored recovery of street addresses from free-form text.
//!
//! Anchors on occurrences of known postal codes and walks backwards through
//! the preceding street text and house number. This is a standalone pass
//! over saved page text; the live walkers read their address fields from
//! page markup instead. The fixture harness in the tests below drives it.

/// Find the earliest occurrence of any known code at or after `from`.
/// Ties at the same position keep the code declared first in `codes`.
fn find_code<'c, S: AsRef<str>>(
    chars: &[char],
    codes: &'c [S],
    from: usize,
) -> Option<(usize, &'c str)> {
    let tail = chars.get(from..).unwrap_or(&[]);
    let mut earliest: Option<(usize, &str)> = None;

    for code in codes {
        let code = code.as_ref();
        let needle: Vec<char> = code.chars().collect();
        if needle.is_empty() {
            continue;
        }
        let Some(offset) = tail.windows(needle.len()).position(|w| w == needle) else {
            continue;
        };
        let at = from + offset;
        if earliest.map_or(true, |(best, _)| at < best) {
            earliest = Some((at, code));
        }
    }

    earliest
}

/// One extraction step over a character sequence.
///
/// Finds the earliest known postal code at or after `cursor`, then scans
/// backwards: first over non-digit street text, then over the digit run of
/// the house number. Returns the recovered address and the cursor just past
/// the matched code, or `None` when no known code occurs again.
///
/// The backward scan stops at the first digit-run boundary, so a unit number
/// sitting between street and city ("Suite 5, ...") truncates the address to
/// that run. With no digits before the code at all, the whole non-digit
/// prefix is kept. Both are inherited behavior of the scan, not accidents.
pub fn next_address<S: AsRef<str>>(
    chars: &[char],
    codes: &[S],
    cursor: usize,
) -> Option<(String, usize)> {
    let (at, code) = find_code(chars, codes, cursor)?;

    let mut span: Vec<char> = Vec::new();
    let mut i = at;

    // Street text: walk back over everything that is not a digit.
    while i > 0 && !chars[i - 1].is_ascii_digit() {
        span.push(chars[i - 1]);
        i -= 1;
    }
    // House number: keep walking while the digits last.
    while i > 0 && chars[i - 1].is_ascii_digit() {
        span.push(chars[i - 1]);
        i -= 1;
    }

    span.reverse();
    let mut address: String = span.into_iter().collect();
    address.push_str(code);

    Some((address, at + code.chars().count()))
}

/// Recover every zip-anchored address in `text`, in reading order.
///
/// Single forward pass: the cursor strictly advances past each matched code,
/// so every occurrence is consumed at most once and the scan always ends.
pub fn extract_addresses<S: AsRef<str>>(text: &str, codes: &[S]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some((address, next)) = next_address(&chars, codes, cursor) {
        found.push(address);
        cursor = next;
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn chars_of(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn load_zip_list() -> Vec<String> {
        fs::read_to_string("fixtures/east_texas_zips.txt")
            .expect("zip list fixture should be readable")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    #[test]
    fn recovers_full_span_from_house_number_through_code() {
        let text = "Come visit us at 1234 Maple Street, Longview, TX 75601 during business hours.";
        assert_eq!(
            extract_addresses(text, &["75601"]),
            vec!["1234 Maple Street, Longview, TX 75601"]
        );
    }

    #[test]
    fn no_known_code_yields_empty_result() {
        let text = "No addresses here, just prose about storefronts and trails.";
        assert!(extract_addresses(text, &["75601", "75644"]).is_empty());
    }

    #[test]
    fn empty_code_list_yields_empty_result() {
        let codes: [&str; 0] = [];
        assert!(extract_addresses("1234 Maple Street, Longview, TX 75601", &codes).is_empty());
    }

    #[test]
    fn repeated_scan_is_idempotent() {
        let text = "Office: 12 Pine St, Tyler, TX 75703. Warehouse: 9 Elm Rd, Gilmer, TX 75644.";
        let codes = ["75703", "75644"];
        let first = extract_addresses(text, &codes);
        let second = extract_addresses(text, &codes);
        assert_eq!(first, second);
    }

    #[test]
    fn every_result_ends_with_a_known_code() {
        let text = "Office: 12 Pine St, Tyler, TX 75703. Warehouse: 9 Elm Rd, Gilmer, TX 75644.";
        let codes = ["75703", "75644"];
        let found = extract_addresses(text, &codes);
        assert_eq!(found.len(), 2);
        for address in &found {
            assert!(
                codes.iter().any(|code| address.ends_with(code)),
                "address {address:?} does not end with a known code"
            );
        }
    }

    #[test]
    fn step_cursor_advances_strictly() {
        let text = "Office: 12 Pine St, Tyler, TX 75703. Warehouse: 9 Elm Rd, Gilmer, TX 75644.";
        let codes = ["75703", "75644"];
        let chars = chars_of(text);
        let mut cursor = 0;
        let mut steps = 0;
        while let Some((_, next)) = next_address(&chars, &codes, cursor) {
            assert!(next > cursor, "cursor went from {cursor} to {next}");
            cursor = next;
            steps += 1;
        }
        assert_eq!(steps, 2);
    }

    #[test]
    fn code_at_start_of_text_yields_bare_code() {
        assert_eq!(
            extract_addresses("75601 is the downtown area", &["75601"]),
            vec!["75601"]
        );
    }

    #[test]
    fn code_without_leading_digits_keeps_nondigit_prefix() {
        let text = "Welcome to Longview TX 75601";
        assert_eq!(
            extract_addresses(text, &["75601"]),
            vec!["Welcome to Longview TX 75601"]
        );
    }

    #[test]
    fn repeated_code_consumed_once_per_occurrence() {
        let found = extract_addresses("75601 and 75601", &["75601"]);
        assert_eq!(found, vec!["75601", "75601 and 75601"]);
    }

    #[test]
    fn earliest_occurrence_wins_over_declaration_order() {
        let text = "First 11 A St, Tyler, TX 75601 then 22 B Ave, Gilmer, TX 75701";
        let found = extract_addresses(text, &["75701", "75601"]);
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("75601"));
        assert!(found[1].ends_with("75701"));
    }

    #[test]
    fn same_position_tie_keeps_first_declared_code() {
        // A code that is a prefix of another matches at the same index;
        // declaration order decides which one anchors the address.
        let text = "Shop at 44 Dock Rd, Longview, TX 75601 today";
        assert_eq!(
            extract_addresses(text, &["756", "75601"]),
            vec!["44 Dock Rd, Longview, TX 756"]
        );
        assert_eq!(
            extract_addresses(text, &["75601", "756"]),
            vec!["44 Dock Rd, Longview, TX 75601"]
        );
    }

    #[test]
    fn suffixed_code_matches_at_its_own_position() {
        let text = "Stop by 1550 N. Main Street, Jacksonville, TX 75766-1420 today.";
        assert_eq!(
            extract_addresses(text, &["75766"]),
            vec!["1550 N. Main Street, Jacksonville, TX 75766"]
        );
    }

    #[test]
    fn unit_number_truncates_to_nearest_digit_run() {
        let text = "78 Riverbend Road, Suite 5, Marshall, TX 75670";
        assert_eq!(extract_addresses(text, &["75670"]), vec!["5, Marshall, TX 75670"]);
    }

    #[test]
    fn empty_code_entries_are_ignored() {
        let text = "Come by 1234 Maple Street, Longview, TX 75601 anytime.";
        assert_eq!(
            extract_addresses(text, &["", "75601"]),
            vec!["1234 Maple Street, Longview, TX 75601"]
        );
    }

    #[test]
    fn fixture_profile_yields_expected_addresses() {
        let text = fs::read_to_string("fixtures/member_profile.txt")
            .expect("profile fixture should be readable");
        let codes = load_zip_list();
        let found = extract_addresses(&text, &codes);
        assert_eq!(
            found,
            vec![
                "1234 Maple Street, Longview, TX 75601",
                "22 Magnolia Drive, Henderson, TX 75652",
                "5, Marshall, TX 75670",
                "304 Oakwood Blvd., Tyler, TX 75703",
                "1550 N. Main Street, Jacksonville, TX 75766",
                "190 Pinecone Trail, Gilmer, TX 75644",
                "210, Kilgore, TX 75662",
                "5678 Oak Avenue,\nTyler, TX 75701",
            ]
        );
    }
}
