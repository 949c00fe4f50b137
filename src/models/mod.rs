use std::fmt;

/// Which known directory template a root page matches
///
/// Markers are probed in this order; the first one present wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    /// GrowthZone member directory: one `gz-cards` listing page, no pagination
    GrowthZone,
    /// `cca*`-class member directory: paginated listing chained by a next link
    Cca,
    /// Storefront card directory: infinite scroll, `SFcrd` profile cards
    Storefront,
    /// None of the known markers matched
    Unknown,
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectoryKind::GrowthZone => "GrowthZone",
            DirectoryKind::Cca => "CCA",
            DirectoryKind::Storefront => "Storefront",
            DirectoryKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Street-level postal address split into its submission fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// One business listing extracted from a directory profile page
///
/// Every field degrades to an empty string when the page does not carry it.
/// Records are handed to the storage API as soon as they are assembled and
/// not kept around afterwards; deduplication happens server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessRecord {
    pub name: String,
    pub website: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub notes: String,
}

impl BusinessRecord {
    /// Assemble a record from extracted contact fields. Email and notes
    /// start empty; none of the known directories carry either.
    pub fn new(name: String, website: String, phone: String, address: PostalAddress) -> Self {
        Self {
            name,
            website,
            phone,
            email: String::new(),
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            notes: String::new(),
        }
    }
}
