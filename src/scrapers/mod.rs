pub mod browser;
pub mod cca;
pub mod classify;
pub mod fetch;
pub mod fields;
pub mod growthzone;
pub mod storefront;
pub mod types;

pub use browser::DirectoryBrowser;
pub use classify::classify;
pub use types::WalkStats;
