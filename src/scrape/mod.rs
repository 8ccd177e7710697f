//! Social contribution (csr) listing import.
//!
//! - `listing.rs`: pure HTML table extraction and row -> post mapping
//! - `source.rs`: `ListingSource` seam and the HTTP implementation
//! - `migrate.rs`: writes scraped rows into the csr board

pub mod listing;
pub mod migrate;
pub mod source;

pub use listing::{ListingRow, parse_listing, resolve_link};
pub use migrate::{MigrationReport, migrate_csr, migrate_csr_if_empty};
pub use source::{HttpListingSource, ListingSource};
