//! Database module: models, schema and the content store.
//!
//! Layout:
//! - `models.rs`: typed rows (banners, posts, admin credentials) and boards
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `seed.rs`: first-run rows inserted into empty tables
//! - `password.rs`: argon2 hashing for admin credentials
//! - `sqlite.rs`: `ContentStore`, the only code that talks SQL

pub mod models;
pub mod password;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use models::{AdminCredential, Banner, Board, NewBanner, NewPost, Post};
pub use schema::SQLITE_INIT;
pub use seed::SeedReport;
pub use sqlite::{ContentStore, SqlitePool, connect};
