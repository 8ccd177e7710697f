pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod scrape;
pub mod service;
pub mod types;

pub use db::ContentStore;
pub use error::HomepageError;
