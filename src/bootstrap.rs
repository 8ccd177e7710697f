use crate::db::{ContentStore, SeedReport};
use crate::error::HomepageError;
use crate::scrape::{ListingSource, migrate_csr_if_empty};
use tracing::{info, warn};

/// Run once at process start: schema, seed data, then the csr import while
/// that board is still empty. Storage failures are fatal; a failing listing
/// source only costs the import, which the next start will try again.
pub async fn initialize<S: ListingSource>(
    store: &ContentStore,
    source: Option<&S>,
) -> Result<SeedReport, HomepageError> {
    let seeded = store.init_schema().await?;

    let Some(source) = source else {
        info!("no csr listing source configured; skipping csr migration");
        return Ok(seeded);
    };

    match migrate_csr_if_empty(store, source).await {
        Ok(Some(report)) => {
            info!(inserted = report.inserted, "csr board migrated from listing");
        }
        Ok(None) => {
            info!("csr board already populated; migration not needed");
        }
        Err(e) if e.is_scrape() => {
            warn!(url = %source.page_url(), error = %e, "csr migration failed; will retry on next start");
        }
        Err(e) => return Err(e),
    }
    Ok(seeded)
}
