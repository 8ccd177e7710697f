use super::listing::parse_listing;
use super::source::ListingSource;
use crate::db::{Board, ContentStore, NewPost};
use crate::error::HomepageError;
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub scraped: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Import the listing into the csr board. With `skip_existing`, rows whose
/// title and link are already stored are left out. No retry: a failed fetch
/// is returned to the caller, who may run it again later.
pub async fn migrate_csr<S: ListingSource>(
    store: &ContentStore,
    source: &S,
    skip_existing: bool,
) -> Result<MigrationReport, HomepageError> {
    let html = source.fetch_page().await?;
    let rows = parse_listing(&html);
    let today = Local::now().date_naive();

    let mut report = MigrationReport {
        scraped: rows.len(),
        ..MigrationReport::default()
    };
    if rows.is_empty() {
        warn!(url = %source.page_url(), "csr listing had no usable rows");
        return Ok(report);
    }

    let mut posts: Vec<NewPost> = Vec::with_capacity(rows.len());
    for row in rows {
        let post = row.into_post(source.page_url(), today);
        if skip_existing
            && store
                .post_exists(Board::Csr, &post.title, post.link_url.as_deref())
                .await?
        {
            report.skipped += 1;
            continue;
        }
        posts.push(post);
    }
    // Oldest first, so ids grow with the listing's own order on equal dates.
    posts.reverse();

    let ids = store.insert_posts(&posts).await?;
    report.inserted = ids.len();
    info!(
        scraped = report.scraped,
        inserted = report.inserted,
        skipped = report.skipped,
        "csr migration finished"
    );
    Ok(report)
}

/// Startup gate: import only while the csr board is empty. Returns `None`
/// when the board already has posts.
pub async fn migrate_csr_if_empty<S: ListingSource>(
    store: &ContentStore,
    source: &S,
) -> Result<Option<MigrationReport>, HomepageError> {
    if store.count_posts(Board::Csr).await? > 0 {
        return Ok(None);
    }
    migrate_csr(store, source, false).await.map(Some)
}
