#![allow(dead_code)]

use kpii_homepage::HomepageError;
use kpii_homepage::db::{self, ContentStore};
use kpii_homepage::scrape::ListingSource;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// A store on a fresh temp-file database. The file is removed on drop.
pub struct TestDb {
    pub store: ContentStore,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub async fn temp_store(tag: &str) -> TestDb {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "kpii-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let pool = db::connect(&database_url)
        .await
        .expect("failed to open test database");
    TestDb {
        store: ContentStore::new(pool),
        path,
    }
}

/// Listing source serving a fixed page, or failing like an unreachable site.
pub struct StaticListing {
    pub url: Url,
    pub html: Option<String>,
}

impl StaticListing {
    pub fn page(html: &str) -> Self {
        Self {
            url: Url::parse("https://kpii.or.kr/board/csr/list.html").expect("valid url"),
            html: Some(html.to_string()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            url: Url::parse("https://kpii.or.kr/board/csr/list.html").expect("valid url"),
            html: None,
        }
    }
}

impl ListingSource for StaticListing {
    fn page_url(&self) -> &Url {
        &self.url
    }

    async fn fetch_page(&self) -> Result<String, HomepageError> {
        self.html
            .clone()
            .ok_or_else(|| HomepageError::Scrape("connection refused".to_string()))
    }
}

pub const CSR_PAGE: &str = r#"
<table class="board_list">
  <thead><tr><th>No</th><th>제목</th><th>작성자</th><th>작성일</th></tr></thead>
  <tbody>
    <tr><td>3</td><td><a href="/article/csr/8/3/">연탄 나눔 봉사</a></td><td>관리자</td><td>2025-11-20</td></tr>
    <tr><td>2</td><td><a href="/article/csr/8/2/">김장 나눔</a></td><td>운영팀</td><td>2025-10-02</td></tr>
    <tr><td>1</td><td><a href="detail.html?no=1">헌혈 캠페인</a></td><td>관리자</td><td>2025-05-14</td></tr>
  </tbody>
</table>
"#;

pub const EMPTY_PAGE: &str = r#"<table><thead><tr><th>제목</th></tr></thead><tbody></tbody></table>"#;
