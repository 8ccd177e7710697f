//! Extraction of the board listing table.
//!
//! The page holds one `<table>` whose `<tbody>` rows look like
//! `[number, title anchor, writer, created date, ...]`. Scanning is
//! case-insensitive and tolerant: a page without the table, the body, or any
//! row with at least four cells yields no rows rather than an error.

use crate::db::{Board, NewPost};
use crate::db::sqlite::now_timestamp;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>").expect("valid regex"));
static TBODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tbody\b[^>]*>(.*?)</tbody\s*>").expect("valid regex"));
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("valid regex"));
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("valid regex"));
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a\s*>"#)
        .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// One listing row as it appears on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub title: String,
    /// Raw `href`, possibly relative.
    pub href: Option<String>,
    pub writer: String,
    pub created: String,
}

pub fn parse_listing(html: &str) -> Vec<ListingRow> {
    let Some(table) = TABLE_RE.captures(html).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    let Some(tbody) = TBODY_RE.captures(table.as_str()).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    ROW_RE
        .captures_iter(tbody.as_str())
        .filter_map(|row| {
            let cells: Vec<&str> = CELL_RE
                .captures_iter(row.get(1)?.as_str())
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            if cells.len() < 4 {
                return None;
            }
            let (title, href) = match ANCHOR_RE.captures(cells[1]) {
                Some(a) => {
                    let href = a
                        .get(1)
                        .or_else(|| a.get(2))
                        .map(|m| decode_entities(m.as_str().trim()))
                        .filter(|h| !h.is_empty());
                    let text = a.get(3).map_or("", |m| m.as_str());
                    (text_content(text), href)
                }
                None => (text_content(cells[1]), None),
            };
            if title.is_empty() {
                return None;
            }
            Some(ListingRow {
                title,
                href,
                writer: text_content(cells[2]),
                created: text_content(cells[3]),
            })
        })
        .collect()
}

/// Make a scraped link absolute. Root-relative links get the page origin,
/// other relative links are joined onto the page path.
pub fn resolve_link(page: &Url, href: &str) -> Option<String> {
    page.join(href).ok().map(String::from)
}

/// Leading `YYYY-MM-DD` (also `.` or `/` separated) of the date text.
pub fn leading_date(text: &str) -> Option<NaiveDate> {
    let head: String = text.trim().chars().take(10).collect();
    ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&head, fmt).ok())
}

impl ListingRow {
    /// Map to a csr post. Dates that cannot be read fall back to `today`.
    pub fn into_post(self, page: &Url, today: NaiveDate) -> NewPost {
        let link_url = self.href.as_deref().and_then(|h| resolve_link(page, h));
        let start_date = leading_date(&self.created).unwrap_or(today);
        let created_at = if self.created.is_empty() {
            now_timestamp()
        } else {
            self.created
        };
        NewPost {
            board: Board::Csr,
            title: self.title,
            content: format!("작성자: {}", self.writer),
            image_url: None,
            link_url,
            start_date,
            end_date: None,
            created_at: Some(created_at),
        }
    }
}

fn text_content(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<TABLE class="board">
  <thead><tr><th>번호</th><th>제목</th><th>작성자</th><th>작성일</th></tr></thead>
  <TBODY>
    <tr>
      <td>12</td>
      <td class="subject"><a href="/article/csr/8/120/">연탄 나눔 &amp; 봉사</a></td>
      <td><span>관리자</span></td>
      <td>2025-11-20 10:31</td>
      <td>41</td>
    </tr>
    <tr><td>11</td><td><a href='view.php?no=11'>  김장   봉사 </a></td><td>운영팀</td><td>2025.10.02</td></tr>
    <tr><td colspan="4">공지 없음</td></tr>
  </TBODY>
</TABLE>
</body></html>"#;

    #[test]
    fn extracts_rows_with_four_or_more_cells() {
        let rows = parse_listing(PAGE);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "연탄 나눔 & 봉사");
        assert_eq!(rows[0].href.as_deref(), Some("/article/csr/8/120/"));
        assert_eq!(rows[0].writer, "관리자");
        assert_eq!(rows[0].created, "2025-11-20 10:31");
        assert_eq!(rows[1].title, "김장 봉사");
        assert_eq!(rows[1].href.as_deref(), Some("view.php?no=11"));
    }

    #[test]
    fn missing_table_or_body_yields_nothing() {
        assert!(parse_listing("<p>maintenance</p>").is_empty());
        assert!(parse_listing("<table><tr><td>a</td></tr></table>").is_empty());
        assert!(parse_listing("<table><tbody></tbody></table>").is_empty());
    }

    #[test]
    fn links_resolve_against_the_page() {
        let page = Url::parse("https://kpii.or.kr/board/csr/list.html").unwrap();
        assert_eq!(
            resolve_link(&page, "/article/csr/8/120/").as_deref(),
            Some("https://kpii.or.kr/article/csr/8/120/")
        );
        assert_eq!(
            resolve_link(&page, "view.php?no=11").as_deref(),
            Some("https://kpii.or.kr/board/csr/view.php?no=11")
        );
        assert_eq!(
            resolve_link(&page, "https://other.example/x").as_deref(),
            Some("https://other.example/x")
        );
    }

    #[test]
    fn row_maps_to_csr_post() {
        let page = Url::parse("https://kpii.or.kr/board/csr/list.html").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let post = parse_listing(PAGE).remove(0).into_post(&page, today);
        assert_eq!(post.board, Board::Csr);
        assert_eq!(post.content, "작성자: 관리자");
        assert_eq!(
            post.link_url.as_deref(),
            Some("https://kpii.or.kr/article/csr/8/120/")
        );
        assert_eq!(post.start_date, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
        assert_eq!(post.created_at.as_deref(), Some("2025-11-20 10:31"));
    }

    #[test]
    fn unreadable_date_falls_back_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(leading_date("어제"), None);
        let row = ListingRow {
            title: "t".into(),
            href: None,
            writer: "w".into(),
            created: "어제".into(),
        };
        let page = Url::parse("https://kpii.or.kr/").unwrap();
        let post = row.into_post(&page, today);
        assert_eq!(post.start_date, today);
        assert_eq!(post.link_url, None);
    }
}
