use crate::service::visibility::is_live;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content categories. The set is fixed; posts outside it are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    Notice,
    Goodmorning,
    Report,
    Photo,
    Intro,
    Library,
    Csr,
}

impl Board {
    pub const ALL: [Board; 7] = [
        Board::Notice,
        Board::Goodmorning,
        Board::Report,
        Board::Photo,
        Board::Intro,
        Board::Library,
        Board::Csr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Board::Notice => "notice",
            Board::Goodmorning => "goodmorning",
            Board::Report => "report",
            Board::Photo => "photo",
            Board::Intro => "intro",
            Board::Library => "library",
            Board::Csr => "csr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Board::Notice => "협회 소식",
            Board::Goodmorning => "굿모닝 KPII",
            Board::Report => "보고서·자료실",
            Board::Photo => "포토 뉴스",
            Board::Intro => "협회소개",
            Board::Library => "자료실",
            Board::Csr => "사회공헌활동",
        }
    }

    /// How many posts the home page shows for this board.
    pub fn display_limit(self) -> u32 {
        match self {
            Board::Notice => 5,
            Board::Goodmorning => 1,
            Board::Report | Board::Photo | Board::Intro => 3,
            Board::Library | Board::Csr => 20,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBoard(pub String);

impl fmt::Display for UnknownBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown board: {}", self.0)
    }
}

impl std::error::Error for UnknownBoard {}

impl FromStr for Board {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownBoard(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Banner {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub order_index: i64,
}

impl Banner {
    pub fn is_live(&self, as_of: NaiveDate) -> bool {
        is_live(as_of, self.start_date, self.end_date)
    }
}

/// Fields of a banner before it has an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBanner {
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link_url: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub order_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub board: Board,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Raw timestamp text. Scraped rows keep the source's own date string.
    pub created_at: String,
}

impl Post {
    pub fn is_live(&self, as_of: NaiveDate) -> bool {
        is_live(as_of, self.start_date, self.end_date)
    }

    /// Date shown next to the post: `start_date`, which is always set for
    /// stored rows, formatted as `YYYY-MM-DD`.
    pub fn display_date(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    /// First `max_chars` characters of the content, with `...` appended when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    pub board: Board,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Insertion time is used when absent.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredential {
    pub username: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> Post {
        Post {
            id: 1,
            board: Board::Notice,
            title: "t".into(),
            content: content.into(),
            image_url: None,
            link_url: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
            created_at: "2025-01-01 09:00:00".into(),
        }
    }

    #[test]
    fn board_parses_only_known_names() {
        for board in Board::ALL {
            assert_eq!(board.as_str().parse::<Board>(), Ok(board));
        }
        assert_eq!(
            "members".parse::<Board>(),
            Err(UnknownBoard("members".to_string()))
        );
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let p = post("한국프로세스혁신협회");
        assert_eq!(p.excerpt(4), "한국프로...");
        assert_eq!(p.excerpt(10), "한국프로세스혁신협회");
    }
}
