//! Read side of a page refresh: what the view layer renders.

use crate::db::{Banner, Board, ContentStore, Post};
use crate::error::HomepageError;
use crate::service::rotation::BannerRotation;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

/// The banner currently on display, with its place in the live set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BannerView {
    pub index: usize,
    pub count: usize,
    pub banner: Banner,
}

/// Post as shown in a board listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub date: String,
    pub excerpt: String,
}

impl PostCard {
    /// Excerpt lengths follow the home page layout of each board.
    pub fn from_post(post: &Post) -> Self {
        let excerpt = match post.board {
            Board::Intro => post.content.clone(),
            Board::Goodmorning => post.excerpt(80),
            Board::Library => post.excerpt(100),
            Board::Csr => post.excerpt(120),
            Board::Notice | Board::Report | Board::Photo => post.excerpt(60),
        };
        Self {
            id: post.id,
            title: post.title.clone(),
            image_url: post.image_url.clone().filter(|s| !s.is_empty()),
            link_url: post.link_url.clone().filter(|s| !s.is_empty()),
            date: post.display_date(),
            excerpt,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSection {
    pub board: Board,
    pub label: &'static str,
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeSnapshot {
    pub as_of: NaiveDate,
    pub banner: Option<BannerView>,
    pub boards: Vec<BoardSection>,
}

/// Apply the rotation to a freshly loaded live set: clamp, then pick.
pub fn current_banner(rotation: &mut BannerRotation, live: Vec<Banner>) -> Option<BannerView> {
    let count = live.len();
    let index = rotation.clamp(count)?;
    let banner = live.into_iter().nth(index)?;
    Some(BannerView {
        index,
        count,
        banner,
    })
}

/// One refresh cycle: load today's live banners, tick the auto-advance,
/// clamp, and collect every board at its display limit.
pub async fn load_snapshot(
    store: &ContentStore,
    rotation: &mut BannerRotation,
    as_of: NaiveDate,
    now: DateTime<Utc>,
    interval: Duration,
) -> Result<HomeSnapshot, HomepageError> {
    let live = store.list_banners(as_of).await?;
    rotation.auto_advance(now, live.len(), interval);
    let banner = current_banner(rotation, live);

    let mut boards = Vec::with_capacity(Board::ALL.len());
    for board in Board::ALL {
        let posts = store.list_posts(board, board.display_limit()).await?;
        boards.push(BoardSection {
            board,
            label: board.label(),
            posts: posts.iter().map(PostCard::from_post).collect(),
        });
    }

    Ok(HomeSnapshot {
        as_of,
        banner,
        boards,
    })
}
