use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Local, Utc};
use tower_sessions::Session;

use crate::db::{Banner, Board, Post};
use crate::service::SessionContext;
use crate::service::homepage::{BannerView, HomeSnapshot, current_banner, load_snapshot};
use crate::types::api::{AsOfQuery, BoardQuery, RotateRequest};
use crate::{HomepageError, router::HomepageState};

const MAX_BOARD_LIMIT: u32 = 100;

/// GET /api/home -> one refresh cycle for the caller's session.
///
/// A first visit only gets a session once there is something to rotate.
pub async fn home(
    State(state): State<HomepageState>,
    session: Session,
) -> Result<Json<HomeSnapshot>, HomepageError> {
    let now = Utc::now();
    let stored = SessionContext::load(&session).await?;
    let mut ctx = stored.clone().unwrap_or_else(|| SessionContext::new(now));

    let today = Local::now().date_naive();
    let snapshot = load_snapshot(
        &state.store,
        &mut ctx.rotation,
        today,
        now,
        state.auto_advance,
    )
    .await?;

    let rotating = snapshot.banner.as_ref().is_some_and(|b| b.count > 1);
    let changed = stored.as_ref().is_some_and(|s| *s != ctx);
    if changed || (stored.is_none() && rotating) {
        ctx.save(&session).await?;
    }
    Ok(Json(snapshot))
}

/// GET /api/banners?as_of=YYYY-MM-DD -> banners live on that day (default today).
pub async fn live_banners(
    State(state): State<HomepageState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<Vec<Banner>>, HomepageError> {
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(state.store.list_banners(as_of).await?))
}

/// POST /api/banners/rotate -> step the session's banner and return it.
pub async fn rotate_banner(
    State(state): State<HomepageState>,
    session: Session,
    Json(req): Json<RotateRequest>,
) -> Result<Json<Option<BannerView>>, HomepageError> {
    let live = state.store.list_banners(Local::now().date_naive()).await?;
    let mut ctx = SessionContext::load_or_new(&session, Utc::now()).await?;
    if ctx.rotation.advance(req.direction, live.len()).is_some() {
        ctx.save(&session).await?;
    }
    Ok(Json(current_banner(&mut ctx.rotation, live)))
}

/// GET /api/boards/{board}?limit=n&as_of=YYYY-MM-DD -> newest posts of a board.
///
/// The date filter looks at the newest `MAX_BOARD_LIMIT` posts.
pub async fn board_posts(
    State(state): State<HomepageState>,
    Path(board): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Vec<Post>>, HomepageError> {
    let board: Board = board
        .parse()
        .map_err(|e: crate::db::models::UnknownBoard| HomepageError::validation(e.to_string()))?;
    let limit = query
        .limit
        .unwrap_or_else(|| board.display_limit())
        .min(MAX_BOARD_LIMIT);
    let Some(as_of) = query.as_of else {
        return Ok(Json(state.store.list_posts(board, limit).await?));
    };
    let mut posts = state.store.list_posts(board, MAX_BOARD_LIMIT).await?;
    posts.retain(|p| p.is_live(as_of));
    posts.truncate(limit as usize);
    Ok(Json(posts))
}
