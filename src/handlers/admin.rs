use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{Local, Utc};
use tower_sessions::Session;

use crate::db::Banner;
use crate::scrape::MigrationReport;
use crate::service::{AdminSession, SessionContext, authorize};
use crate::types::api::{
    BannerForm, ChangePasswordRequest, Created, Deleted, LoginRequest, PostForm, SessionStatus,
};
use crate::{HomepageError, router::HomepageState};

/// Login state of the caller; an absent session reads as logged out.
async fn admin_of(session: &Session) -> Result<AdminSession, HomepageError> {
    Ok(SessionContext::load(session)
        .await?
        .map(|ctx| ctx.admin)
        .unwrap_or_default())
}

/// POST /api/admin/login
///
/// The session id is replaced on success so an id handed out before login
/// never carries admin rights.
pub async fn login(
    State(state): State<HomepageState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionStatus>, HomepageError> {
    let mut ctx = SessionContext::load_or_new(&session, Utc::now()).await?;
    state
        .admin
        .login(&mut ctx.admin, &req.username, &req.password)
        .await?;
    session.cycle_id().await?;
    ctx.save(&session).await?;
    Ok(Json(SessionStatus::from(&ctx.admin)))
}

/// POST /api/admin/logout -> drops the whole session, rotation included.
pub async fn logout(
    State(state): State<HomepageState>,
    session: Session,
) -> Result<Json<SessionStatus>, HomepageError> {
    if let Some(mut ctx) = SessionContext::load(&session).await? {
        state.admin.logout(&mut ctx.admin);
    }
    session.flush().await?;
    Ok(Json(SessionStatus {
        is_admin: false,
        admin_username: None,
    }))
}

/// GET /api/admin/session
pub async fn status(session: Session) -> Result<Json<SessionStatus>, HomepageError> {
    let admin = admin_of(&session).await?;
    Ok(Json(SessionStatus::from(&admin)))
}

/// POST /api/admin/password
pub async fn change_password(
    State(state): State<HomepageState>,
    session: Session,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<SessionStatus>, HomepageError> {
    let admin = admin_of(&session).await?;
    state
        .admin
        .change_password(
            &admin,
            &req.current_password,
            &req.new_password,
            &req.confirm_password,
        )
        .await?;
    Ok(Json(SessionStatus::from(&admin)))
}

/// GET /api/admin/banners -> every banner, live or not.
pub async fn list_banners(
    State(state): State<HomepageState>,
    session: Session,
) -> Result<Json<Vec<Banner>>, HomepageError> {
    let admin = admin_of(&session).await?;
    Ok(Json(state.admin.list_all_banners(&admin).await?))
}

/// POST /api/admin/banners
pub async fn create_banner(
    State(state): State<HomepageState>,
    session: Session,
    Json(form): Json<BannerForm>,
) -> Result<Json<Created>, HomepageError> {
    let admin = admin_of(&session).await?;
    let banner = form.into_new_banner(Local::now().date_naive());
    let id = state.admin.insert_banner(&admin, &banner).await?;
    Ok(Json(Created { id }))
}

/// DELETE /api/admin/banners/{id}
pub async fn delete_banner(
    State(state): State<HomepageState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, HomepageError> {
    let admin = admin_of(&session).await?;
    let removed = state.admin.delete_banner(&admin, id).await?;
    Ok(Json(Deleted { id, removed }))
}

/// POST /api/admin/posts
pub async fn create_post(
    State(state): State<HomepageState>,
    session: Session,
    Json(form): Json<PostForm>,
) -> Result<Json<Created>, HomepageError> {
    let admin = admin_of(&session).await?;
    let post = form.into_new_post(Local::now().date_naive());
    let id = state.admin.insert_post(&admin, &post).await?;
    Ok(Json(Created { id }))
}

/// POST /api/admin/csr/migrate -> re-import the csr listing now.
pub async fn migrate_csr(
    State(state): State<HomepageState>,
    session: Session,
) -> Result<Json<MigrationReport>, HomepageError> {
    let admin = admin_of(&session).await?;
    authorize(&admin)?;
    let source = state
        .listing
        .as_ref()
        .ok_or_else(|| HomepageError::Scrape("no csr listing source configured".to_string()))?;
    Ok(Json(state.admin.migrate_csr(&admin, &**source).await?))
}
