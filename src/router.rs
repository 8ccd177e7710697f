use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::warn;

use crate::config::Config;
use crate::db::ContentStore;
use crate::handlers::{admin, public};
use crate::scrape::HttpListingSource;
use crate::service::{AdminConsole, SESSION_COOKIE};

const BODY_LIMIT: usize = 1024 * 1024;

/// Session cookie and store settings for the session layer.
#[derive(Clone)]
pub struct SessionSettings {
    pub store: MemoryStore,
    pub key: Key,
    pub idle_timeout: time::Duration,
    pub insecure_cookie: bool,
}

impl SessionSettings {
    pub fn new(key: Key, idle_timeout: time::Duration) -> Self {
        Self {
            store: MemoryStore::default(),
            key,
            idle_timeout,
            insecure_cookie: false,
        }
    }
}

#[derive(Clone)]
pub struct HomepageState {
    pub store: ContentStore,
    pub admin: AdminConsole,
    pub listing: Option<Arc<HttpListingSource>>,
    pub auto_advance: chrono::Duration,
    sessions: SessionSettings,
}

impl HomepageState {
    pub fn new(
        store: ContentStore,
        listing: Option<HttpListingSource>,
        auto_advance: chrono::Duration,
        sessions: SessionSettings,
    ) -> Self {
        Self {
            admin: AdminConsole::new(store.clone()),
            store,
            listing: listing.map(Arc::new),
            auto_advance,
            sessions,
        }
    }

    /// State wired from configuration.
    pub fn from_config(
        cfg: &Config,
        store: ContentStore,
        listing: Option<HttpListingSource>,
    ) -> Self {
        let mut sessions = SessionSettings::new(
            cookie_key(cfg.cookie_secret.as_deref()),
            cfg.session_idle_timeout(),
        );
        sessions.insecure_cookie = cfg.insecure_cookie;
        Self::new(store, listing, cfg.auto_advance_interval(), sessions)
    }
}

/// Private-cookie key. Secrets shorter than 64 bytes are not accepted; a
/// random key is used instead, which logs everyone out on restart.
pub fn cookie_key(secret: Option<&str>) -> Key {
    match secret.map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            warn!("cookie_secret is shorter than 64 bytes; using a random per-process key");
            Key::generate()
        }
        None => {
            warn!("cookie_secret not set; using a random per-process key");
            Key::generate()
        }
    }
}

pub fn homepage_router(state: HomepageState) -> Router {
    let settings = &state.sessions;
    let session_layer = SessionManagerLayer::new(settings.store.clone())
        .with_name(SESSION_COOKIE)
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(!settings.insecure_cookie)
        .with_expiry(Expiry::OnInactivity(settings.idle_timeout))
        .with_private(settings.key.clone());

    Router::new()
        .route("/api/home", get(public::home))
        .route("/api/banners", get(public::live_banners))
        .route("/api/banners/rotate", post(public::rotate_banner))
        .route("/api/boards/{board}", get(public::board_posts))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/session", get(admin::status))
        .route("/api/admin/password", post(admin::change_password))
        .route(
            "/api/admin/banners",
            get(admin::list_banners).post(admin::create_banner),
        )
        .route("/api/admin/banners/{id}", delete(admin::delete_banner))
        .route("/api/admin/posts", post(admin::create_post))
        .route("/api/admin/csr/migrate", post(admin::migrate_csr))
        .layer(session_layer)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_fall_back_to_a_random_key() {
        let long = "k".repeat(64);
        assert_eq!(
            cookie_key(Some(&long)).master(),
            cookie_key(Some(&long)).master()
        );
        assert_ne!(
            cookie_key(Some("short")).master(),
            cookie_key(Some("short")).master()
        );
    }
}
