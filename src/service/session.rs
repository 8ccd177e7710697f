//! Per-user state carried between refreshes, stored in the tower-sessions
//! session under a single key.

use crate::error::HomepageError;
use crate::service::admin::AdminSession;
use crate::service::rotation::BannerRotation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

pub const SESSION_COOKIE: &str = "kpii_session";
const CONTEXT_KEY: &str = "kpii.context";

/// Everything one interactive user carries between refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub admin: AdminSession,
    pub rotation: BannerRotation,
}

impl SessionContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            admin: AdminSession::LoggedOut,
            rotation: BannerRotation::new(now),
        }
    }

    /// Stored context, if the caller has one. Reading never creates a session.
    pub async fn load(session: &Session) -> Result<Option<Self>, HomepageError> {
        Ok(session.get::<Self>(CONTEXT_KEY).await?)
    }

    /// Stored context, or a fresh logged-out one starting at `now`.
    pub async fn load_or_new(session: &Session, now: DateTime<Utc>) -> Result<Self, HomepageError> {
        Ok(Self::load(session).await?.unwrap_or_else(|| Self::new(now)))
    }

    pub async fn save(&self, session: &Session) -> Result<(), HomepageError> {
        session.insert(CONTEXT_KEY, self).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::rotation::Step;
    use chrono::TimeZone;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn empty_session_has_no_context() {
        let s = session();
        assert_eq!(SessionContext::load(&s).await.unwrap(), None);
        let fresh = SessionContext::load_or_new(&s, t0()).await.unwrap();
        assert_eq!(fresh, SessionContext::new(t0()));
        assert!(s.is_empty().await);
    }

    #[tokio::test]
    async fn saved_context_reads_back() {
        let s = session();
        let mut ctx = SessionContext::new(t0());
        ctx.admin = AdminSession::LoggedIn {
            username: "admin".into(),
        };
        ctx.rotation.advance(Step::Previous, 3);
        ctx.save(&s).await.unwrap();

        let loaded = SessionContext::load(&s).await.unwrap().expect("stored");
        assert_eq!(loaded, ctx);
        assert_eq!(loaded.rotation.index(), 2);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let (a, b) = (session(), session());
        let mut ctx = SessionContext::new(t0());
        ctx.admin = AdminSession::LoggedIn {
            username: "admin".into(),
        };
        ctx.save(&a).await.unwrap();
        assert!(SessionContext::load(&b).await.unwrap().is_none());
    }
}
