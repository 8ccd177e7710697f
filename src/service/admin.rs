use crate::db::{Banner, ContentStore, NewBanner, NewPost};
use crate::error::HomepageError;
use crate::scrape::{ListingSource, MigrationReport, migrate_csr};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Login state of one interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdminSession {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
    },
}

impl AdminSession {
    pub fn is_admin(&self) -> bool {
        matches!(self, AdminSession::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AdminSession::LoggedIn { username } => Some(username),
            AdminSession::LoggedOut => None,
        }
    }

    pub fn logout(&mut self) {
        *self = AdminSession::LoggedOut;
    }
}

/// Proof that the session was logged in when the guard was checked.
#[derive(Debug)]
pub struct Authorized<'a> {
    username: &'a str,
}

impl Authorized<'_> {
    pub fn username(&self) -> &str {
        self.username
    }
}

/// Fail closed unless the session is logged in.
pub fn authorize(session: &AdminSession) -> Result<Authorized<'_>, HomepageError> {
    match session {
        AdminSession::LoggedIn { username } => Ok(Authorized { username }),
        AdminSession::LoggedOut => Err(HomepageError::Unauthorized),
    }
}

/// Admin operations. Every mutation checks the session through [`authorize`]
/// before it reaches the store, which itself trusts its caller.
#[derive(Clone)]
pub struct AdminConsole {
    store: ContentStore,
}

impl AdminConsole {
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }

    /// LoggedOut -> LoggedIn on a verified password. The failure does not say
    /// whether the user exists.
    pub async fn login(
        &self,
        session: &mut AdminSession,
        username: &str,
        password: &str,
    ) -> Result<(), HomepageError> {
        if !self.store.verify_admin_password(username, password).await? {
            warn!(username, "admin login rejected");
            return Err(HomepageError::Authentication);
        }
        info!(username, "admin logged in");
        *session = AdminSession::LoggedIn {
            username: username.to_string(),
        };
        Ok(())
    }

    pub fn logout(&self, session: &mut AdminSession) {
        if let Some(username) = session.username() {
            info!(username, "admin logged out");
        }
        session.logout();
    }

    pub async fn change_password(
        &self,
        session: &AdminSession,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), HomepageError> {
        let auth = authorize(session)?;
        if new_password != confirm_password {
            return Err(HomepageError::validation("New passwords do not match."));
        }
        if new_password.is_empty() {
            return Err(HomepageError::validation("New password must not be empty."));
        }
        if !self
            .store
            .verify_admin_password(auth.username(), current_password)
            .await?
        {
            warn!(username = auth.username(), "password change rejected: wrong current password");
            return Err(HomepageError::Authentication);
        }
        self.store
            .change_admin_password(auth.username(), new_password)
            .await?;
        info!(username = auth.username(), "admin password changed");
        Ok(())
    }

    pub async fn list_all_banners(&self, session: &AdminSession) -> Result<Vec<Banner>, HomepageError> {
        authorize(session)?;
        self.store.list_all_banners().await
    }

    pub async fn insert_banner(
        &self,
        session: &AdminSession,
        banner: &NewBanner,
    ) -> Result<i64, HomepageError> {
        let auth = authorize(session)?;
        if banner.title.trim().is_empty() {
            return Err(HomepageError::validation("Banner title is required."));
        }
        if let Some(end) = banner.end_date
            && end < banner.start_date
        {
            return Err(HomepageError::validation(
                "Banner end date must not be before its start date.",
            ));
        }
        let id = self.store.insert_banner(banner).await?;
        info!(id, username = auth.username(), title = %banner.title, "banner inserted");
        Ok(id)
    }

    pub async fn delete_banner(&self, session: &AdminSession, id: i64) -> Result<bool, HomepageError> {
        let auth = authorize(session)?;
        let removed = self.store.delete_banner(id).await?;
        info!(id, removed, username = auth.username(), "banner delete");
        Ok(removed)
    }

    pub async fn insert_post(
        &self,
        session: &AdminSession,
        post: &NewPost,
    ) -> Result<i64, HomepageError> {
        let auth = authorize(session)?;
        if post.title.trim().is_empty() {
            return Err(HomepageError::validation("Post title is required."));
        }
        if let Some(end) = post.end_date
            && end < post.start_date
        {
            return Err(HomepageError::validation(
                "Post end date must not be before its start date.",
            ));
        }
        let id = self.store.insert_post(post).await?;
        info!(id, board = %post.board, username = auth.username(), "post inserted");
        Ok(id)
    }

    /// Re-run the csr listing import on request. Rows already stored are skipped.
    pub async fn migrate_csr<S: ListingSource>(
        &self,
        session: &AdminSession,
        source: &S,
    ) -> Result<MigrationReport, HomepageError> {
        let auth = authorize(session)?;
        info!(username = auth.username(), "on-demand csr migration requested");
        migrate_csr(&self.store, source, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_session_is_refused() {
        let session = AdminSession::LoggedOut;
        assert!(matches!(
            authorize(&session),
            Err(HomepageError::Unauthorized)
        ));
    }

    #[test]
    fn logged_in_session_carries_username() {
        let mut session = AdminSession::LoggedIn {
            username: "admin".into(),
        };
        assert_eq!(authorize(&session).unwrap().username(), "admin");
        session.logout();
        assert!(!session.is_admin());
        assert_eq!(session.username(), None);
    }
}
