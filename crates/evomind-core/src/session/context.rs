//! Explicit session state
//!
//! Populated once from the bootstrap read and changed only through
//! [`SessionContext::log_in`], [`SessionContext::log_out`], and
//! [`SessionContext::complete_onboarding`]. Each change is persisted before the
//! in-memory state is updated.

use std::sync::Arc;

use thiserror::Error;

use super::flags::SessionFlags;
use crate::constants::session::{ONBOARDING_COMPLETE_KEY, USER_ID_KEY};
use crate::storage::KeyValueStore;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation needs a logged-in user
    #[error("not logged in")]
    NotLoggedIn,

    /// `log_in` was handed an empty user id
    #[error("user id is empty")]
    EmptyUserId,

    /// Persisting a session change failed
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

/// Current user and onboarding state
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    user_id: Option<String>,
    onboarding_complete: bool,
}

impl SessionContext {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, flags: SessionFlags) -> Self {
        Self {
            user_id: flags.logged_in_user().map(str::to_string),
            onboarding_complete: flags.has_completed_onboarding(),
            store,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    /// User id, or [`SessionError::NotLoggedIn`]
    pub fn require_user(&self) -> Result<&str, SessionError> {
        self.user_id().ok_or(SessionError::NotLoggedIn)
    }

    /// Record a successful login
    pub async fn log_in(&mut self, user_id: &str) -> Result<(), SessionError> {
        if user_id.is_empty() {
            return Err(SessionError::EmptyUserId);
        }
        self.store.set(USER_ID_KEY, user_id).await?;
        tracing::info!("Logged in as {}", user_id);
        self.user_id = Some(user_id.to_string());
        Ok(())
    }

    /// Forget the current user. Onboarding state is kept.
    pub async fn log_out(&mut self) -> Result<(), SessionError> {
        self.store.remove(USER_ID_KEY).await?;
        tracing::info!("Logged out");
        self.user_id = None;
        Ok(())
    }

    /// Mark onboarding as finished or skipped
    pub async fn complete_onboarding(&mut self) -> Result<(), SessionError> {
        self.store.set(ONBOARDING_COMPLETE_KEY, "true").await?;
        self.onboarding_complete = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InitialRoute, SessionBootstrapResolver};
    use crate::storage::testing::{FailingStore, MemoryStore};
    use crate::storage::{Database, Preferences};

    #[tokio::test]
    async fn test_login_logout_persist() {
        let store = Arc::new(MemoryStore::default());
        let mut session = SessionContext::new(store.clone(), SessionFlags::default());

        assert!(matches!(
            session.require_user(),
            Err(SessionError::NotLoggedIn)
        ));

        session.complete_onboarding().await.unwrap();
        session.log_in("u42").await.unwrap();
        assert_eq!(session.require_user().unwrap(), "u42");
        assert_eq!(store.value("userId").as_deref(), Some("u42"));
        assert_eq!(store.value("onboardingComplete").as_deref(), Some("true"));

        session.log_out().await.unwrap();
        assert!(!session.is_logged_in());
        assert_eq!(store.value("userId"), None);
        assert_eq!(store.value("onboardingComplete").as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_empty_login_rejected() {
        let store = Arc::new(MemoryStore::default());
        let mut session = SessionContext::new(store.clone(), SessionFlags::default());

        let err = session.log_in("").await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyUserId));
        assert_eq!(store.value("userId"), None);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_state() {
        let mut session = SessionContext::new(Arc::new(FailingStore), SessionFlags::default());

        let err = session.log_in("u1").await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!session.is_logged_in());

        assert!(session.complete_onboarding().await.is_err());
        assert!(!session.onboarding_complete());
    }

    #[tokio::test]
    async fn test_routes_follow_sqlite_session() {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(Preferences::new(Database::in_memory().unwrap().shared()));

        let first = SessionBootstrapResolver::new(store.clone()).resolve().await;
        assert_eq!(first.route, InitialRoute::Onboarding);

        let mut session = first.session;
        session.complete_onboarding().await.unwrap();
        let second = SessionBootstrapResolver::new(store.clone()).resolve().await;
        assert_eq!(second.route, InitialRoute::Login);

        session.log_in("u1").await.unwrap();
        let third = SessionBootstrapResolver::new(store.clone()).resolve().await;
        assert_eq!(third.route, InitialRoute::Main);

        session.log_out().await.unwrap();
        let fourth = SessionBootstrapResolver::new(store).resolve().await;
        assert_eq!(fourth.route, InitialRoute::Login);
    }
}
