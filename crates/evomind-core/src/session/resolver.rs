//! Startup routing
//!
//! Decides which screen a user lands on after the splash screen. The decision
//! is a pure function of [`SessionFlags`]; a failed read falls back to
//! onboarding instead of surfacing an error.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::context::SessionContext;
use super::flags::SessionFlags;
use crate::storage::KeyValueStore;

/// First screen shown after launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitialRoute {
    /// Logged-in app
    Main,
    /// Onboarding done, no user
    Login,
    /// First launch, or the flags could not be read
    Onboarding,
}

impl InitialRoute {
    /// Resolve the route from flags, in priority order: user, onboarding, default
    pub fn for_flags(flags: &SessionFlags) -> Self {
        if flags.logged_in_user().is_some() {
            InitialRoute::Main
        } else if flags.has_completed_onboarding() {
            InitialRoute::Login
        } else {
            InitialRoute::Onboarding
        }
    }
}

impl fmt::Display for InitialRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitialRoute::Main => "main",
            InitialRoute::Login => "login",
            InitialRoute::Onboarding => "onboarding",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of the startup read
pub struct Bootstrap {
    pub route: InitialRoute,
    pub session: SessionContext,
}

/// One-shot resolver run at process start
pub struct SessionBootstrapResolver {
    store: Arc<dyn KeyValueStore>,
}

impl SessionBootstrapResolver {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the persisted flags and pick the initial route
    ///
    /// Never fails: a storage or parse error resolves to
    /// [`InitialRoute::Onboarding`] with an empty session.
    pub async fn resolve(self) -> Bootstrap {
        let flags = match SessionFlags::read(self.store.as_ref()).await {
            Ok(flags) => flags,
            Err(e) => {
                warn!("Failed to read session flags, starting at onboarding: {:#}", e);
                return Bootstrap {
                    route: InitialRoute::Onboarding,
                    session: SessionContext::new(self.store, SessionFlags::default()),
                };
            }
        };

        let route = InitialRoute::for_flags(&flags);
        info!("Resolved initial route: {}", route);

        Bootstrap {
            route,
            session: SessionContext::new(self.store, flags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::{FailingStore, MemoryStore};

    fn flags(user_id: Option<&str>, onboarding: Option<bool>) -> SessionFlags {
        SessionFlags {
            user_id: user_id.map(str::to_string),
            onboarding_complete: onboarding,
        }
    }

    #[test]
    fn test_route_truth_table() {
        assert_eq!(
            InitialRoute::for_flags(&flags(Some("u1"), Some(true))),
            InitialRoute::Main
        );
        assert_eq!(
            InitialRoute::for_flags(&flags(Some("u1"), None)),
            InitialRoute::Main
        );
        assert_eq!(
            InitialRoute::for_flags(&flags(None, Some(true))),
            InitialRoute::Login
        );
        assert_eq!(
            InitialRoute::for_flags(&flags(None, None)),
            InitialRoute::Onboarding
        );
    }

    #[test]
    fn test_false_or_empty_flags_fall_through() {
        assert_eq!(
            InitialRoute::for_flags(&flags(None, Some(false))),
            InitialRoute::Onboarding
        );
        assert_eq!(
            InitialRoute::for_flags(&flags(Some(""), Some(true))),
            InitialRoute::Login
        );
    }

    #[tokio::test]
    async fn test_resolve_from_store() {
        let store = Arc::new(MemoryStore::with(&[
            ("userId", "u1"),
            ("onboardingComplete", "true"),
        ]));
        let bootstrap = SessionBootstrapResolver::new(store).resolve().await;

        assert_eq!(bootstrap.route, InitialRoute::Main);
        assert_eq!(bootstrap.session.user_id(), Some("u1"));
        assert!(bootstrap.session.onboarding_complete());
    }

    #[tokio::test]
    async fn test_resolve_login_when_onboarded() {
        let store = Arc::new(MemoryStore::with(&[("onboardingComplete", "true")]));
        let bootstrap = SessionBootstrapResolver::new(store).resolve().await;

        assert_eq!(bootstrap.route, InitialRoute::Login);
        assert!(!bootstrap.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_resolve_fresh_install() {
        let store = Arc::new(MemoryStore::default());
        let bootstrap = SessionBootstrapResolver::new(store).resolve().await;
        assert_eq!(bootstrap.route, InitialRoute::Onboarding);
    }

    #[tokio::test]
    async fn test_read_failure_falls_back_to_onboarding() {
        let bootstrap = SessionBootstrapResolver::new(Arc::new(FailingStore))
            .resolve()
            .await;

        assert_eq!(bootstrap.route, InitialRoute::Onboarding);
        assert!(!bootstrap.session.is_logged_in());
        assert!(!bootstrap.session.onboarding_complete());
    }

    #[tokio::test]
    async fn test_corrupted_flag_falls_back_to_onboarding() {
        // A valid user id does not rescue a corrupted read
        let store = Arc::new(MemoryStore::with(&[
            ("userId", "u1"),
            ("onboardingComplete", "maybe"),
        ]));
        let bootstrap = SessionBootstrapResolver::new(store).resolve().await;

        assert_eq!(bootstrap.route, InitialRoute::Onboarding);
        assert!(!bootstrap.session.is_logged_in());
    }
}
