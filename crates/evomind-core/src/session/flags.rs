//! Persisted session flags

use anyhow::{bail, Result};

use crate::constants::session::{ONBOARDING_COMPLETE_KEY, USER_ID_KEY};
use crate::storage::KeyValueStore;

/// Snapshot of the two flags that decide where a returning user lands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFlags {
    /// Set by a successful login, cleared by logout
    pub user_id: Option<String>,
    /// Set once onboarding is finished or skipped, never cleared
    pub onboarding_complete: Option<bool>,
}

impl SessionFlags {
    /// Read both flags from the store
    ///
    /// Fails if the store fails or `onboardingComplete` holds something other
    /// than a stringified boolean.
    pub async fn read(store: &dyn KeyValueStore) -> Result<Self> {
        let user_id = store.get(USER_ID_KEY).await?;
        let onboarding_complete = match store.get(ONBOARDING_COMPLETE_KEY).await? {
            Some(raw) => Some(parse_flag(&raw)?),
            None => None,
        };

        Ok(Self {
            user_id,
            onboarding_complete,
        })
    }

    /// User id, if present and non-empty
    pub fn logged_in_user(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether onboarding was finished or skipped
    pub fn has_completed_onboarding(&self) -> bool {
        self.onboarding_complete.unwrap_or(false)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => bail!("corrupted {} value: {:?}", ONBOARDING_COMPLETE_KEY, other),
    }
}
