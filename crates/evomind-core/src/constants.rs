//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// HTTP client configuration
pub mod http {
    use super::*;

    /// Default backend base URL (Android emulator loopback to the host)
    pub const DEFAULT_API_BASE_URL: &str = "http://10.0.2.2:8000";

    /// Connection timeout for HTTP requests
    ///
    /// Only the connect phase is bounded. Request duration is left to the transport.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// User agent sent with every request
    pub const USER_AGENT: &str = "EvoMind/0.1";

    /// Environment variable overriding the configured base URL
    pub const API_URL_ENV: &str = "EVOMIND_API_URL";
}

/// Session bootstrap configuration
pub mod session {
    use super::*;

    /// Persisted key holding the logged-in user's id
    pub const USER_ID_KEY: &str = "userId";

    /// Persisted key set once onboarding has been finished or skipped
    pub const ONBOARDING_COMPLETE_KEY: &str = "onboardingComplete";

    /// Minimum time the splash screen stays up before routing
    pub const SPLASH_DELAY: Duration = Duration::from_secs(3);
}

/// Local storage configuration
pub mod storage {
    /// Config directory name
    pub const CONFIG_DIR_NAME: &str = ".evomind";

    /// SQLite database file name
    pub const DATABASE_FILE_NAME: &str = "evomind.db";

    /// Config file name
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Log file name
    pub const LOG_FILE_NAME: &str = "evomind.log";
}
