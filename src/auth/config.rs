//! Endpoint configuration for the identity service. Values are public and
//! may come from flags or environment; do not store secrets here.

use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Request timeout applied to every identity-service call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const OAUTH_ENTRY_PATH: &str = "/auth/google/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AuthConfig {
    /// Builds a config for `api_base_url`, falling back to the default when
    /// the value is blank.
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        let api_base_url =
            normalize_value(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self {
            api_base_url,
            ..Self::default()
        }
    }

    /// A zero timeout would fail every request, so it keeps the default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.request_timeout = timeout;
        }
        self
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }

    /// Where the browser is sent to start the OAuth dance.
    #[must_use]
    pub fn oauth_entry_url(&self) -> String {
        self.endpoint(OAUTH_ENTRY_PATH)
    }
}

fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
