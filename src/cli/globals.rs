use crate::auth::AuthConfig;
use std::{path::PathBuf, time::Duration};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub store_path: PathBuf,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, store_path: PathBuf) -> Self {
        Self {
            api_url,
            store_path,
            timeout: crate::auth::config::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    #[must_use]
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(&self.api_url).with_timeout(self.timeout)
    }
}
