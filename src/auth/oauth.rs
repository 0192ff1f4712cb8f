//! Landing side of the OAuth redirect flow. The identity service finishes the
//! provider dance itself and redirects the browser to the landing page with
//! the minted token in the query string; this handler only reads it back.

use super::{
    client::LOGIN_SUCCEEDED,
    config::AuthConfig,
    error::AuthError,
    types::{AuthOutcome, SessionToken},
};
use tracing::debug;
use url::Url;

/// Query parameter the identity service appends to the landing URL.
pub const TOKEN_PARAM: &str = "token";

/// Placeholder origin used to resolve relative landing URLs.
const LANDING_BASE: &str = "http://landing.invalid/";

#[derive(Clone, Debug)]
pub struct OAuthRedirectHandler {
    entry_url: String,
}

impl OAuthRedirectHandler {
    pub fn new(entry_url: impl Into<String>) -> Self {
        Self {
            entry_url: entry_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.oauth_entry_url())
    }

    /// URL the browser leaves the app for to start third-party login.
    #[must_use]
    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    /// Extracts the token from a landing URL.
    ///
    /// A missing or empty token is an ordinary outcome: the user abandoned the
    /// provider or opened the landing page directly.
    #[must_use]
    pub fn handle(&self, landing_url: &str) -> AuthOutcome {
        match extract_token(landing_url) {
            Some(token) => AuthOutcome::Success {
                message: LOGIN_SUCCEEDED.to_string(),
                token: Some(token),
            },
            None => {
                debug!("landing URL carried no token");
                AuthOutcome::Failure(AuthError::MissingToken)
            }
        }
    }
}

fn extract_token(landing_url: &str) -> Option<SessionToken> {
    let url = parse_landing(landing_url.trim())?;
    let value = url
        .query_pairs()
        .find(|(name, _)| name == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())?;
    SessionToken::new(value)
}

fn parse_landing(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(LANDING_BASE).ok()?.join(raw).ok()
        }
        Err(_) => None,
    }
}
