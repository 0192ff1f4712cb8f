//! Request, response, and session types for the auth flows. Passwords and
//! tokens are wrapped in `SecretString` so they never show up in `Debug`
//! output or logs.

use super::error::AuthError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Username and password for one login attempt. Never persisted.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// The signup form as entered, including the confirmation field that is only
/// checked locally.
#[derive(Clone, Debug)]
pub struct SignupForm {
    pub username: String,
    pub password: SecretString,
    pub repeat_password: SecretString,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        repeat_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            repeat_password: SecretString::from(repeat_password.into()),
        }
    }

    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password.expose_secret() == self.repeat_password.expose_secret()
    }

    /// Drops the confirmation field, leaving what is sent to the service.
    #[must_use]
    pub fn into_request(self) -> SignupRequest {
        SignupRequest {
            username: self.username,
            password: self.password,
        }
    }
}

/// Payload of `POST /signup`.
#[derive(Clone, Debug)]
pub struct SignupRequest {
    pub username: String,
    pub password: SecretString,
}

/// Opaque bearer token issued by the identity service.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wraps a token value. Only the empty string is rejected; the value is
    /// otherwise opaque and kept byte for byte.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(SecretString::from(value)))
        }
    }

    /// Exposes the raw token. Callers must not log the returned value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SessionToken([REDACTED])")
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}

/// Result of any entry flow, before the controller acts on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success {
        message: String,
        token: Option<SessionToken>,
    },
    Failure(AuthError),
}

/// JSON body shared by `/signup` and `/login`.
#[derive(Serialize)]
pub(crate) struct CredentialsBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn session_token_rejects_only_empty_values() {
        assert!(SessionToken::new("").is_none());
        assert_eq!(
            SessionToken::new("   ").map(|t| t.expose().to_string()),
            Some("   ".to_string())
        );
        assert_eq!(
            SessionToken::new("abc123").map(|t| t.expose().to_string()),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn session_token_debug_is_redacted() {
        let token = SessionToken::new("abc123").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn signup_form_compares_passwords() {
        assert!(SignupForm::new("alice", "pw", "pw").passwords_match());
        assert!(!SignupForm::new("alice", "pw1", "pw2").passwords_match());
    }

    #[test]
    fn signup_form_into_request_keeps_username_and_password() {
        let request = SignupForm::new("alice", "pw", "pw").into_request();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password.expose_secret(), "pw");
    }

    #[test]
    fn login_response_tolerates_missing_fields() {
        let response: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(response.message.is_none());
        assert!(response.access_token.is_none());

        let response: LoginResponse = serde_json::from_str(
            r#"{"message":"ok","access_token":"abc123","token_type":"bearer"}"#,
        )
        .unwrap();
        assert_eq!(response.access_token.as_deref(), Some("abc123"));
    }
}
