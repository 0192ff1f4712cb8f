//! Credential-based signup and login against the identity service.
//!
//! Each call maps the service's answer, or the lack of one, into an
//! `AuthOutcome`. Nothing is retried; the caller surfaces the message and the
//! user resubmits. Request bodies carry passwords, so they are never logged.

use super::{
    config::{AuthConfig, LOGIN_PATH, SIGNUP_PATH},
    error::AuthError,
    types::{
        AuthOutcome, Credentials, CredentialsBody, LoginResponse, SessionToken, SignupRequest,
        SignupResponse,
    },
};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use tracing::{Instrument, debug, info_span, instrument, warn};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Maximum number of error characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

pub const SIGNUP_SUCCEEDED: &str = "User registered successfully";
pub const SIGNUP_FAILED: &str = "Failed to register user";
pub const LOGIN_SUCCEEDED: &str = "User logged in successfully";
pub const LOGIN_FAILED: &str = "Failed to login user";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

/// Username/password operations offered by the identity service.
pub trait CredentialAuthClient {
    /// Registers a new account. A successful signup never carries a token.
    fn signup(&self, request: &SignupRequest) -> impl Future<Output = AuthOutcome> + Send;

    /// Exchanges credentials for a bearer token.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = AuthOutcome> + Send;
}

/// `reqwest`-backed client with a fixed request timeout.
#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    http: Client,
    config: AuthConfig,
}

impl HttpAuthClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: AuthConfig) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Posts credentials to `path` and decodes a success body, or turns the
    /// error body into a `Service` failure using `fallback` when it has no
    /// usable `detail`.
    async fn exchange<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &CredentialsBody<'_>,
        fallback: &str,
    ) -> Result<T, AuthError> {
        let url = self.config.endpoint(path);
        let span = info_span!("identity.request", http.method = "POST", url = %url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        debug!(status = status.as_u16(), "identity service responded");

        // The request timeout keeps running while the body streams in.
        let payload = response.bytes().await.map_err(map_request_error)?;

        if status.is_success() {
            serde_json::from_slice::<T>(&payload).map_err(|err| {
                AuthError::Transport(format!("Failed to decode response: {err}"))
            })
        } else {
            Err(AuthError::Service {
                status: status.as_u16(),
                message: service_detail(&String::from_utf8_lossy(&payload))
                    .unwrap_or_else(|| fallback.to_string()),
            })
        }
    }
}

impl CredentialAuthClient for HttpAuthClient {
    #[instrument(skip_all)]
    async fn signup(&self, request: &SignupRequest) -> AuthOutcome {
        let body = CredentialsBody {
            username: &request.username,
            password: request.password.expose_secret(),
        };

        match self
            .exchange::<SignupResponse>(SIGNUP_PATH, &body, SIGNUP_FAILED)
            .await
        {
            Ok(response) => AuthOutcome::Success {
                message: non_empty(response.message).unwrap_or_else(|| SIGNUP_SUCCEEDED.into()),
                token: None,
            },
            Err(err) => {
                warn!(kind = err.kind(), "signup rejected");
                AuthOutcome::Failure(err)
            }
        }
    }

    #[instrument(skip_all)]
    async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let body = CredentialsBody {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };

        match self
            .exchange::<LoginResponse>(LOGIN_PATH, &body, LOGIN_FAILED)
            .await
        {
            Ok(response) => AuthOutcome::Success {
                message: non_empty(response.message).unwrap_or_else(|| LOGIN_SUCCEEDED.into()),
                token: response.access_token.and_then(SessionToken::new),
            },
            Err(err) => {
                warn!(kind = err.kind(), "login rejected");
                AuthOutcome::Failure(err)
            }
        }
    }
}

fn map_request_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Transport(TIMEOUT_MESSAGE.to_string())
    } else {
        AuthError::Transport(format!("Unable to reach the server: {err}"))
    }
}

/// Pulls a message out of an error body. `detail` is either a string or a
/// list of validation errors, of which only the first `msg` is shown.
fn service_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("detail")? {
        Value::String(detail) => detail.as_str(),
        Value::Array(items) => items.first()?.get("msg")?.as_str()?,
        _ => return None,
    };
    sanitize(message)
}

fn sanitize(message: &str) -> Option<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(MAX_ERROR_CHARS).collect())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|message| !message.trim().is_empty())
}
