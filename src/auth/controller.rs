//! The session state machine. Signup, password login, and the OAuth landing
//! page all end in the same place: a token in the store and a route change,
//! so nothing downstream needs to know which flow produced the session.

use super::{
    client::CredentialAuthClient,
    error::{AuthError, StoreError},
    navigation::{NavigationGateway, routes},
    oauth::OAuthRedirectHandler,
    state::AuthFlowState,
    store::SessionStore,
    types::{AuthOutcome, Credentials, SessionToken, SignupForm},
};
use tracing::{debug, error, info, warn};

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const MISSING_ACCESS_TOKEN: &str = "Login response did not include an access token";

/// Drives one auth flow at a time against injected collaborators.
///
/// Operations take `&mut self`, so a second submit cannot start while one is
/// in flight. Flow failures end in `AuthFlowState::Failed`; only store
/// failures are returned as errors.
#[derive(Debug)]
pub struct SessionController<C, S, N> {
    client: C,
    store: S,
    navigator: N,
    oauth: OAuthRedirectHandler,
    state: AuthFlowState,
}

impl<C, S, N> SessionController<C, S, N>
where
    C: CredentialAuthClient,
    S: SessionStore,
    N: NavigationGateway,
{
    pub fn new(client: C, store: S, navigator: N, oauth: OAuthRedirectHandler) -> Self {
        Self {
            client,
            store,
            navigator,
            oauth,
            state: AuthFlowState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &AuthFlowState {
        &self.state
    }

    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Picks up a previously persisted session without navigating.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be read.
    pub fn restore(&mut self) -> Result<&AuthFlowState, StoreError> {
        if let Some(token) = self.store.load()? {
            debug!("restored persisted session");
            self.state = AuthFlowState::Authenticated(token);
        }
        Ok(&self.state)
    }

    /// Password login. On success the token is persisted and the user is
    /// sent to the chat.
    ///
    /// # Errors
    /// Returns `StoreError` if the token cannot be persisted.
    pub async fn submit_login(
        &mut self,
        credentials: Credentials,
    ) -> Result<&AuthFlowState, StoreError> {
        if !self.begin_submit() {
            return Ok(&self.state);
        }

        self.state = AuthFlowState::Submitting;
        let outcome = self.client.login(&credentials).await;
        drop(credentials);

        match outcome {
            AuthOutcome::Success {
                token: Some(token), ..
            } => self.establish(token)?,
            AuthOutcome::Success { token: None, .. } => {
                self.fail(&AuthError::Transport(MISSING_ACCESS_TOKEN.to_string()));
            }
            AuthOutcome::Failure(err) => self.fail(&err),
        }

        Ok(&self.state)
    }

    /// Account registration. Mismatched passwords fail before any request is
    /// made. A successful signup leaves the user idle with a notice; it does
    /// not log them in.
    pub async fn submit_signup(&mut self, form: SignupForm) -> &AuthFlowState {
        if !self.begin_submit() {
            return &self.state;
        }

        if !form.passwords_match() {
            self.fail(&AuthError::Validation(PASSWORDS_DO_NOT_MATCH.to_string()));
            return &self.state;
        }

        self.state = AuthFlowState::Submitting;
        let request = form.into_request();

        match self.client.signup(&request).await {
            AuthOutcome::Success { message, .. } => {
                info!("account registered");
                self.state = AuthFlowState::Idle {
                    notice: Some(message),
                };
            }
            AuthOutcome::Failure(err) => self.fail(&err),
        }

        &self.state
    }

    /// Runs once when the OAuth landing page loads. Without a token the user
    /// is sent home and no error is shown.
    ///
    /// # Errors
    /// Returns `StoreError` if the token cannot be persisted.
    pub fn handle_landing(&mut self, landing_url: &str) -> Result<&AuthFlowState, StoreError> {
        match self.oauth.handle(landing_url) {
            AuthOutcome::Success {
                token: Some(token), ..
            } => self.establish(token)?,
            _ => {
                info!("landing without session, returning home");
                self.navigator.go(routes::HOME);
            }
        }

        Ok(&self.state)
    }

    /// Leaves the app for the identity service's third-party login.
    pub fn begin_oauth(&self) {
        self.navigator.redirect_external(self.oauth.entry_url());
    }

    /// Drops the persisted session and returns home.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be cleared.
    pub fn logout(&mut self) -> Result<&AuthFlowState, StoreError> {
        self.store.clear()?;
        info!("session cleared");
        self.state = AuthFlowState::default();
        self.navigator.go(routes::HOME);
        Ok(&self.state)
    }

    /// Resets a previous error or notice. Returns false when the flow is
    /// already authenticated and the submit should be ignored.
    fn begin_submit(&mut self) -> bool {
        if self.state.is_authenticated() {
            debug!("already authenticated, submit ignored");
            return false;
        }
        self.state = AuthFlowState::default();
        true
    }

    fn establish(&mut self, token: SessionToken) -> Result<(), StoreError> {
        if let Err(err) = self.store.save(&token) {
            error!(error = %err, "failed to persist session token");
            self.state = AuthFlowState::Failed(err.to_string());
            return Err(err);
        }

        info!("session established");
        self.state = AuthFlowState::Authenticated(token);
        self.navigator.go(routes::CHAT);
        Ok(())
    }

    fn fail(&mut self, err: &AuthError) {
        warn!(kind = err.kind(), "auth flow failed");
        self.state = AuthFlowState::Failed(err.to_string());
    }
}
