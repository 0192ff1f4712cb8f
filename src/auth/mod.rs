//! Client-side authentication and session handling for the chat client.
//!
//! Flow Overview: signup posts credentials and, on success, leaves the form
//! idle with a notice. Login posts credentials, persists the returned bearer
//! token, and navigates to the chat. The OAuth landing page reads the token
//! the identity service appended to the redirect URL and does the same, or
//! silently returns home when there is none.
//!
//! Passwords and tokens cross this module; none of it may be logged.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod oauth;
pub mod state;
pub mod store;
pub mod types;

pub use client::{CredentialAuthClient, HttpAuthClient};
pub use config::AuthConfig;
pub use controller::SessionController;
pub use error::{AuthError, StoreError};
pub use navigation::{ConsoleNavigator, NavigationGateway, routes};
pub use oauth::OAuthRedirectHandler;
pub use state::AuthFlowState;
pub use store::{FileStore, MemoryStore, SessionStore};
pub use types::{AuthOutcome, Credentials, SessionToken, SignupForm, SignupRequest};
