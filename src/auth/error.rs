use thiserror::Error;

/// Why an authentication attempt did not produce a session.
///
/// Every variant renders as the human-readable message shown to the user;
/// flows absorb these into `AuthFlowState::Failed` and never propagate them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Client-side precondition failed; the request never reached the network.
    #[error("{0}")]
    Validation(String),
    /// The identity service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },
    /// Network failure, timeout, or an unreadable response body.
    #[error("{0}")]
    Transport(String),
    /// The OAuth landing URL carried no usable `token` parameter.
    #[error("no token")]
    MissingToken,
}

impl AuthError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Service { .. } => "service",
            Self::Transport(_) => "transport",
            Self::MissingToken => "missing_token",
        }
    }
}

/// Failure of the durable session slot itself.
///
/// These are environment errors: the controller hands them back to the host
/// instead of turning them into a flow failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session store is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}
