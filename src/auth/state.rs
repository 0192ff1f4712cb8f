use super::types::SessionToken;

/// Where a single form or landing flow stands.
///
/// Errors and success notices are separate variants, so a form can never
/// show both at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthFlowState {
    /// Waiting for input. `notice` holds a success message, e.g. after signup.
    Idle { notice: Option<String> },
    Submitting,
    Authenticated(SessionToken),
    Failed(String),
}

impl Default for AuthFlowState {
    fn default() -> Self {
        Self::Idle { notice: None }
    }
}

impl AuthFlowState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Idle { notice } => notice.as_deref(),
            _ => None,
        }
    }
}
