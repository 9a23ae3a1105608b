//! Error types for the world-session boundary.

/// Errors a world session reports when it does not accept a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session refused the request.
    #[error("{action} rejected: {reason}")]
    Rejected {
        /// The request that was refused (`equip`, `place`, `dig`, `craft`).
        action: &'static str,
        /// The session's explanation.
        reason: String,
    },

    /// The connection to the world is gone.
    #[error("world session disconnected")]
    Disconnected,
}

impl SessionError {
    /// Shorthand for a [`SessionError::Rejected`].
    pub fn rejected(action: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            action,
            reason: reason.into(),
        }
    }
}
