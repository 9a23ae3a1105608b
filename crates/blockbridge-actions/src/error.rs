//! Error types for the blockbridge-actions crate.
//!
//! Every command failure is one [`ActionError`] variant. Nothing is retried
//! and nothing is swallowed: the error settles the command and is handed to
//! the caller, classified by [`ActionError::kind`].

use blockbridge_types::{ErrorKind, Vec3};
use blockbridge_world::SessionError;

/// Errors that settle a command with failure.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// No inventory item's name matches the query.
    #[error("No {query} found in inventory")]
    ItemNotFound {
        /// The requested block or food name.
        query: String,
    },

    /// The voxel to mine is unloaded or empty.
    #[error("No block to mine at offset {offset}")]
    NoTargetBlock {
        /// Offset from the avatar that was requested.
        offset: Vec3,
    },

    /// No mob within attack range.
    #[error("No target found to attack within {range} blocks")]
    NoTargetFound {
        /// The attack range that was searched.
        range: f64,
    },

    /// The item is unknown or the avatar knows no recipe for it.
    #[error("No recipe found for {item}")]
    RecipeNotFound {
        /// The requested item name.
        item: String,
    },

    /// The session refused to equip the resolved item.
    #[error("Failed to equip {item}: {source}")]
    EquipFailure {
        /// Canonical name of the item.
        item: String,
        /// The session's rejection.
        #[source]
        source: SessionError,
    },

    /// The session refused the placement.
    #[error("Failed to place {block_type}: {source}")]
    PlacementFailure {
        /// The requested block type.
        block_type: String,
        /// The session's rejection.
        #[source]
        source: SessionError,
    },

    /// The session refused the dig.
    #[error("Failed to mine {block}: {source}")]
    DigFailure {
        /// Name of the targeted block.
        block: String,
        /// The session's rejection.
        #[source]
        source: SessionError,
    },

    /// The session refused the craft.
    #[error("Failed to craft {item}: {source}")]
    CraftFailure {
        /// The requested item name.
        item: String,
        /// The session's rejection.
        #[source]
        source: SessionError,
    },

    /// Navigation gave up before reaching the goal.
    #[error("Failed to move forward - path timeout")]
    PathTimeout,

    /// A parameter violated its constraint.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong.
        reason: String,
    },

    /// A tool call named no known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The navigation signal source closed while waiting.
    #[error("world session closed while waiting for a navigation signal")]
    SessionClosed,

    /// The navigation receiver fell behind and signals were overwritten.
    #[error("missed {skipped} navigation signals, cannot tell which came first")]
    SignalsLost {
        /// How many signals were dropped.
        skipped: u64,
    },

    /// A query result could not be encoded as JSON.
    #[error("failed to encode payload: {source}")]
    PayloadEncoding {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl ActionError {
    /// Shorthand for an [`ActionError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// The serializable classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ItemNotFound { .. } => ErrorKind::ItemNotFound,
            Self::NoTargetBlock { .. } => ErrorKind::NoTargetBlock,
            Self::NoTargetFound { .. } => ErrorKind::NoTargetFound,
            Self::RecipeNotFound { .. } => ErrorKind::RecipeNotFound,
            Self::EquipFailure { .. } => ErrorKind::EquipFailure,
            Self::PlacementFailure { .. } => ErrorKind::PlacementFailure,
            Self::DigFailure { .. } => ErrorKind::DigFailure,
            Self::CraftFailure { .. } => ErrorKind::CraftFailure,
            Self::PathTimeout => ErrorKind::PathTimeout,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Self::SessionClosed => ErrorKind::SessionClosed,
            Self::SignalsLost { .. } => ErrorKind::SignalsLost,
            Self::PayloadEncoding { .. } => ErrorKind::PayloadEncoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_subject() {
        let err = ActionError::ItemNotFound {
            query: String::from("torch"),
        };
        assert_eq!(err.to_string(), "No torch found in inventory");
        assert_eq!(err.kind(), ErrorKind::ItemNotFound);

        let err = ActionError::NoTargetBlock {
            offset: Vec3::new(1.0, 0.0, -1.0),
        };
        assert_eq!(err.to_string(), "No block to mine at offset (1, 0, -1)");
    }

    #[test]
    fn rejection_is_kept_as_source() {
        let err = ActionError::DigFailure {
            block: String::from("bedrock"),
            source: SessionError::rejected("dig", "unbreakable"),
        };
        assert_eq!(err.kind(), ErrorKind::DigFailure);
        assert_eq!(
            err.to_string(),
            "Failed to mine bedrock: dig rejected: unbreakable"
        );
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source, Some(String::from("dig rejected: unbreakable")));
    }

    #[test]
    fn encoding_errors_convert_and_classify() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").err();
        assert!(json_err.is_some());
        let Some(json_err) = json_err else { return };
        let err = ActionError::from(json_err);
        assert_eq!(err.kind(), ErrorKind::PayloadEncoding);
        assert!(err.to_string().starts_with("failed to encode payload: "));
    }

    #[test]
    fn lost_signals_report_the_gap() {
        let err = ActionError::SignalsLost { skipped: 3 };
        assert_eq!(err.kind(), ErrorKind::SignalsLost);
        assert_eq!(
            err.to_string(),
            "missed 3 navigation signals, cannot tell which came first"
        );
    }
}
