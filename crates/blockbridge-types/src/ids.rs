//! Identifier types.
//!
//! [`RequestId`] is minted by this crate family once per command request
//! (UUID v7, time-ordered, so log lines sort by issue time). [`EntityId`] is
//! assigned by the world session and only ever copied here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one command request.
///
/// Created when a command is dispatched and carried on its
/// [`CommandOutcome`](crate::CommandOutcome) and on every log line the
/// command emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Identifier the world session assigns to a dynamic entity.
///
/// The avatar itself has one too; see `WorldSession::self_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
