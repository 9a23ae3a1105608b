//! The settled result of one command request.
//!
//! A [`CommandOutcome`] is produced exactly once per request. It is the
//! only thing a caller ever sees: success carries a confirmation message
//! (and, for the two query commands, a JSON payload); failure carries an
//! [`ErrorKind`] and a descriptive message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RequestId;

/// The ten symbolic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Walk forward along the current facing.
    MoveForward,
    /// Rotate left or right.
    Turn,
    /// Place a block from the inventory.
    PlaceBlock,
    /// Break a block.
    MineBlock,
    /// Jump once.
    Jump,
    /// List inventory contents.
    GetInventory,
    /// Craft an item from a known recipe.
    CraftItem,
    /// Scan nearby blocks and entities.
    LookAround,
    /// Attack the nearest mob in range.
    Attack,
    /// Eat a food item from the inventory.
    EatFood,
}

impl CommandKind {
    /// Every command, in catalog order.
    pub const ALL: [Self; 10] = [
        Self::MoveForward,
        Self::Turn,
        Self::PlaceBlock,
        Self::MineBlock,
        Self::Jump,
        Self::GetInventory,
        Self::CraftItem,
        Self::LookAround,
        Self::Attack,
        Self::EatFood,
    ];

    /// The tool name of this command.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MoveForward => "move_forward",
            Self::Turn => "turn",
            Self::PlaceBlock => "place_block",
            Self::MineBlock => "mine_block",
            Self::Jump => "jump",
            Self::GetInventory => "get_inventory",
            Self::CraftItem => "craft_item",
            Self::LookAround => "look_around",
            Self::Attack => "attack",
            Self::EatFood => "eat_food",
        }
    }

    /// Look a command up by its tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether the command only reads world state.
    ///
    /// Read-only commands may run concurrently with anything; physical
    /// commands must be serialized by the caller.
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::GetInventory | Self::LookAround)
    }
}

impl core::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a command settled with failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No inventory item matches the requested name.
    ItemNotFound,
    /// The voxel to mine is absent or already empty.
    NoTargetBlock,
    /// No eligible attack target within range.
    NoTargetFound,
    /// No known recipe for the requested item.
    RecipeNotFound,
    /// The session rejected an equip request.
    EquipFailure,
    /// The session rejected a placement request.
    PlacementFailure,
    /// The session rejected a dig request.
    DigFailure,
    /// The session rejected a craft request.
    CraftFailure,
    /// Navigation did not reach its goal in time.
    PathTimeout,
    /// A command parameter violated its constraint.
    InvalidArgument,
    /// A tool call named no known command.
    UnknownCommand,
    /// The session's signal source closed while a command was waiting.
    SessionClosed,
    /// Navigation signals were dropped before they could be read, so the
    /// first one is unknown.
    SignalsLost,
    /// A query result could not be encoded as JSON.
    PayloadEncoding,
}

/// The settled, caller-facing result of one command request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// The request this outcome settles.
    pub request_id: RequestId,
    /// Which command ran. `None` when the call never resolved to a command.
    pub command: Option<CommandKind>,
    /// Whether the command succeeded.
    pub success: bool,
    /// Confirmation text on success, error description on failure.
    pub message: String,
    /// Structured result of the query commands (`get_inventory`,
    /// `look_around`).
    pub payload: Option<serde_json::Value>,
    /// Failure classification; `None` on success.
    pub error: Option<ErrorKind>,
    /// When the outcome settled.
    pub settled_at: DateTime<Utc>,
}

impl CommandOutcome {
    /// A successful outcome carrying only a message.
    pub fn succeeded(request_id: RequestId, command: CommandKind, message: String) -> Self {
        Self {
            request_id,
            command: Some(command),
            success: true,
            message,
            payload: None,
            error: None,
            settled_at: Utc::now(),
        }
    }

    /// A successful outcome carrying a structured payload.
    pub fn succeeded_with_payload(
        request_id: RequestId,
        command: CommandKind,
        message: String,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            payload: Some(payload),
            ..Self::succeeded(request_id, command, message)
        }
    }

    /// A failed outcome.
    pub fn failed(
        request_id: RequestId,
        command: Option<CommandKind>,
        error: ErrorKind,
        message: String,
    ) -> Self {
        Self {
            request_id,
            command,
            success: false,
            message,
            payload: None,
            error: Some(error),
            settled_at: Utc::now(),
        }
    }

    /// Render the text handed back to a tool-calling model.
    ///
    /// Payload outcomes render as pretty JSON, other successes as their
    /// message, and failures as `error: <message>`.
    pub fn to_tool_output(&self) -> String {
        if !self.success {
            return format!("error: {}", self.message);
        }
        match &self.payload {
            Some(payload) => {
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| self.message.clone())
            }
            None => self.message.clone(),
        }
    }
}
