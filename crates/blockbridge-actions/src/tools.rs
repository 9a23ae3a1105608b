//! Function-calling surface.
//!
//! A tool-calling model sees the ten commands as JSON function schemas
//! ([`tool_definitions`]) and answers with a function name plus a JSON
//! argument string. [`parse_tool_call`] turns that pair into a typed
//! [`Command`], which the dispatcher executes.

use blockbridge_types::{CommandKind, TurnDirection};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ActionError;

/// One parsed command with its arguments.
///
/// Serialized as `{"name": "<tool name>", "arguments": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum Command {
    /// Walk `distance` blocks along the current facing.
    MoveForward {
        /// Blocks to travel; finite and non-negative.
        distance: f64,
    },
    /// Rotate in place.
    Turn {
        /// Which way to rotate.
        direction: TurnDirection,
        /// How far, in degrees.
        degrees: f64,
    },
    /// Place a block from the inventory.
    PlaceBlock {
        /// Name (or part of a name) of the block item.
        block_type: String,
        /// Placement direction, x component.
        #[serde(default)]
        x_offset: f64,
        /// Placement direction, y component.
        #[serde(default)]
        y_offset: f64,
        /// Placement direction, z component.
        #[serde(default)]
        z_offset: f64,
    },
    /// Break the block at an offset from the avatar.
    MineBlock {
        /// Offset along x.
        x_offset: f64,
        /// Offset along y.
        y_offset: f64,
        /// Offset along z.
        z_offset: f64,
    },
    /// Jump once.
    Jump {},
    /// List the inventory.
    GetInventory {},
    /// Craft an item.
    CraftItem {
        /// Canonical item name.
        item: String,
        /// Craft repetitions.
        #[serde(default = "default_quantity")]
        quantity: u32,
    },
    /// Scan the surroundings.
    LookAround {
        /// Scan radius; the configured default when absent.
        #[serde(default)]
        radius: Option<u32>,
    },
    /// Attack the nearest mob in range.
    Attack {},
    /// Eat a food item.
    EatFood {
        /// Name (or part of a name) of the food item.
        food_item: String,
    },
}

const fn default_quantity() -> u32 {
    1
}

impl Command {
    /// Which command this is.
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::MoveForward { .. } => CommandKind::MoveForward,
            Self::Turn { .. } => CommandKind::Turn,
            Self::PlaceBlock { .. } => CommandKind::PlaceBlock,
            Self::MineBlock { .. } => CommandKind::MineBlock,
            Self::Jump {} => CommandKind::Jump,
            Self::GetInventory {} => CommandKind::GetInventory,
            Self::CraftItem { .. } => CommandKind::CraftItem,
            Self::LookAround { .. } => CommandKind::LookAround,
            Self::Attack {} => CommandKind::Attack,
            Self::EatFood { .. } => CommandKind::EatFood,
        }
    }
}

/// Parse a model's function call into a [`Command`].
///
/// `arguments` is the raw JSON argument string. An empty string or `null`
/// counts as no arguments.
///
/// # Errors
///
/// Returns [`ActionError::UnknownCommand`] if `name` is not one of the ten
/// tool names, or [`ActionError::InvalidArgument`] if the arguments are not
/// a JSON object or do not fit the command.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<Command, ActionError> {
    if CommandKind::from_name(name).is_none() {
        return Err(ActionError::UnknownCommand(String::from(name)));
    }

    let arguments = if arguments.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(arguments)
            .map_err(|e| ActionError::invalid(format!("{name}: malformed arguments: {e}")))?
    };
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        object @ Value::Object(_) => object,
        _ => {
            return Err(ActionError::invalid(format!(
                "{name}: arguments must be a JSON object"
            )));
        }
    };

    serde_json::from_value(json!({ "name": name, "arguments": arguments }))
        .map_err(|e| ActionError::invalid(format!("{name}: {e}")))
}

/// JSON function schemas for the ten commands, in catalog order.
pub fn tool_definitions() -> Vec<Value> {
    vec![
        function(
            CommandKind::MoveForward,
            "Move the agent forward by a specified number of blocks",
            json!({
                "distance": {
                    "type": "number",
                    "description": "Number of blocks to move forward"
                }
            }),
            &["distance"],
        ),
        function(
            CommandKind::Turn,
            "Turn the agent left or right by specified degrees",
            json!({
                "direction": {
                    "type": "string",
                    "enum": ["left", "right"],
                    "description": "Direction to turn"
                },
                "degrees": {
                    "type": "number",
                    "description": "Degrees to turn (typically 90 for right angles)"
                }
            }),
            &["direction", "degrees"],
        ),
        function(
            CommandKind::PlaceBlock,
            "Place a block at the agent's current position or relative position",
            json!({
                "block_type": {
                    "type": "string",
                    "description": "Type of block to place (e.g., 'stone', 'dirt', 'wood')"
                },
                "x_offset": {
                    "type": "number",
                    "description": "X offset from current position (default 0)"
                },
                "y_offset": {
                    "type": "number",
                    "description": "Y offset from current position (default 0)"
                },
                "z_offset": {
                    "type": "number",
                    "description": "Z offset from current position (default 0)"
                }
            }),
            &["block_type"],
        ),
        function(
            CommandKind::MineBlock,
            "Mine/break a block at the specified relative position",
            json!({
                "x_offset": { "type": "number", "description": "X offset from current position" },
                "y_offset": { "type": "number", "description": "Y offset from current position" },
                "z_offset": { "type": "number", "description": "Z offset from current position" }
            }),
            &["x_offset", "y_offset", "z_offset"],
        ),
        function(CommandKind::Jump, "Make the agent jump", json!({}), &[]),
        function(
            CommandKind::GetInventory,
            "Get the current inventory items and quantities",
            json!({}),
            &[],
        ),
        function(
            CommandKind::CraftItem,
            "Craft an item using available materials",
            json!({
                "item": {
                    "type": "string",
                    "description": "Item to craft (e.g., 'wooden_pickaxe', 'torch', 'chest')"
                },
                "quantity": {
                    "type": "integer",
                    "description": "Number of items to craft (default 1)"
                }
            }),
            &["item"],
        ),
        function(
            CommandKind::LookAround,
            "Get information about blocks and entities in the surrounding area",
            json!({
                "radius": {
                    "type": "integer",
                    "description": "Radius to scan around the agent (default 5)"
                }
            }),
            &[],
        ),
        function(
            CommandKind::Attack,
            "Attack the nearest mob within reach of the agent",
            json!({}),
            &[],
        ),
        function(
            CommandKind::EatFood,
            "Consume food from inventory to restore hunger",
            json!({
                "food_item": {
                    "type": "string",
                    "description": "Type of food to eat (e.g., 'bread', 'apple', 'cooked_beef')"
                }
            }),
            &["food_item"],
        ),
    ]
}

fn function(kind: CommandKind, description: &str, properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "function",
        "name": kind.as_str(),
        "description": description,
        "parameters": {
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        },
        "strict": true
    })
}
