//! Read-only snapshots of world state and the request shapes sent back.
//!
//! None of these values are cached between commands: each one is taken
//! from the world session at the moment a handler needs it.

use serde::{Deserialize, Serialize};

use crate::geometry::{BlockPos, Vec3};
use crate::ids::EntityId;

/// Block names that denote an empty voxel.
const EMPTY_BLOCK_NAMES: [&str; 3] = ["air", "cave_air", "void_air"];

/// One voxel as reported by the world session's block-at-position query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Canonical block name (e.g. `stone`, `oak_log`).
    pub name: String,
    /// Absolute voxel coordinates.
    pub position: BlockPos,
}

impl Block {
    /// Whether the voxel holds nothing (any flavour of air).
    pub fn is_empty(&self) -> bool {
        EMPTY_BLOCK_NAMES.contains(&self.name.as_str())
    }
}

/// Snapshot of one item stack held by the avatar.
///
/// Serializes as `{name, displayName, count, slot}`, the shape
/// `get_inventory` hands back to a tool-calling model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStack {
    /// Canonical item name (e.g. `cooked_beef`).
    pub name: String,
    /// Human-readable label (e.g. `Steak`).
    pub display_name: String,
    /// Number of items in the stack.
    pub count: u32,
    /// Inventory slot index.
    pub slot: u32,
}

/// Broad category of a dynamic entity, as the world session labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Another player.
    Player,
    /// A generic mob (the label older world versions use for every creature).
    Mob,
    /// A hostile creature.
    Hostile,
    /// A passive animal.
    Animal,
    /// A passive non-animal creature (villagers and the like).
    Passive,
    /// A non-living object (dropped items, arrows, minecarts).
    Object,
    /// An experience orb.
    Orb,
    /// A world-global entity (lightning).
    Global,
    /// Anything the session could not classify.
    Other,
}

impl EntityKind {
    /// Whether the attack handler may target an entity of this kind.
    pub const fn is_mob(self) -> bool {
        matches!(self, Self::Mob | Self::Hostile)
    }
}

/// Snapshot of one dynamic entity known to the world session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Session-assigned identifier.
    pub id: EntityId,
    /// Canonical name (e.g. `zombie`), when the session knows one.
    pub name: Option<String>,
    /// Human-readable label, when the session knows one.
    pub display_name: Option<String>,
    /// Broad category.
    pub kind: EntityKind,
    /// Absolute position.
    pub position: Vec3,
}

impl EntityView {
    /// The most specific label available: canonical name, then display
    /// name, then `"unknown"`.
    pub fn label(&self) -> &str {
        self.label_or("unknown")
    }

    /// Canonical name, then display name, then `fallback`.
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or(fallback)
    }
}

/// A crafting recipe the avatar currently knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Numeric identifier of the produced item.
    pub result_id: u32,
    /// Items produced per craft.
    pub result_count: u32,
    /// Whether the recipe needs a crafting table.
    pub requires_table: bool,
}

/// A navigation goal: get within `range` of `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationGoal {
    /// Point to approach.
    pub target: Vec3,
    /// Acceptance radius around `target`.
    pub range: f64,
}

/// Fire-once notification emitted by the pathfinding collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationSignal {
    /// The current goal was reached.
    GoalReached,
    /// The pathfinder gave up on the current goal.
    PathTimeout,
}

/// Movement capabilities handed to the pathfinder before a goal is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Whether the pathfinder may break blocks in the way.
    pub can_dig: bool,
    /// Whether the avatar may sprint.
    pub allow_sprinting: bool,
    /// Whether the avatar may jump across gaps.
    pub allow_parkour: bool,
    /// Highest drop (in blocks) the avatar may take.
    pub max_drop_down: u32,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            can_dig: true,
            allow_sprinting: true,
            allow_parkour: true,
            max_drop_down: 4,
        }
    }
}

/// A control input of the avatar that can be held or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlInput {
    /// Walk forward.
    Forward,
    /// Walk backward.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Jump.
    Jump,
    /// Sprint.
    Sprint,
    /// Sneak.
    Sneak,
}

/// Where an equipped item goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    /// Main hand.
    Hand,
    /// Off hand.
    OffHand,
}

/// Direction of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    /// Counter-clockwise seen from above; decreases yaw.
    Left,
    /// Clockwise seen from above; increases yaw.
    Right,
}

impl core::fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_variants_are_empty() {
        for name in ["air", "cave_air", "void_air"] {
            let block = Block {
                name: String::from(name),
                position: BlockPos::default(),
            };
            assert!(block.is_empty(), "{name} should be empty");
        }
        let stone = Block {
            name: String::from("stone"),
            position: BlockPos::default(),
        };
        assert!(!stone.is_empty());
    }

    #[test]
    fn item_stack_uses_display_name_key() {
        let item = ItemStack {
            name: String::from("cooked_beef"),
            display_name: String::from("Steak"),
            count: 3,
            slot: 36,
        };
        let value = serde_json::to_value(&item).unwrap_or_default();
        assert_eq!(value["displayName"], "Steak");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn entity_label_falls_back() {
        let mut entity = EntityView {
            id: EntityId(7),
            name: None,
            display_name: Some(String::from("Zombie")),
            kind: EntityKind::Hostile,
            position: Vec3::ZERO,
        };
        assert_eq!(entity.label(), "Zombie");
        entity.display_name = None;
        assert_eq!(entity.label(), "unknown");
        assert_eq!(entity.label_or("entity"), "entity");
        entity.name = Some(String::from("zombie"));
        assert_eq!(entity.label_or("entity"), "zombie");
        assert_eq!(entity.label(), "zombie");
    }

    #[test]
    fn only_mob_kinds_are_attackable() {
        assert!(EntityKind::Mob.is_mob());
        assert!(EntityKind::Hostile.is_mob());
        assert!(!EntityKind::Player.is_mob());
        assert!(!EntityKind::Animal.is_mob());
        assert!(!EntityKind::Object.is_mob());
    }

    #[test]
    fn movement_profile_fills_missing_fields() {
        let profile: MovementProfile =
            serde_json::from_str(r#"{"can_dig": false}"#).unwrap_or_default();
        assert!(!profile.can_dig);
        assert!(profile.allow_sprinting);
        assert_eq!(profile.max_drop_down, 4);
    }
}
