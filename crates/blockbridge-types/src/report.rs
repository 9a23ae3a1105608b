//! The perception report returned by `look_around`.
//!
//! Serialized shape:
//!
//! ```text
//! {
//!   "blocks":   [{ "name": "stone", "position": { "x": -1, "y": -1, "z": 0 } }, ...],
//!   "entities": [{ "name": "zombie", "type": "hostile", "distance": 3.16,
//!                  "position": { "x": 3.0, "y": 64.0, "z": 1.0 } }, ...]
//! }
//! ```
//!
//! Block positions are offsets relative to the avatar's voxel; entity
//! positions are absolute.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::world::EntityKind;

/// A voxel offset relative to the avatar's own voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockOffset {
    /// East-west offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
    /// North-south offset.
    pub z: i32,
}

/// One non-empty voxel discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSample {
    /// Canonical block name.
    pub name: String,
    /// Offset from the avatar's voxel.
    pub position: BlockOffset,
}

/// One nearby dynamic entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySample {
    /// Best available label (see `EntityView::label`).
    pub name: String,
    /// Broad category.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Distance from the avatar, rounded to two decimal places.
    pub distance: f64,
    /// Absolute position.
    pub position: Vec3,
}

/// Bounded summary of the avatar's surroundings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerceptionReport {
    /// Non-empty voxels in scan order, capped.
    pub blocks: Vec<BlockSample>,
    /// Entities within the scan radius, uncapped.
    pub entities: Vec<EntitySample>,
}
