//! Shared type definitions for the Blockbridge action interface.
//!
//! Every type here is a *view* onto state owned by an external world
//! session, or a value handed back to the caller once a command settles.
//! Nothing in this crate performs I/O.
//!
//! # Modules
//!
//! - [`ids`] -- Identifiers for command requests and world entities
//! - [`geometry`] -- Continuous positions ([`Vec3`]) and voxel coordinates ([`BlockPos`])
//! - [`world`] -- Snapshots of blocks, items, entities, recipes, and navigation
//! - [`report`] -- The bounded perception report returned by `look_around`
//! - [`outcome`] -- The settled, caller-facing [`CommandOutcome`]

pub mod geometry;
pub mod ids;
pub mod outcome;
pub mod report;
pub mod world;

// Re-export all public types at crate root for convenience.
pub use geometry::{BlockPos, Vec3};
pub use ids::{EntityId, RequestId};
pub use outcome::{CommandKind, CommandOutcome, ErrorKind};
pub use report::{BlockOffset, BlockSample, EntitySample, PerceptionReport};
pub use world::{
    Block, ControlInput, EntityKind, EntityView, EquipSlot, ItemStack, MovementProfile,
    NavigationGoal, NavigationSignal, Recipe, TurnDirection,
};
