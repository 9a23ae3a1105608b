//! The [`WorldSession`] trait: one live, already-authenticated connection
//! to the world and the avatar it controls.
//!
//! Reads return fresh snapshots on every call. Fire-and-forget requests
//! (`look`, `attack`, `consume`, control states, navigation goals) are
//! accepted on issue. Requests the world can refuse (`equip`,
//! `place_block`, `dig`, `craft`) are asynchronous and resolve once the
//! world confirms or rejects them.
//!
//! The session has exactly one body and one control state. It performs no
//! locking on behalf of its callers: physical requests issued concurrently
//! interleave however the world happens to process them.

use std::future::Future;

use blockbridge_types::{
    Block, BlockPos, ControlInput, EntityId, EntityView, EquipSlot, ItemStack, MovementProfile,
    NavigationGoal, NavigationSignal, Recipe, Vec3,
};
use tokio::sync::broadcast;

use crate::error::SessionError;

/// A live connection to the world and the avatar it controls.
pub trait WorldSession: Send + Sync {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// World-data version string (selects item metadata).
    fn version(&self) -> String;

    /// Entity identifier of the avatar itself.
    fn self_id(&self) -> EntityId;

    /// Current avatar position.
    fn position(&self) -> Vec3;

    /// Current facing yaw, in radians.
    fn yaw(&self) -> f64;

    /// Current facing pitch, in radians.
    fn pitch(&self) -> f64;

    /// Item stacks currently held, in inventory enumeration order.
    fn inventory(&self) -> Vec<ItemStack>;

    /// The block at a voxel, or `None` if that voxel is not loaded.
    fn block_at(&self, pos: BlockPos) -> Option<Block>;

    /// Every entity the session knows about, the avatar included.
    fn entities(&self) -> Vec<EntityView>;

    /// The nearest entity (distance-ascending, session's own ordering) for
    /// which `filter` returns true.
    fn nearest_entity(&self, filter: &dyn Fn(&EntityView) -> bool) -> Option<EntityView>;

    /// Known recipes producing `item_id` that yield at least
    /// `min_result_count` items per craft.
    fn recipes_for(&self, item_id: u32, min_result_count: u32) -> Vec<Recipe>;

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Install the movement profile the pathfinder plans with.
    fn set_movements(&self, profile: &MovementProfile);

    /// Replace the current navigation goal.
    fn set_goal(&self, goal: NavigationGoal);

    /// Abandon the current navigation goal, if any.
    fn clear_goal(&self);

    /// Subscribe to goal-reached / path-timeout signals.
    ///
    /// Signals are delivered to every live receiver. Dropping the receiver
    /// detaches from the source.
    fn navigation_signals(&self) -> broadcast::Receiver<NavigationSignal>;

    // -----------------------------------------------------------------------
    // Fire-and-forget requests
    // -----------------------------------------------------------------------

    /// Hold (`true`) or release (`false`) a control input.
    fn set_control_state(&self, control: ControlInput, active: bool);

    /// Face the given yaw and pitch immediately.
    fn look(&self, yaw: f64, pitch: f64);

    /// Swing at an entity.
    fn attack(&self, target: EntityId);

    /// Start consuming the held item.
    fn consume(&self);

    // -----------------------------------------------------------------------
    // Confirmed requests
    // -----------------------------------------------------------------------

    /// Move `item` into `slot`.
    fn equip(
        &self,
        item: &ItemStack,
        slot: EquipSlot,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Place the held block against `reference`, on the face pointed to by
    /// `face`.
    fn place_block(
        &self,
        reference: &Block,
        face: Vec3,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Break `block`.
    fn dig(&self, block: &Block) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Run `recipe` `count` times.
    fn craft(
        &self,
        recipe: &Recipe,
        count: u32,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;
}
