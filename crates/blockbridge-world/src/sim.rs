//! In-memory world session.
//!
//! [`SimWorld`] holds just enough state to exercise every command: the
//! avatar's pose, an inventory, a sparse voxel map (positions never set are
//! unloaded), entities, known recipes, and held control inputs. Every
//! request it receives is appended to a log so callers can check what was
//! (and was not) asked of the world.
//!
//! Navigation is scripted with [`NavigationScript`] instead of planned:
//! setting a goal immediately emits whatever signals the script dictates.
//! Individual confirmed requests can be made to fail with
//! [`SimWorld::with_rejection`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use blockbridge_types::{
    Block, BlockPos, ControlInput, EntityId, EntityKind, EntityView, EquipSlot, ItemStack,
    MovementProfile, NavigationGoal, NavigationSignal, Recipe, Vec3,
};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::SessionError;
use crate::session::WorldSession;

/// Capacity of the navigation signal channel.
///
/// A receiver that falls this far behind gets
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest signal.
const SIGNAL_CAPACITY: usize = 16;

/// First inventory slot of the main inventory grid.
const FIRST_INVENTORY_SLOT: u32 = 9;

/// World-data version reported unless overridden.
const DEFAULT_VERSION: &str = "1.21.1";

/// How the simulated pathfinder answers a new goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationScript {
    /// Move the avatar onto the goal target and emit goal-reached.
    #[default]
    Arrive,
    /// Leave the avatar in place and emit path-timeout.
    TimeOut,
    /// Move the avatar, emit goal-reached, then emit path-timeout as well.
    ArriveThenTimeOut,
    /// Emit nothing.
    Silent,
}

/// Confirmed requests that can be configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectableRequest {
    /// [`WorldSession::equip`].
    Equip,
    /// [`WorldSession::place_block`].
    Place,
    /// [`WorldSession::dig`].
    Dig,
    /// [`WorldSession::craft`].
    Craft,
}

impl RejectableRequest {
    const fn action(self) -> &'static str {
        match self {
            Self::Equip => "equip",
            Self::Place => "place",
            Self::Dig => "dig",
            Self::Craft => "craft",
        }
    }
}

/// One request received by a [`SimWorld`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SimRequest {
    /// A movement profile was installed.
    SetMovements(MovementProfile),
    /// A navigation goal was set.
    SetGoal(NavigationGoal),
    /// The navigation goal was cleared.
    ClearGoal,
    /// A control input was held or released.
    Control {
        /// Which input.
        control: ControlInput,
        /// Held (`true`) or released (`false`).
        active: bool,
    },
    /// The avatar was turned.
    Look {
        /// Requested yaw (radians).
        yaw: f64,
        /// Requested pitch (radians).
        pitch: f64,
    },
    /// An entity was attacked.
    Attack(EntityId),
    /// The held item was consumed.
    Consume,
    /// An item was equipped (recorded even if rejected).
    Equip {
        /// Canonical name of the item.
        item: String,
        /// Destination slot.
        slot: EquipSlot,
    },
    /// A block placement was requested (recorded even if rejected).
    Place {
        /// Voxel of the reference block.
        reference: BlockPos,
        /// Face vector.
        face: Vec3,
    },
    /// A dig was requested (recorded even if rejected).
    Dig(BlockPos),
    /// A craft was requested (recorded even if rejected).
    Craft {
        /// Item the recipe produces.
        result_id: u32,
        /// Number of repetitions.
        count: u32,
    },
}

/// Mutable state behind the [`SimWorld`] lock.
#[derive(Debug)]
struct SimState {
    version: String,
    self_id: EntityId,
    position: Vec3,
    yaw: f64,
    pitch: f64,
    inventory: Vec<ItemStack>,
    held: Option<ItemStack>,
    blocks: BTreeMap<BlockPos, String>,
    entities: Vec<EntityView>,
    recipes: Vec<Recipe>,
    controls: BTreeMap<ControlInput, bool>,
    movements: Option<MovementProfile>,
    goal: Option<NavigationGoal>,
    navigation: NavigationScript,
    rejections: BTreeMap<RejectableRequest, String>,
    requests: Vec<SimRequest>,
    block_queries: usize,
}

impl SimState {
    fn self_view(&self) -> EntityView {
        EntityView {
            id: self.self_id,
            name: Some(String::from("player")),
            display_name: Some(String::from("Blockbridge")),
            kind: EntityKind::Player,
            position: self.position,
        }
    }

    fn check(&self, request: RejectableRequest) -> Result<(), SessionError> {
        match self.rejections.get(&request) {
            Some(reason) => Err(SessionError::rejected(request.action(), reason.clone())),
            None => Ok(()),
        }
    }

    fn equip(&mut self, item: &ItemStack, slot: EquipSlot) -> Result<(), SessionError> {
        self.requests.push(SimRequest::Equip {
            item: item.name.clone(),
            slot,
        });
        self.check(RejectableRequest::Equip)?;
        let held = self
            .inventory
            .iter()
            .find(|stack| stack.slot == item.slot && stack.name == item.name)
            .cloned()
            .ok_or_else(|| SessionError::rejected("equip", "item is not in the inventory"))?;
        self.held = Some(held);
        Ok(())
    }

    fn place(&mut self, reference: &Block, face: Vec3) -> Result<(), SessionError> {
        self.requests.push(SimRequest::Place {
            reference: reference.position,
            face,
        });
        self.check(RejectableRequest::Place)?;
        let held = self
            .held
            .clone()
            .ok_or_else(|| SessionError::rejected("place", "nothing held"))?;
        let target = Vec3::new(
            f64::from(reference.position.x),
            f64::from(reference.position.y),
            f64::from(reference.position.z),
        )
        .add(face)
        .floored();
        self.blocks.insert(target, held.name.clone());
        self.take_one(&held);
        Ok(())
    }

    fn dig(&mut self, block: &Block) -> Result<(), SessionError> {
        self.requests.push(SimRequest::Dig(block.position));
        self.check(RejectableRequest::Dig)?;
        self.blocks.insert(block.position, String::from("air"));
        Ok(())
    }

    fn craft(&mut self, recipe: &Recipe, count: u32) -> Result<(), SessionError> {
        self.requests.push(SimRequest::Craft {
            result_id: recipe.result_id,
            count,
        });
        self.check(RejectableRequest::Craft)
    }

    /// Remove one item from the stack in the held item's slot.
    fn take_one(&mut self, held: &ItemStack) {
        if let Some(stack) = self.inventory.iter_mut().find(|s| s.slot == held.slot) {
            stack.count = stack.count.saturating_sub(1);
        }
        self.inventory.retain(|s| s.count > 0);
        if !self.inventory.iter().any(|s| s.slot == held.slot) {
            self.held = None;
        }
    }
}

/// An in-memory [`WorldSession`].
#[derive(Debug)]
pub struct SimWorld {
    state: Mutex<SimState>,
    signals: broadcast::Sender<NavigationSignal>,
}

impl SimWorld {
    /// Create a world with the avatar at `position`, facing yaw 0 (+x),
    /// with nothing around it.
    pub fn new(position: Vec3) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            state: Mutex::new(SimState {
                version: String::from(DEFAULT_VERSION),
                self_id: EntityId(0),
                position,
                yaw: 0.0,
                pitch: 0.0,
                inventory: Vec::new(),
                held: None,
                blocks: BTreeMap::new(),
                entities: Vec::new(),
                recipes: Vec::new(),
                controls: BTreeMap::new(),
                movements: None,
                goal: None,
                navigation: NavigationScript::default(),
                rejections: BTreeMap::new(),
                requests: Vec::new(),
                block_queries: 0,
            }),
            signals,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut SimState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Report a different world-data version.
    #[must_use]
    pub fn with_version(mut self, version: &str) -> Self {
        self.state_mut().version = String::from(version);
        self
    }

    /// Set the avatar's facing yaw (radians).
    #[must_use]
    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.state_mut().yaw = yaw;
        self
    }

    /// Set the avatar's facing pitch (radians).
    #[must_use]
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.state_mut().pitch = pitch;
        self
    }

    /// Append an item stack in the next free inventory slot.
    #[must_use]
    pub fn with_item(mut self, name: &str, display_name: &str, count: u32) -> Self {
        let state = self.state_mut();
        let used = u32::try_from(state.inventory.len()).unwrap_or(u32::MAX);
        let slot = FIRST_INVENTORY_SLOT.saturating_add(used);
        state.inventory.push(ItemStack {
            name: String::from(name),
            display_name: String::from(display_name),
            count,
            slot,
        });
        self
    }

    /// Set the block at an absolute voxel.
    #[must_use]
    pub fn with_block(mut self, pos: BlockPos, name: &str) -> Self {
        self.state_mut().blocks.insert(pos, String::from(name));
        self
    }

    /// Add a non-avatar entity.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityView) -> Self {
        self.state_mut().entities.push(entity);
        self
    }

    /// Add a known recipe.
    #[must_use]
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.state_mut().recipes.push(recipe);
        self
    }

    /// Choose how goals are answered.
    #[must_use]
    pub fn with_navigation(mut self, script: NavigationScript) -> Self {
        self.state_mut().navigation = script;
        self
    }

    /// Make one kind of confirmed request fail with `reason`.
    #[must_use]
    pub fn with_rejection(mut self, request: RejectableRequest, reason: &str) -> Self {
        self.state_mut()
            .rejections
            .insert(request, String::from(reason));
        self
    }

    // -----------------------------------------------------------------------
    // Runtime control
    // -----------------------------------------------------------------------

    /// Emit a navigation signal to every live receiver.
    ///
    /// Returns how many receivers got it; zero when nobody is listening.
    pub fn emit(&self, signal: NavigationSignal) -> usize {
        self.signals.send(signal).unwrap_or(0)
    }

    /// Number of live navigation-signal receivers.
    pub fn signal_listeners(&self) -> usize {
        self.signals.receiver_count()
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<SimRequest> {
        self.lock().requests.clone()
    }

    /// Whether a control input is currently held.
    pub fn control_active(&self, control: ControlInput) -> bool {
        self.lock().controls.get(&control).copied().unwrap_or(false)
    }

    /// The item currently in hand.
    pub fn held_item(&self) -> Option<ItemStack> {
        self.lock().held.clone()
    }

    /// The current navigation goal.
    pub fn goal(&self) -> Option<NavigationGoal> {
        self.lock().goal
    }

    /// The installed movement profile.
    pub fn movements(&self) -> Option<MovementProfile> {
        self.lock().movements.clone()
    }

    /// How many block-at-position queries have been answered.
    pub fn block_queries(&self) -> usize {
        self.lock().block_queries
    }
}

impl WorldSession for SimWorld {
    fn version(&self) -> String {
        self.lock().version.clone()
    }

    fn self_id(&self) -> EntityId {
        self.lock().self_id
    }

    fn position(&self) -> Vec3 {
        self.lock().position
    }

    fn yaw(&self) -> f64 {
        self.lock().yaw
    }

    fn pitch(&self) -> f64 {
        self.lock().pitch
    }

    fn inventory(&self) -> Vec<ItemStack> {
        self.lock().inventory.clone()
    }

    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        let mut state = self.lock();
        state.block_queries = state.block_queries.saturating_add(1);
        state.blocks.get(&pos).map(|name| Block {
            name: name.clone(),
            position: pos,
        })
    }

    fn entities(&self) -> Vec<EntityView> {
        let state = self.lock();
        let mut all = Vec::with_capacity(state.entities.len().saturating_add(1));
        all.push(state.self_view());
        all.extend(state.entities.iter().cloned());
        all
    }

    fn nearest_entity(&self, filter: &dyn Fn(&EntityView) -> bool) -> Option<EntityView> {
        let origin = self.position();
        self.entities()
            .into_iter()
            .filter(|entity| filter(entity))
            .min_by(|a, b| {
                origin
                    .distance_to(a.position)
                    .total_cmp(&origin.distance_to(b.position))
            })
    }

    fn recipes_for(&self, item_id: u32, min_result_count: u32) -> Vec<Recipe> {
        self.lock()
            .recipes
            .iter()
            .filter(|r| r.result_id == item_id && r.result_count >= min_result_count)
            .cloned()
            .collect()
    }

    fn set_movements(&self, profile: &MovementProfile) {
        let mut state = self.lock();
        state.movements = Some(profile.clone());
        state.requests.push(SimRequest::SetMovements(profile.clone()));
    }

    fn set_goal(&self, goal: NavigationGoal) {
        let script = {
            let mut state = self.lock();
            state.goal = Some(goal);
            state.requests.push(SimRequest::SetGoal(goal));
            if matches!(
                state.navigation,
                NavigationScript::Arrive | NavigationScript::ArriveThenTimeOut
            ) {
                state.position = goal.target;
                state.goal = None;
            }
            state.navigation
        };
        debug!(?script, target = %goal.target, "simulated goal set");
        match script {
            NavigationScript::Arrive => {
                self.emit(NavigationSignal::GoalReached);
            }
            NavigationScript::TimeOut => {
                self.emit(NavigationSignal::PathTimeout);
            }
            NavigationScript::ArriveThenTimeOut => {
                self.emit(NavigationSignal::GoalReached);
                self.emit(NavigationSignal::PathTimeout);
            }
            NavigationScript::Silent => {}
        }
    }

    fn clear_goal(&self) {
        let mut state = self.lock();
        state.goal = None;
        state.requests.push(SimRequest::ClearGoal);
    }

    fn navigation_signals(&self) -> broadcast::Receiver<NavigationSignal> {
        self.signals.subscribe()
    }

    fn set_control_state(&self, control: ControlInput, active: bool) {
        let mut state = self.lock();
        state.controls.insert(control, active);
        state.requests.push(SimRequest::Control { control, active });
    }

    fn look(&self, yaw: f64, pitch: f64) {
        let mut state = self.lock();
        state.yaw = yaw;
        state.pitch = pitch;
        state.requests.push(SimRequest::Look { yaw, pitch });
    }

    fn attack(&self, target: EntityId) {
        self.lock().requests.push(SimRequest::Attack(target));
    }

    fn consume(&self) {
        self.lock().requests.push(SimRequest::Consume);
    }

    fn equip(
        &self,
        item: &ItemStack,
        slot: EquipSlot,
    ) -> impl Future<Output = Result<(), SessionError>> + Send {
        std::future::ready(self.lock().equip(item, slot))
    }

    fn place_block(
        &self,
        reference: &Block,
        face: Vec3,
    ) -> impl Future<Output = Result<(), SessionError>> + Send {
        std::future::ready(self.lock().place(reference, face))
    }

    fn dig(&self, block: &Block) -> impl Future<Output = Result<(), SessionError>> + Send {
        std::future::ready(self.lock().dig(block))
    }

    fn craft(
        &self,
        recipe: &Recipe,
        count: u32,
    ) -> impl Future<Output = Result<(), SessionError>> + Send {
        std::future::ready(self.lock().craft(recipe, count))
    }
}
