//! The action dispatcher: one handler per command.
//!
//! Each handler reads what it needs from the [`WorldSession`], issues at
//! most one chain of mutating requests, and settles exactly once. The
//! typed handlers return `Result<_, ActionError>`; [`ActionDispatcher::execute`]
//! folds any of them into a [`CommandOutcome`].
//!
//! Preconditions (a matching item, a target block, a target entity, a known
//! recipe, valid arguments) are checked before anything is asked of the
//! world, so a failed precondition never leaves a request behind.
//!
//! Physical commands must be serialized by the caller: the avatar has one
//! body, and concurrently issued movement or digging interleaves however
//! the world processes it. The two query commands never mutate and may run
//! alongside anything.

use std::sync::Arc;

use blockbridge_types::{
    CommandKind, CommandOutcome, ControlInput, EntityView, EquipSlot, ItemStack, NavigationGoal,
    NavigationSignal, PerceptionReport, RequestId, TurnDirection, Vec3,
};
use blockbridge_world::{ItemCatalog, SessionError, WorldSession};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::inventory;
use crate::perception;
use crate::settle::NavigationWait;
use crate::tools::{self, Command};

/// Name used for an attack target the session has no name for.
const ATTACK_FALLBACK_LABEL: &str = "entity";

/// What a successful command hands back before it becomes an outcome.
#[derive(Debug)]
enum Completion {
    /// Confirmation text only.
    Message(String),
    /// A query result plus a short summary.
    Payload {
        message: String,
        payload: Value,
    },
}

/// Runs symbolic commands against one world session.
#[derive(Debug)]
pub struct ActionDispatcher<S, C> {
    session: Arc<S>,
    catalog: Arc<C>,
    config: ActionConfig,
}

impl<S: WorldSession, C: ItemCatalog> ActionDispatcher<S, C> {
    /// Create a dispatcher with the default configuration.
    pub fn new(session: Arc<S>, catalog: Arc<C>) -> Self {
        Self {
            session,
            catalog,
            config: ActionConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ActionConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub const fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// The world session commands run against.
    pub fn session(&self) -> &S {
        &self.session
    }

    // -----------------------------------------------------------------------
    // Outcome surface
    // -----------------------------------------------------------------------

    /// Run one command and settle it as a [`CommandOutcome`].
    pub async fn execute(&self, command: Command) -> CommandOutcome {
        let request_id = RequestId::new();
        let kind = command.kind();
        debug!(%request_id, command = %kind, ?command, "command requested");

        match self.run(command).await {
            Ok(Completion::Message(message)) => {
                info!(%request_id, command = %kind, %message, "command succeeded");
                CommandOutcome::succeeded(request_id, kind, message)
            }
            Ok(Completion::Payload { message, payload }) => {
                info!(%request_id, command = %kind, %message, "command succeeded");
                CommandOutcome::succeeded_with_payload(request_id, kind, message, payload)
            }
            Err(error) => {
                warn!(
                    %request_id,
                    command = %kind,
                    kind = ?error.kind(),
                    error = %error,
                    "command failed"
                );
                CommandOutcome::failed(request_id, Some(kind), error.kind(), error.to_string())
            }
        }
    }

    /// Parse a model's function call and run it.
    ///
    /// A call that does not parse still settles exactly once, as a failed
    /// outcome.
    pub async fn execute_tool_call(&self, name: &str, arguments: &str) -> CommandOutcome {
        match tools::parse_tool_call(name, arguments) {
            Ok(command) => self.execute(command).await,
            Err(error) => {
                let request_id = RequestId::new();
                warn!(%request_id, name, error = %error, "tool call rejected");
                CommandOutcome::failed(
                    request_id,
                    CommandKind::from_name(name),
                    error.kind(),
                    error.to_string(),
                )
            }
        }
    }

    async fn run(&self, command: Command) -> Result<Completion, ActionError> {
        let message = match command {
            Command::MoveForward { distance } => self.move_forward(distance).await?,
            Command::Turn { direction, degrees } => self.turn(direction, degrees)?,
            Command::PlaceBlock {
                block_type,
                x_offset,
                y_offset,
                z_offset,
            } => {
                let offset = Vec3::new(x_offset, y_offset, z_offset);
                self.place_block(&block_type, offset).await?
            }
            Command::MineBlock {
                x_offset,
                y_offset,
                z_offset,
            } => {
                self.mine_block(Vec3::new(x_offset, y_offset, z_offset))
                    .await?
            }
            Command::Jump {} => self.jump().await,
            Command::GetInventory {} => {
                let items = self.get_inventory();
                return Ok(Completion::Payload {
                    message: format!("{} item stacks in inventory", items.len()),
                    payload: serde_json::to_value(&items)?,
                });
            }
            Command::CraftItem { item, quantity } => self.craft_item(&item, quantity).await?,
            Command::LookAround { radius } => {
                let radius = radius.unwrap_or(self.config.default_look_radius);
                let report = self.look_around(radius);
                return Ok(Completion::Payload {
                    message: format!(
                        "Saw {} blocks and {} entities within {radius} blocks",
                        report.blocks.len(),
                        report.entities.len()
                    ),
                    payload: serde_json::to_value(&report)?,
                });
            }
            Command::Attack {} => self.attack()?,
            Command::EatFood { food_item } => self.eat_food(&food_item).await?,
        };
        Ok(Completion::Message(message))
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    /// Walk `distance` blocks along the current facing.
    ///
    /// The target is `distance` units from the current position in the
    /// horizontal direction of the current yaw, accepted within
    /// `goal_range`. Settles on the first navigation signal; a zero
    /// distance still issues the goal and waits for it.
    ///
    /// # Errors
    ///
    /// [`ActionError::InvalidArgument`] for a negative or non-finite
    /// distance, [`ActionError::PathTimeout`] if the pathfinder times out or
    /// the navigation deadline passes, [`ActionError::SessionClosed`] if the
    /// signal source goes away first.
    pub async fn move_forward(&self, distance: f64) -> Result<String, ActionError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(ActionError::invalid(format!(
                "distance must be a finite, non-negative number, got {distance}"
            )));
        }
        let session = self.session();
        let target = session.position().forward(session.yaw(), distance);
        let goal = NavigationGoal {
            target,
            range: self.config.goal_range,
        };

        session.set_movements(&self.config.movement);
        let mut wait = NavigationWait::subscribe(session);
        wait.mark_requested();
        session.set_goal(goal);
        debug!(distance, target = %goal.target, "navigation goal set");

        let signal = match self.config.navigation_deadline() {
            None => wait.wait().await?,
            Some(deadline) => {
                let waited = tokio::time::timeout(deadline, wait.wait()).await;
                match waited {
                    Ok(result) => result?,
                    Err(_elapsed) => {
                        wait.expire();
                        session.clear_goal();
                        warn!(?deadline, "no navigation signal before deadline, goal cleared");
                        return Err(ActionError::PathTimeout);
                    }
                }
            }
        };

        match signal {
            NavigationSignal::GoalReached => Ok(format!("Moved forward {distance} blocks")),
            NavigationSignal::PathTimeout => Err(ActionError::PathTimeout),
        }
    }

    /// Rotate in place. Left decreases yaw, right increases it.
    ///
    /// # Errors
    ///
    /// [`ActionError::InvalidArgument`] for non-finite degrees.
    pub fn turn(&self, direction: TurnDirection, degrees: f64) -> Result<String, ActionError> {
        if !degrees.is_finite() {
            return Err(ActionError::invalid(format!(
                "degrees must be finite, got {degrees}"
            )));
        }
        let session = self.session();
        let delta = degrees.to_radians();
        let yaw = match direction {
            TurnDirection::Left => session.yaw() - delta,
            TurnDirection::Right => session.yaw() + delta,
        };
        session.look(yaw, session.pitch());
        Ok(format!("Turned {direction} {degrees} degrees"))
    }

    /// Place a block from the inventory.
    ///
    /// The first item matching `block_type` is equipped to the hand, then
    /// placed against the block directly below the avatar with `offset` as
    /// the face vector. A failed placement does not undo the equip.
    ///
    /// # Errors
    ///
    /// [`ActionError::ItemNotFound`], [`ActionError::EquipFailure`] or
    /// [`ActionError::PlacementFailure`] (which includes having no loaded
    /// block below the avatar). Non-finite offsets are
    /// [`ActionError::InvalidArgument`].
    pub async fn place_block(&self, block_type: &str, offset: Vec3) -> Result<String, ActionError> {
        if !offset.is_finite() {
            return Err(ActionError::invalid(format!(
                "offset must be finite, got {offset}"
            )));
        }
        let session = self.session();
        let item = inventory::resolve(session, block_type).ok_or_else(|| {
            ActionError::ItemNotFound {
                query: String::from(block_type),
            }
        })?;

        self.equip(&item).await?;

        let below = session.position().offset(0.0, -1.0, 0.0).floored();
        let reference = session
            .block_at(below)
            .ok_or_else(|| ActionError::PlacementFailure {
                block_type: String::from(block_type),
                source: SessionError::rejected("place", "no loaded block below the avatar"),
            })?;
        debug!(item = %item.name, reference = %reference.position, face = %offset, "placing block");
        session
            .place_block(&reference, offset)
            .await
            .map_err(|source| ActionError::PlacementFailure {
                block_type: String::from(block_type),
                source,
            })?;

        Ok(format!("Placed {block_type} block at offset {offset}"))
    }

    /// Break the block at `offset` from the avatar.
    ///
    /// # Errors
    ///
    /// [`ActionError::NoTargetBlock`] if the voxel is unloaded or empty,
    /// [`ActionError::DigFailure`] if the session refuses the dig.
    pub async fn mine_block(&self, offset: Vec3) -> Result<String, ActionError> {
        if !offset.is_finite() {
            return Err(ActionError::invalid(format!(
                "offset must be finite, got {offset}"
            )));
        }
        let session = self.session();
        let target = session.position().add(offset).floored();
        let block = session
            .block_at(target)
            .filter(|block| !block.is_empty())
            .ok_or(ActionError::NoTargetBlock { offset })?;

        debug!(block = %block.name, position = %block.position, "digging");
        session
            .dig(&block)
            .await
            .map_err(|source| ActionError::DigFailure {
                block: block.name.clone(),
                source,
            })?;

        Ok(format!("Mined {} at offset {offset}", block.name))
    }

    /// Hold the jump control for `jump_hold_ms`, then release it.
    ///
    /// The session has no "landed" signal, so the hold time stands in for
    /// one. Always settles successfully.
    pub async fn jump(&self) -> String {
        let session = self.session();
        session.set_control_state(ControlInput::Jump, true);
        tokio::time::sleep(self.config.jump_hold()).await;
        session.set_control_state(ControlInput::Jump, false);

        debug!(hold_ms = self.config.jump_hold_ms, "jump released");
        String::from("Jumped")
    }

    /// Snapshot of the inventory, in enumeration order.
    pub fn get_inventory(&self) -> Vec<ItemStack> {
        self.session().inventory()
    }

    /// Craft `item` `quantity` times using the first recipe the avatar
    /// knows for it.
    ///
    /// # Errors
    ///
    /// [`ActionError::InvalidArgument`] for a zero quantity,
    /// [`ActionError::RecipeNotFound`] if the item is unknown to the catalog
    /// or no recipe is known, [`ActionError::CraftFailure`] if the session
    /// refuses the craft.
    pub async fn craft_item(&self, item: &str, quantity: u32) -> Result<String, ActionError> {
        if quantity == 0 {
            return Err(ActionError::invalid("quantity must be at least 1"));
        }
        let session = self.session();
        let not_found = || ActionError::RecipeNotFound {
            item: String::from(item),
        };

        let version = session.version();
        let item_id = self.catalog.item_id(&version, item).ok_or_else(not_found)?;
        let recipe = session
            .recipes_for(item_id, 1)
            .into_iter()
            .next()
            .ok_or_else(not_found)?;

        debug!(item, item_id, quantity, %version, "crafting");
        session
            .craft(&recipe, quantity)
            .await
            .map_err(|source| ActionError::CraftFailure {
                item: String::from(item),
                source,
            })?;

        Ok(format!("Crafted {quantity} {item}(s)"))
    }

    /// Report non-empty blocks and other entities around the avatar.
    pub fn look_around(&self, radius: u32) -> PerceptionReport {
        perception::look_around(self.session(), radius, self.config.max_reported_blocks)
    }

    /// Attack the nearest mob strictly closer than `attack_range`.
    ///
    /// # Errors
    ///
    /// [`ActionError::NoTargetFound`] if no mob is in range.
    pub fn attack(&self) -> Result<String, ActionError> {
        let session = self.session();
        let self_id = session.self_id();
        let origin = session.position();
        let range = self.config.attack_range;

        let eligible = |entity: &EntityView| {
            entity.id != self_id
                && entity.kind.is_mob()
                && origin.distance_to(entity.position) < range
        };
        let target = session
            .nearest_entity(&eligible)
            .ok_or(ActionError::NoTargetFound { range })?;

        session.attack(target.id);
        Ok(format!("Attacked {}", target.label_or(ATTACK_FALLBACK_LABEL)))
    }

    /// Equip the first item matching `food` and start eating it.
    ///
    /// Settles once the consume request is issued.
    ///
    /// # Errors
    ///
    /// [`ActionError::ItemNotFound`] or [`ActionError::EquipFailure`].
    pub async fn eat_food(&self, food: &str) -> Result<String, ActionError> {
        let session = self.session();
        let item = inventory::resolve(session, food).ok_or_else(|| ActionError::ItemNotFound {
            query: String::from(food),
        })?;

        self.equip(&item).await?;
        session.consume();
        Ok(format!("Ate {food}"))
    }

    async fn equip(&self, item: &ItemStack) -> Result<(), ActionError> {
        self.session()
            .equip(item, EquipSlot::Hand)
            .await
            .map_err(|source| ActionError::EquipFailure {
                item: item.name.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockbridge_types::{BlockPos, EntityId, EntityKind, ErrorKind, Recipe};
    use blockbridge_world::{RejectableRequest, SimRequest, SimWorld, StaticItemCatalog};

    fn make_dispatcher(world: SimWorld) -> ActionDispatcher<SimWorld, StaticItemCatalog> {
        let catalog = StaticItemCatalog::new()
            .with_item("1.21.1", "torch", 800)
            .with_item("1.21.1", "stick", 801);
        ActionDispatcher::new(Arc::new(world), Arc::new(catalog))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn negative_distance_is_rejected_without_requests() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        for distance in [-1.0, f64::NAN, f64::INFINITY] {
            let result = dispatcher.move_forward(distance).await;
            assert!(matches!(result, Err(ActionError::InvalidArgument { .. })));
        }
        assert!(dispatcher.session().requests().is_empty());
    }

    #[tokio::test]
    async fn zero_distance_still_waits_for_arrival() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::new(1.0, 64.0, 1.0)));
        let result = dispatcher.move_forward(0.0).await;
        assert_eq!(result.ok().as_deref(), Some("Moved forward 0 blocks"));
        let goals = dispatcher
            .session()
            .requests()
            .into_iter()
            .filter(|r| matches!(r, SimRequest::SetGoal(_)))
            .count();
        assert_eq!(goals, 1);
    }

    #[tokio::test]
    async fn movement_profile_is_installed_before_the_goal() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        let _ = dispatcher.move_forward(2.0).await;
        assert_eq!(
            dispatcher.session().movements(),
            Some(dispatcher.config().movement.clone())
        );
        let requests = dispatcher.session().requests();
        assert!(matches!(
            requests.as_slice(),
            [SimRequest::SetMovements(_), SimRequest::SetGoal(goal)]
                if approx(goal.range, 1.0) && approx(goal.target.x, 2.0)
        ));
    }

    #[test]
    fn turn_formats_whole_degrees() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        let message = dispatcher.turn(TurnDirection::Right, 90.0);
        assert_eq!(message.ok().as_deref(), Some("Turned right 90 degrees"));
        assert!(approx(
            dispatcher.session().yaw(),
            std::f64::consts::FRAC_PI_2
        ));
    }

    #[test]
    fn turn_keeps_pitch() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO).with_pitch(0.3));
        let _ = dispatcher.turn(TurnDirection::Left, 45.0);
        assert!(approx(dispatcher.session().pitch(), 0.3));
    }

    #[tokio::test]
    async fn place_without_block_below_fails_after_equip() {
        let world = SimWorld::new(Vec3::new(0.5, 64.0, 0.5)).with_item("dirt", "Dirt", 4);
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.place_block("dirt", Vec3::new(0.0, 1.0, 0.0)).await;
        assert!(matches!(result, Err(ActionError::PlacementFailure { .. })));
        // The equip is not rolled back.
        assert_eq!(
            dispatcher.session().held_item().map(|i| i.name),
            Some(String::from("dirt"))
        );
    }

    #[tokio::test]
    async fn place_message_reports_offset() {
        let world = SimWorld::new(Vec3::new(0.5, 64.0, 0.5))
            .with_item("cobblestone", "Cobblestone", 4)
            .with_block(BlockPos::new(0, 63, 0), "grass_block");
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.place_block("cobble", Vec3::new(1.0, 0.0, 0.0)).await;
        assert_eq!(
            result.ok().as_deref(),
            Some("Placed cobble block at offset (1, 0, 0)")
        );
        assert_eq!(
            dispatcher.session().block_at(BlockPos::new(1, 63, 0)).map(|b| b.name),
            Some(String::from("cobblestone"))
        );
    }

    #[tokio::test]
    async fn mining_air_is_no_target() {
        let world = SimWorld::new(Vec3::ZERO).with_block(BlockPos::new(1, 0, 0), "cave_air");
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.mine_block(Vec3::new(1.0, 0.0, 0.0)).await;
        assert!(matches!(result, Err(ActionError::NoTargetBlock { .. })));
        let unloaded = dispatcher.mine_block(Vec3::new(0.0, 5.0, 0.0)).await;
        assert!(matches!(unloaded, Err(ActionError::NoTargetBlock { .. })));
        assert!(dispatcher.session().requests().is_empty());
    }

    #[tokio::test]
    async fn mining_floors_the_target() {
        let world = SimWorld::new(Vec3::new(0.7, 64.0, 0.2))
            .with_block(BlockPos::new(0, 63, -1), "stone");
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.mine_block(Vec3::new(0.0, -1.0, -1.0)).await;
        assert_eq!(result.ok().as_deref(), Some("Mined stone at offset (0, -1, -1)"));
        assert_eq!(
            dispatcher.session().requests(),
            vec![SimRequest::Dig(BlockPos::new(0, 63, -1))]
        );
    }

    #[tokio::test]
    async fn zero_quantity_craft_is_invalid() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        let result = dispatcher.craft_item("torch", 0).await;
        assert!(matches!(result, Err(ActionError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn unknown_item_has_no_recipe() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        let result = dispatcher.craft_item("warp_drive", 1).await;
        assert!(matches!(result, Err(ActionError::RecipeNotFound { .. })));
    }

    #[tokio::test]
    async fn catalog_lookup_uses_session_version() {
        let world = SimWorld::new(Vec3::ZERO)
            .with_version("1.20.4")
            .with_recipe(Recipe {
                result_id: 800,
                result_count: 4,
                requires_table: false,
            });
        let dispatcher = make_dispatcher(world);
        // The catalog only knows torches for 1.21.1.
        let result = dispatcher.craft_item("torch", 1).await;
        assert!(matches!(result, Err(ActionError::RecipeNotFound { .. })));
    }

    #[tokio::test]
    async fn craft_uses_first_recipe_and_requested_count() {
        let world = SimWorld::new(Vec3::ZERO).with_recipe(Recipe {
            result_id: 801,
            result_count: 4,
            requires_table: false,
        });
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.craft_item("stick", 3).await;
        assert_eq!(result.ok().as_deref(), Some("Crafted 3 stick(s)"));
        assert_eq!(
            dispatcher.session().requests(),
            vec![SimRequest::Craft {
                result_id: 801,
                count: 3
            }]
        );
    }

    #[test]
    fn attack_range_is_strict() {
        let zombie = EntityView {
            id: EntityId(7),
            name: Some(String::from("zombie")),
            display_name: None,
            kind: EntityKind::Hostile,
            position: Vec3::new(4.0, 0.0, 0.0),
        };
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO).with_entity(zombie));
        assert!(matches!(
            dispatcher.attack(),
            Err(ActionError::NoTargetFound { .. })
        ));
        assert!(dispatcher.session().requests().is_empty());
    }

    #[test]
    fn unnamed_target_is_called_entity() {
        let nameless = EntityView {
            id: EntityId(9),
            name: None,
            display_name: None,
            kind: EntityKind::Mob,
            position: Vec3::new(1.0, 0.0, 0.0),
        };
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO).with_entity(nameless));
        assert_eq!(dispatcher.attack().ok().as_deref(), Some("Attacked entity"));
    }

    #[tokio::test]
    async fn eat_equips_then_consumes() {
        let world = SimWorld::new(Vec3::ZERO).with_item("bread", "Bread", 3);
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.eat_food("bread").await;
        assert_eq!(result.ok().as_deref(), Some("Ate bread"));
        let requests = dispatcher.session().requests();
        assert!(matches!(
            requests.as_slice(),
            [SimRequest::Equip { item, slot: EquipSlot::Hand }, SimRequest::Consume] if item == "bread"
        ));
    }

    #[tokio::test]
    async fn rejected_equip_stops_eating() {
        let world = SimWorld::new(Vec3::ZERO)
            .with_item("apple", "Apple", 1)
            .with_rejection(RejectableRequest::Equip, "hands full");
        let dispatcher = make_dispatcher(world);
        let result = dispatcher.eat_food("apple").await;
        assert!(matches!(result, Err(ActionError::EquipFailure { .. })));
        assert!(
            !dispatcher
                .session()
                .requests()
                .contains(&SimRequest::Consume)
        );
    }

    #[tokio::test]
    async fn execute_wraps_failures_with_kind() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        let outcome = dispatcher
            .execute(Command::EatFood {
                food_item: String::from("cake"),
            })
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.command, Some(CommandKind::EatFood));
        assert_eq!(outcome.error, Some(ErrorKind::ItemNotFound));
        assert_eq!(outcome.message, "No cake found in inventory");
        assert_eq!(outcome.to_tool_output(), "error: No cake found in inventory");
    }

    #[tokio::test]
    async fn execute_attaches_inventory_payload() {
        let world = SimWorld::new(Vec3::ZERO).with_item("torch", "Torch", 12);
        let dispatcher = make_dispatcher(world);
        let outcome = dispatcher.execute(Command::GetInventory {}).await;
        assert!(outcome.success);
        let payload = outcome.payload.unwrap_or_default();
        assert_eq!(
            payload,
            serde_json::json!([{ "name": "torch", "displayName": "Torch", "count": 12, "slot": 9 }])
        );
    }

    #[tokio::test]
    async fn look_around_defaults_radius_from_config() {
        let config = ActionConfig {
            default_look_radius: 1,
            ..ActionConfig::default()
        };
        let world = SimWorld::new(Vec3::ZERO).with_block(BlockPos::new(2, 0, 0), "stone");
        let dispatcher = make_dispatcher(world).with_config(config);
        let outcome = dispatcher.execute(Command::LookAround { radius: None }).await;
        assert!(outcome.success);
        assert_eq!(dispatcher.session().block_queries(), 27);
        let blocks = outcome
            .payload
            .and_then(|p| p.get("blocks").cloned())
            .unwrap_or_default();
        assert_eq!(blocks, serde_json::json!([]));
    }

    #[tokio::test]
    async fn unparseable_tool_call_settles_once_as_failure() {
        let dispatcher = make_dispatcher(SimWorld::new(Vec3::ZERO));
        let outcome = dispatcher.execute_tool_call("move_forward", "{}").await;
        assert!(!outcome.success);
        assert_eq!(outcome.command, Some(CommandKind::MoveForward));
        assert_eq!(outcome.error, Some(ErrorKind::InvalidArgument));

        let unknown = dispatcher.execute_tool_call("teleport", "{}").await;
        assert_eq!(unknown.command, None);
        assert_eq!(unknown.error, Some(ErrorKind::UnknownCommand));
        assert!(dispatcher.session().requests().is_empty());
    }
}
