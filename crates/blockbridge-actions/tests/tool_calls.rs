//! Tool-call round trips: a model's function call goes in as a name plus a
//! JSON argument string, and the text handed back to the model comes out.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use blockbridge_actions::{ActionDispatcher, tool_definitions};
use blockbridge_types::{BlockPos, CommandKind, CommandOutcome, ErrorKind, Recipe, Vec3};
use blockbridge_world::{SimWorld, StaticItemCatalog};
use serde_json::{Value, json};

fn make_dispatcher() -> ActionDispatcher<SimWorld, StaticItemCatalog> {
    let world = SimWorld::new(Vec3::new(0.5, 64.0, 0.5))
        .with_item("oak_log", "Oak Log", 4)
        .with_item("bread", "Bread", 2)
        .with_block(BlockPos::new(0, 63, 0), "grass_block")
        .with_block(BlockPos::new(1, 64, 0), "oak_log")
        .with_recipe(Recipe {
            result_id: 36,
            result_count: 4,
            requires_table: false,
        });
    let catalog = StaticItemCatalog::new().with_item("1.21.1", "oak_planks", 36);
    ActionDispatcher::new(Arc::new(world), Arc::new(catalog))
}

#[test]
fn every_command_has_a_schema() {
    let tools = tool_definitions();
    assert_eq!(tools.len(), CommandKind::ALL.len());
    for (tool, kind) in tools.iter().zip(CommandKind::ALL) {
        assert_eq!(tool["name"], kind.as_str());
        assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}

#[tokio::test]
async fn inventory_output_is_pretty_json() {
    let dispatcher = make_dispatcher();

    let outcome = dispatcher.execute_tool_call("get_inventory", "{}").await;
    let text = outcome.to_tool_output();

    assert!(text.contains('\n'));
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed[0]["name"], "oak_log");
    assert_eq!(parsed[1]["displayName"], "Bread");
    assert_eq!(parsed[1]["count"], 2);
}

#[tokio::test]
async fn look_around_output_has_blocks_and_entities() {
    let dispatcher = make_dispatcher();

    let outcome = dispatcher
        .execute_tool_call("look_around", r#"{"radius": 1}"#)
        .await;
    let parsed: Value = serde_json::from_str(&outcome.to_tool_output()).unwrap();

    assert_eq!(
        parsed["blocks"],
        json!([
            { "name": "grass_block", "position": { "x": 0, "y": -1, "z": 0 } },
            { "name": "oak_log", "position": { "x": 1, "y": 0, "z": 0 } },
        ])
    );
    assert_eq!(parsed["entities"], json!([]));
}

#[tokio::test]
async fn a_short_session_of_calls() {
    let dispatcher = make_dispatcher();

    let calls = [
        ("mine_block", r#"{"x_offset": 1, "y_offset": 0, "z_offset": 0}"#),
        ("craft_item", r#"{"item": "oak_planks", "quantity": 2}"#),
        ("place_block", r#"{"block_type": "log", "x_offset": 0, "y_offset": 1}"#),
        ("turn", r#"{"direction": "right", "degrees": 180}"#),
        ("eat_food", r#"{"food_item": "bread"}"#),
    ];
    let mut outputs = Vec::new();
    for (name, arguments) in calls {
        outputs.push(dispatcher.execute_tool_call(name, arguments).await.to_tool_output());
    }

    assert_eq!(
        outputs,
        vec![
            "Mined oak_log at offset (1, 0, 0)",
            "Crafted 2 oak_planks(s)",
            "Placed log block at offset (0, 1, 0)",
            "Turned right 180 degrees",
            "Ate bread",
        ]
    );
}

#[tokio::test]
async fn bad_calls_render_as_errors() {
    let dispatcher = make_dispatcher();

    let unknown = dispatcher.execute_tool_call("fly", "{}").await;
    assert_eq!(unknown.error, Some(ErrorKind::UnknownCommand));
    assert_eq!(unknown.to_tool_output(), "error: unknown command: fly");

    let malformed = dispatcher.execute_tool_call("move_forward", "{\"distance\":").await;
    assert_eq!(malformed.error, Some(ErrorKind::InvalidArgument));
    assert!(malformed.to_tool_output().starts_with("error: invalid argument: move_forward"));

    let negative = dispatcher
        .execute_tool_call("move_forward", r#"{"distance": -2}"#)
        .await;
    assert_eq!(negative.command, Some(CommandKind::MoveForward));
    assert_eq!(negative.error, Some(ErrorKind::InvalidArgument));

    assert!(dispatcher.session().requests().is_empty());
}

#[tokio::test]
async fn outcome_serializes_for_transport() {
    let dispatcher = make_dispatcher();

    let outcome = dispatcher
        .execute_tool_call("eat_food", r#"{"food_item": "cake"}"#)
        .await;
    let value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(value["success"], false);
    assert_eq!(value["command"], "eat_food");
    assert_eq!(value["error"], "ItemNotFound");
    assert_eq!(value["payload"], Value::Null);

    let back: CommandOutcome = serde_json::from_value(value).unwrap();
    assert_eq!(back, outcome);
}
