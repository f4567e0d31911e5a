//! Integration tests for the schema serializer

use client_settings::api::wire::mapper;
use client_settings::{ModuleRegistry, SettingsError};
use serde_json::json;

mod common;
use common::combat_module;

#[test]
fn every_kind_round_trips() {
    let descriptor = combat_module();
    for node in &descriptor.settings {
        let wire = serde_json::to_value(mapper::serialize_node(node)).unwrap();
        let back = mapper::deserialize_node(&wire)
            .unwrap_or_else(|e| panic!("{} failed to round-trip: {e}", node.name));
        assert_eq!(&back, node, "observable value drifted for {}", node.name);
    }
}

#[test]
fn wire_field_names_are_stable() {
    let descriptor = combat_module();
    let range = &descriptor.settings[0];
    let wire = serde_json::to_value(mapper::serialize_node(range)).unwrap();

    assert_eq!(wire["valueType"], "FLOAT");
    assert_eq!(wire["name"], "Range");
    assert_eq!(wire["range"]["from"], 1.0);
    assert_eq!(wire["range"]["to"], 8.0);
    assert_eq!(wire["suffix"], "m");
    assert_eq!(wire["value"], 4.2);
}

#[test]
fn choice_wire_carries_picker_and_detail_panel() {
    let descriptor = combat_module();
    let choice = descriptor
        .settings
        .iter()
        .find(|n| n.name == "ClickMode")
        .unwrap();
    let wire = serde_json::to_value(mapper::serialize_node(choice)).unwrap();

    assert_eq!(wire["valueType"], "CHOICE");
    assert_eq!(wire["active"], "Spam");
    // Picker: every choice serialized as a named subtree
    assert_eq!(wire["choices"]["Spam"]["valueType"], "CONFIGURABLE");
    assert_eq!(wire["choices"]["Cooldown"]["valueType"], "CONFIGURABLE");
    // Detail panel: the active branch's settings repeated under `value`
    let detail: Vec<&str> = wire["value"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(detail, vec!["CPS", "Jitter"]);
}

#[test]
fn unknown_tag_aborts_only_its_subtree() {
    let wire = json!({
        "valueType": "CONFIGURABLE",
        "name": "Outer",
        "value": [
            {"valueType": "ITEM", "name": "Relic", "value": "sword"},
        ],
    });
    assert_eq!(
        mapper::deserialize_node(&wire),
        Err(SettingsError::UnsupportedKind {
            value_type: "ITEM".to_string()
        })
    );

    // A sibling of the poisoned subtree still deserializes on its own
    let sibling = json!({"valueType": "TEXT", "name": "Tag", "value": "ok"});
    assert!(mapper::deserialize_node(&sibling).is_ok());
}

#[test]
fn module_listing_uses_the_agreed_field_names() {
    let registry = ModuleRegistry::default();
    registry.register(combat_module()).unwrap();

    let groups = registry.list_by_category(false);
    let wire = serde_json::to_value(mapper::grouped_modules_dto(&groups)).unwrap();

    let module = &wire["Combat"][0];
    assert_eq!(module["name"], "AutoAttack");
    assert_eq!(module["category"], "Combat");
    assert_eq!(module["keyBind"], -1);
    assert_eq!(module["enabled"], false);
    assert_eq!(module["hidden"], false);
    assert!(module["description"].is_string());
}
