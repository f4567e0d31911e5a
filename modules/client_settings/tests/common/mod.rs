//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Mutex;

use client_settings::domain::{EventPublisher, SettingEvent};
use client_settings::{
    Bounds, Category, ModuleDescriptor, SettingNode, SettingValue, UNBOUND_KEY,
};
use indexmap::IndexMap;

/// A combat module exercising every setting kind.
pub fn combat_module() -> ModuleDescriptor {
    let mut click_modes = IndexMap::new();
    click_modes.insert(
        "Spam".to_string(),
        vec![
            SettingNode::int("CPS", 8, 1, 20, "clicks"),
            SettingNode::boolean("Jitter", true),
        ],
    );
    click_modes.insert(
        "Cooldown".to_string(),
        vec![SettingNode::float("Threshold", 0.9, 0.1, 1.0, "")],
    );

    ModuleDescriptor {
        name: "AutoAttack".to_string(),
        category: Category::Combat,
        key_bind: UNBOUND_KEY,
        enabled: false,
        description: "Automatically attacks targets in range".to_string(),
        hidden: false,
        settings: vec![
            SettingNode::float("Range", 4.2, 1.0, 8.0, "m"),
            SettingNode::new(
                "ClickMode",
                SettingValue::Choice {
                    active: "Spam".to_string(),
                    choices: click_modes,
                },
            ),
            SettingNode::new(
                "Rotations",
                SettingValue::Togglable {
                    enabled: true,
                    children: vec![
                        SettingNode::boolean("Silent", false),
                        SettingNode::new(
                            "Speed",
                            SettingValue::IntRange {
                                value: Bounds::new(40, 80),
                                bounds: Bounds::new(1, 180),
                                suffix: "°/t".to_string(),
                            },
                        ),
                    ],
                },
            ),
            SettingNode::new(
                "Exclusions",
                SettingValue::Blocks(vec!["bed".to_string(), "chest".to_string()]),
            ),
            SettingNode::new(
                "Priority",
                SettingValue::Choose {
                    value: "Distance".to_string(),
                    choices: vec![
                        "Distance".to_string(),
                        "Health".to_string(),
                        "Angle".to_string(),
                    ],
                },
            ),
            SettingNode::new(
                "Reach",
                SettingValue::FloatRange {
                    value: Bounds::new(3.0, 4.5),
                    bounds: Bounds::new(1.0, 6.0),
                    suffix: "m".to_string(),
                },
            ),
            SettingNode::new("Marker", SettingValue::Color(0xFF40_80FF)),
            SettingNode::new("TargetKey", SettingValue::Key(19)),
            SettingNode::text("Tag", "default"),
            SettingNode::new(
                "Bypass",
                SettingValue::Configurable(vec![
                    SettingNode::boolean("Strict", false),
                    SettingNode::int("Attempts", 3, 1, 10, ""),
                ]),
            ),
        ],
    }
}

/// A plain movement module with a couple of leaves.
pub fn movement_module(name: &str) -> ModuleDescriptor {
    ModuleDescriptor {
        name: name.to_string(),
        category: Category::Movement,
        key_bind: UNBOUND_KEY,
        enabled: true,
        description: "Movement tweak".to_string(),
        hidden: false,
        settings: vec![
            SettingNode::boolean("OnGround", true),
            SettingNode::int("Ticks", 2, 0, 10, "t"),
        ],
    }
}

/// Event publisher capturing everything it sees.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<SettingEvent>>,
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: SettingEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
