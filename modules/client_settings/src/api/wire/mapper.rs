//! Schema serializer: converts between the domain settings tree and the wire
//! representation, preserving variant discriminators and nested structure
//!
//! `deserialize_node` is the left inverse of `serialize_node` on observable
//! values. Unknown `valueType` tags fail closed with `UnsupportedKind`,
//! aborting only the subtree they appear in.

use indexmap::IndexMap;
use serde_json::Value;

use crate::contract::{
    Bounds, Category, ModuleInfo, SettingNode, SettingValue, SettingsError,
};
use crate::domain::mutation::ENABLED_CHILD;

use super::dto::{
    FloatRangeDto, GroupedModulesDto, IntRangeDto, ModuleDto, ModuleSnapshotDto, SettingDto,
};

const KNOWN_TAGS: [&str; 13] = [
    "BOOLEAN",
    "INT",
    "INT_RANGE",
    "FLOAT",
    "FLOAT_RANGE",
    "TEXT",
    "BLOCKS",
    "KEY",
    "COLOR",
    "CHOICE",
    "CHOOSE",
    "CONFIGURABLE",
    "TOGGLABLE",
];

fn known_tag(tag: &str) -> Option<&'static str> {
    KNOWN_TAGS.iter().find(|t| **t == tag).copied()
}

// ===== Serialization =====

pub fn serialize_nodes(nodes: &[SettingNode]) -> Vec<SettingDto> {
    nodes.iter().map(serialize_node).collect()
}

pub fn serialize_node(node: &SettingNode) -> SettingDto {
    let name = node.name.clone();
    match &node.value {
        SettingValue::Boolean(value) => SettingDto::Boolean {
            name,
            value: *value,
        },
        SettingValue::Int {
            value,
            bounds,
            suffix,
        } => SettingDto::Int {
            name,
            range: int_range(bounds),
            suffix: suffix.clone(),
            value: *value,
        },
        SettingValue::IntRange {
            value,
            bounds,
            suffix,
        } => SettingDto::IntRange {
            name,
            range: int_range(bounds),
            suffix: suffix.clone(),
            value: int_range(value),
        },
        SettingValue::Float {
            value,
            bounds,
            suffix,
        } => SettingDto::Float {
            name,
            range: float_range(bounds),
            suffix: suffix.clone(),
            value: *value,
        },
        SettingValue::FloatRange {
            value,
            bounds,
            suffix,
        } => SettingDto::FloatRange {
            name,
            range: float_range(bounds),
            suffix: suffix.clone(),
            value: float_range(value),
        },
        SettingValue::Text(value) => SettingDto::Text {
            name,
            value: value.clone(),
        },
        SettingValue::Blocks(value) => SettingDto::Blocks {
            name,
            value: value.clone(),
        },
        SettingValue::Key(value) => SettingDto::Key {
            name,
            value: *value,
        },
        SettingValue::Color(value) => SettingDto::Color {
            name,
            value: *value,
        },
        SettingValue::Choice { active, choices } => {
            let choice_map: IndexMap<String, SettingDto> = choices
                .iter()
                .map(|(choice, children)| {
                    (
                        choice.clone(),
                        SettingDto::Configurable {
                            name: choice.clone(),
                            value: serialize_nodes(children),
                        },
                    )
                })
                .collect();
            // The active subtree is repeated in `value` for the detail panel.
            let value = choices
                .get(active)
                .map(|children| serialize_nodes(children))
                .unwrap_or_default();
            SettingDto::Choice {
                name,
                active: active.clone(),
                choices: choice_map,
                value,
            }
        }
        SettingValue::Choose { value, choices } => SettingDto::Choose {
            name,
            choices: choices.clone(),
            value: value.clone(),
        },
        SettingValue::Configurable(children) => SettingDto::Configurable {
            name,
            value: serialize_nodes(children),
        },
        SettingValue::Togglable { enabled, children } => {
            let mut value = Vec::with_capacity(children.len() + 1);
            value.push(SettingDto::Boolean {
                name: ENABLED_CHILD.to_string(),
                value: *enabled,
            });
            value.extend(children.iter().map(serialize_node));
            SettingDto::Togglable { name, value }
        }
    }
}

fn int_range(bounds: &Bounds<i64>) -> IntRangeDto {
    IntRangeDto {
        from: bounds.from,
        to: bounds.to,
    }
}

fn float_range(bounds: &Bounds<f64>) -> FloatRangeDto {
    FloatRangeDto {
        from: bounds.from,
        to: bounds.to,
    }
}

// ===== Deserialization =====

/// Rebuild a setting node from its wire representation.
pub fn deserialize_node(value: &Value) -> Result<SettingNode, SettingsError> {
    let raw_tag = value
        .get("valueType")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let tag = known_tag(raw_tag).ok_or_else(|| SettingsError::UnsupportedKind {
        value_type: raw_tag.to_string(),
    })?;

    match tag {
        "CONFIGURABLE" => {
            let name = name_field(value, tag)?;
            let children = deserialize_children(value, &name)?;
            Ok(SettingNode::new(name, SettingValue::Configurable(children)))
        }
        "TOGGLABLE" => {
            let name = name_field(value, tag)?;
            let mut children = deserialize_children(value, &name)?;
            // Fold the implicit leading Enabled child back into the flag
            let folded = match children.first() {
                Some(SettingNode {
                    name,
                    value: SettingValue::Boolean(b),
                }) if name == ENABLED_CHILD => Some(*b),
                _ => None,
            };
            let enabled = match folded {
                Some(b) => {
                    children.remove(0);
                    b
                }
                None => false,
            };
            Ok(SettingNode::new(
                name,
                SettingValue::Togglable { enabled, children },
            ))
        }
        "CHOICE" => {
            let name = name_field(value, tag)?;
            let active = value
                .get("active")
                .and_then(Value::as_str)
                .ok_or_else(|| mismatch(&name, tag))?
                .to_string();
            let entries = value
                .get("choices")
                .and_then(Value::as_object)
                .ok_or_else(|| mismatch(&name, tag))?;
            let mut choices = IndexMap::new();
            for (choice, subtree) in entries {
                let node = deserialize_node(subtree)?;
                match node.value {
                    SettingValue::Configurable(children) => {
                        choices.insert(choice.clone(), children);
                    }
                    _ => return Err(mismatch(choice, "CONFIGURABLE")),
                }
            }
            if !choices.contains_key(&active) {
                return Err(SettingsError::UnknownChoice { name, choice: active });
            }
            // The redundant `value` copy of the active subtree is derived
            // state and ignored on the way in.
            Ok(SettingNode::new(
                name,
                SettingValue::Choice { active, choices },
            ))
        }
        _ => {
            let name = value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string();
            let dto: SettingDto =
                serde_json::from_value(value.clone()).map_err(|_| mismatch(&name, tag))?;
            leaf_from_dto(dto)
        }
    }
}

fn leaf_from_dto(dto: SettingDto) -> Result<SettingNode, SettingsError> {
    let node = match dto {
        SettingDto::Boolean { name, value } => SettingNode::new(name, SettingValue::Boolean(value)),
        SettingDto::Int {
            name,
            range,
            suffix,
            value,
        } => SettingNode::new(
            name,
            SettingValue::Int {
                value,
                bounds: Bounds::new(range.from, range.to),
                suffix,
            },
        ),
        SettingDto::IntRange {
            name,
            range,
            suffix,
            value,
        } => SettingNode::new(
            name,
            SettingValue::IntRange {
                value: Bounds::new(value.from, value.to),
                bounds: Bounds::new(range.from, range.to),
                suffix,
            },
        ),
        SettingDto::Float {
            name,
            range,
            suffix,
            value,
        } => SettingNode::new(
            name,
            SettingValue::Float {
                value,
                bounds: Bounds::new(range.from, range.to),
                suffix,
            },
        ),
        SettingDto::FloatRange {
            name,
            range,
            suffix,
            value,
        } => SettingNode::new(
            name,
            SettingValue::FloatRange {
                value: Bounds::new(value.from, value.to),
                bounds: Bounds::new(range.from, range.to),
                suffix,
            },
        ),
        SettingDto::Text { name, value } => SettingNode::new(name, SettingValue::Text(value)),
        SettingDto::Blocks { name, value } => SettingNode::new(name, SettingValue::Blocks(value)),
        SettingDto::Key { name, value } => SettingNode::new(name, SettingValue::Key(value)),
        SettingDto::Color { name, value } => SettingNode::new(name, SettingValue::Color(value)),
        SettingDto::Choose {
            name,
            choices,
            value,
        } => SettingNode::new(name, SettingValue::Choose { value, choices }),
        // Composite tags are handled before the DTO path
        SettingDto::Choice { .. }
        | SettingDto::Configurable { .. }
        | SettingDto::Togglable { .. } => return Err(SettingsError::Internal),
    };
    Ok(node)
}

fn deserialize_children(value: &Value, name: &str) -> Result<Vec<SettingNode>, SettingsError> {
    value
        .get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| mismatch(name, "a settings list"))?
        .iter()
        .map(deserialize_node)
        .collect()
}

fn name_field(value: &Value, tag: &'static str) -> Result<String, SettingsError> {
    value
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| mismatch("?", tag))
}

fn mismatch(name: &str, expected: &'static str) -> SettingsError {
    SettingsError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}

// ===== Module mapping =====

pub fn module_dto(info: &ModuleInfo) -> ModuleDto {
    ModuleDto {
        name: info.name.clone(),
        category: info.category.name().to_string(),
        key_bind: info.key_bind,
        enabled: info.enabled,
        description: info.description.clone(),
        hidden: info.hidden,
    }
}

pub fn grouped_modules_dto(groups: &[(Category, Vec<ModuleInfo>)]) -> GroupedModulesDto {
    groups
        .iter()
        .map(|(category, infos)| {
            (
                category.name().to_string(),
                infos.iter().map(module_dto).collect(),
            )
        })
        .collect()
}

pub fn snapshot_dto(info: &ModuleInfo, settings: &[SettingNode]) -> ModuleSnapshotDto {
    ModuleSnapshotDto {
        name: info.name.clone(),
        enabled: info.enabled,
        key_bind: info.key_bind,
        settings: serialize_nodes(settings),
    }
}

/// Parse a module snapshot leniently: unsupported or malformed sibling
/// subtrees are skipped with a warning so the rest still restores.
pub fn parse_snapshot(
    value: &Value,
) -> Result<(Option<bool>, Option<i32>, Vec<SettingNode>), SettingsError> {
    if !value.is_object() {
        return Err(mismatch("snapshot", "an object"));
    }
    let enabled = value.get("enabled").and_then(Value::as_bool);
    let key_bind = value
        .get("keyBind")
        .and_then(Value::as_i64)
        .and_then(|k| i32::try_from(k).ok());
    let mut settings = Vec::new();
    if let Some(items) = value.get("settings").and_then(Value::as_array) {
        for item in items {
            match deserialize_node(item) {
                Ok(node) => settings.push(node),
                Err(error) => tracing::warn!(%error, "skipping snapshot subtree"),
            }
        }
    }
    Ok((enabled, key_bind, settings))
}
