//! Mutation applier: resolves an edit path into the settings tree and applies
//! a validated write
//!
//! Validation always happens before any state is written, so a failed apply
//! leaves the tree exactly as it was.

use serde_json::Value;

use crate::contract::{Bounds, SettingNode, SettingValue, SettingsError};

use super::validation;

/// Terminal path segment addressing a Choice's active branch name.
pub const ACTIVE_SEGMENT: &str = "active";

/// Implicit child name addressing a Togglable's enabled flag.
pub const ENABLED_CHILD: &str = "Enabled";

/// Resolve `path` against `nodes` and write `new_value` into the terminal
/// setting. Path segments name children of composite nodes; Choice branches
/// are addressed by choice name and switched via the terminal
/// [`ACTIVE_SEGMENT`].
pub fn apply_to_nodes(
    nodes: &mut [SettingNode],
    path: &[String],
    new_value: &Value,
) -> Result<(), SettingsError> {
    apply_inner(nodes, path, path, new_value)
}

fn apply_inner(
    nodes: &mut [SettingNode],
    full: &[String],
    rest: &[String],
    new_value: &Value,
) -> Result<(), SettingsError> {
    let (segment, tail) = rest.split_first().ok_or_else(|| path_not_found(full))?;
    let node = nodes
        .iter_mut()
        .find(|n| n.name == *segment)
        .ok_or_else(|| path_not_found(full))?;

    if tail.is_empty() {
        return write_leaf(node, new_value);
    }

    match &mut node.value {
        SettingValue::Configurable(children) => apply_inner(children, full, tail, new_value),
        SettingValue::Togglable { enabled, children } => {
            if tail.len() == 1 && tail[0] == ENABLED_CHILD {
                let flag = new_value
                    .as_bool()
                    .ok_or_else(|| mismatch(&node.name, "BOOLEAN"))?;
                *enabled = flag;
                Ok(())
            } else {
                apply_inner(children, full, tail, new_value)
            }
        }
        SettingValue::Choice { active, choices } => {
            if tail.len() == 1 && tail[0] == ACTIVE_SEGMENT {
                // Compound operation: switch the active branch in one step.
                // The previously active branch keeps its values.
                let next = new_value
                    .as_str()
                    .ok_or_else(|| mismatch(&node.name, "TEXT"))?;
                if !choices.contains_key(next) {
                    return Err(SettingsError::UnknownChoice {
                        name: node.name.clone(),
                        choice: next.to_string(),
                    });
                }
                *active = next.to_string();
                Ok(())
            } else {
                let (choice, choice_tail) = tail.split_first().ok_or_else(|| path_not_found(full))?;
                let children = choices
                    .get_mut(choice)
                    .ok_or_else(|| path_not_found(full))?;
                if choice_tail.is_empty() {
                    return Err(mismatch(choice, "a leaf setting"));
                }
                apply_inner(children, full, choice_tail, new_value)
            }
        }
        _ => Err(path_not_found(full)),
    }
}

fn write_leaf(node: &mut SettingNode, new_value: &Value) -> Result<(), SettingsError> {
    let name = node.name.clone();
    match &mut node.value {
        SettingValue::Boolean(current) => {
            let v = new_value
                .as_bool()
                .ok_or_else(|| mismatch(&name, "BOOLEAN"))?;
            *current = v;
            Ok(())
        }
        SettingValue::Int { value, bounds, .. } => {
            let v = new_value.as_i64().ok_or_else(|| mismatch(&name, "INT"))?;
            validation::check_int(&name, v, bounds)?;
            *value = v;
            Ok(())
        }
        SettingValue::IntRange { value, bounds, .. } => {
            let span = parse_int_span(&name, new_value)?;
            validation::check_int_span(&name, &span, bounds)?;
            *value = span;
            Ok(())
        }
        SettingValue::Float { value, bounds, .. } => {
            let v = new_value.as_f64().ok_or_else(|| mismatch(&name, "FLOAT"))?;
            validation::check_float(&name, v, bounds)?;
            *value = v;
            Ok(())
        }
        SettingValue::FloatRange { value, bounds, .. } => {
            let span = parse_float_span(&name, new_value)?;
            validation::check_float_span(&name, &span, bounds)?;
            *value = span;
            Ok(())
        }
        SettingValue::Text(current) => {
            let v = new_value.as_str().ok_or_else(|| mismatch(&name, "TEXT"))?;
            *current = v.to_string();
            Ok(())
        }
        SettingValue::Blocks(entries) => {
            if let Some(entry) = new_value.as_str() {
                // Single string inserts into the list
                if entries.iter().any(|e| e == entry) {
                    return Err(SettingsError::DuplicateEntry {
                        name,
                        entry: entry.to_string(),
                    });
                }
                entries.push(entry.to_string());
                Ok(())
            } else if let Some(items) = new_value.as_array() {
                // An array replaces the whole list
                let list = items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()
                    .ok_or_else(|| mismatch(&name, "BLOCKS"))?;
                validation::check_unique_entries(&name, &list)?;
                *entries = list;
                Ok(())
            } else {
                Err(mismatch(&name, "BLOCKS"))
            }
        }
        SettingValue::Key(current) => {
            let v = new_value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| mismatch(&name, "KEY"))?;
            *current = v;
            Ok(())
        }
        SettingValue::Color(current) => {
            let v = new_value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| mismatch(&name, "COLOR"))?;
            *current = v;
            Ok(())
        }
        SettingValue::Choose { value, choices } => {
            let v = new_value.as_str().ok_or_else(|| mismatch(&name, "CHOOSE"))?;
            validation::check_membership(&name, v, choices)?;
            *value = v.to_string();
            Ok(())
        }
        SettingValue::Choice { .. }
        | SettingValue::Configurable(_)
        | SettingValue::Togglable { .. } => Err(mismatch(&name, "a leaf setting")),
    }
}

fn parse_int_span(name: &str, value: &Value) -> Result<Bounds<i64>, SettingsError> {
    let from = value.get("from").and_then(Value::as_i64);
    let to = value.get("to").and_then(Value::as_i64);
    match (from, to) {
        (Some(from), Some(to)) => Ok(Bounds::new(from, to)),
        _ => Err(mismatch(name, "INT_RANGE")),
    }
}

fn parse_float_span(name: &str, value: &Value) -> Result<Bounds<f64>, SettingsError> {
    let from = value.get("from").and_then(Value::as_f64);
    let to = value.get("to").and_then(Value::as_f64);
    match (from, to) {
        (Some(from), Some(to)) => Ok(Bounds::new(from, to)),
        _ => Err(mismatch(name, "FLOAT_RANGE")),
    }
}

fn mismatch(name: &str, expected: &'static str) -> SettingsError {
    SettingsError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}

fn path_not_found(full: &[String]) -> SettingsError {
    SettingsError::PathNotFound {
        path: full.join("/"),
    }
}

// ===== Snapshot restore =====

/// Copy values from `incoming` into `live`, matching siblings by name.
///
/// Structure always comes from `live`: subtrees without a counterpart, with a
/// mismatched kind, or violating the live node's invariant are skipped with a
/// warning while their siblings still apply.
pub fn merge_nodes(live: &mut [SettingNode], incoming: &[SettingNode]) {
    for inc in incoming {
        match live.iter_mut().find(|n| n.name == inc.name) {
            Some(node) => merge_node(node, inc),
            None => tracing::warn!(setting = %inc.name, "snapshot names an unknown setting, skipping"),
        }
    }
}

fn merge_node(node: &mut SettingNode, incoming: &SettingNode) {
    let name = node.name.clone();
    match (&mut node.value, &incoming.value) {
        (SettingValue::Boolean(a), SettingValue::Boolean(b)) => *a = *b,
        (SettingValue::Int { value, bounds, .. }, SettingValue::Int { value: v, .. }) => {
            if bounds.contains(*v) {
                *value = *v;
            } else {
                warn_skipped(&name, "value out of bounds");
            }
        }
        (SettingValue::IntRange { value, bounds, .. }, SettingValue::IntRange { value: v, .. }) => {
            if bounds.contains_span(v) {
                *value = *v;
            } else {
                warn_skipped(&name, "span out of bounds");
            }
        }
        (SettingValue::Float { value, bounds, .. }, SettingValue::Float { value: v, .. }) => {
            if bounds.contains(*v) {
                *value = *v;
            } else {
                warn_skipped(&name, "value out of bounds");
            }
        }
        (
            SettingValue::FloatRange { value, bounds, .. },
            SettingValue::FloatRange { value: v, .. },
        ) => {
            if bounds.contains_span(v) {
                *value = *v;
            } else {
                warn_skipped(&name, "span out of bounds");
            }
        }
        (SettingValue::Text(a), SettingValue::Text(b)) => *a = b.clone(),
        (SettingValue::Blocks(a), SettingValue::Blocks(b)) => {
            if validation::check_unique_entries(&name, b).is_ok() {
                *a = b.clone();
            } else {
                warn_skipped(&name, "duplicate entries");
            }
        }
        (SettingValue::Key(a), SettingValue::Key(b)) => *a = *b,
        (SettingValue::Color(a), SettingValue::Color(b)) => *a = *b,
        (SettingValue::Choose { value, choices }, SettingValue::Choose { value: v, .. }) => {
            if choices.iter().any(|c| c == v) {
                *value = v.clone();
            } else {
                warn_skipped(&name, "unknown choice");
            }
        }
        (
            SettingValue::Choice { active, choices },
            SettingValue::Choice {
                active: inc_active,
                choices: inc_choices,
            },
        ) => {
            for (choice, inc_children) in inc_choices {
                match choices.get_mut(choice) {
                    Some(children) => merge_nodes(children, inc_children),
                    None => warn_skipped(choice, "unknown choice branch"),
                }
            }
            if choices.contains_key(inc_active) {
                *active = inc_active.clone();
            } else {
                warn_skipped(&name, "unknown active choice");
            }
        }
        (SettingValue::Configurable(children), SettingValue::Configurable(inc_children)) => {
            merge_nodes(children, inc_children);
        }
        (
            SettingValue::Togglable { enabled, children },
            SettingValue::Togglable {
                enabled: inc_enabled,
                children: inc_children,
            },
        ) => {
            *enabled = *inc_enabled;
            merge_nodes(children, inc_children);
        }
        _ => warn_skipped(&name, "kind mismatch"),
    }
}

fn warn_skipped(name: &str, reason: &str) {
    tracing::warn!(setting = %name, reason, "snapshot value skipped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;

    fn mode_choice() -> SettingNode {
        let mut choices = IndexMap::new();
        choices.insert(
            "Vanilla".to_string(),
            vec![SettingNode::int("Speed", 3, 0, 10, "")],
        );
        choices.insert(
            "Smooth".to_string(),
            vec![SettingNode::float("Factor", 1.0, 0.1, 4.0, "x")],
        );
        SettingNode::new(
            "Mode",
            SettingValue::Choice {
                active: "Vanilla".to_string(),
                choices,
            },
        )
    }

    #[test]
    fn leaf_write_resolves_nested_path() {
        let mut nodes = vec![SettingNode::new(
            "Rotations",
            SettingValue::Configurable(vec![SettingNode::boolean("Silent", false)]),
        )];
        let path = vec!["Rotations".to_string(), "Silent".to_string()];
        apply_to_nodes(&mut nodes, &path, &json!(true)).expect("apply");
        assert_eq!(
            nodes[0].value,
            SettingValue::Configurable(vec![SettingNode::boolean("Silent", true)])
        );
    }

    #[test]
    fn missing_segment_reports_full_path() {
        let mut nodes = vec![SettingNode::new(
            "outer",
            SettingValue::Configurable(vec![SettingNode::boolean("inner", false)]),
        )];
        let path = vec!["outer".to_string(), "missing".to_string()];
        let err = apply_to_nodes(&mut nodes, &path, &json!(true));
        assert_eq!(
            err,
            Err(SettingsError::PathNotFound {
                path: "outer/missing".to_string()
            })
        );
    }

    #[test]
    fn choice_switch_keeps_inactive_branch() {
        let mut nodes = vec![mode_choice()];
        let speed_path = vec!["Mode".to_string(), "Vanilla".to_string(), "Speed".to_string()];
        apply_to_nodes(&mut nodes, &speed_path, &json!(7)).expect("apply");

        let active_path = vec!["Mode".to_string(), ACTIVE_SEGMENT.to_string()];
        apply_to_nodes(&mut nodes, &active_path, &json!("Smooth")).expect("switch");

        match &nodes[0].value {
            SettingValue::Choice { active, choices } => {
                assert_eq!(active, "Smooth");
                assert_eq!(
                    choices["Vanilla"][0].value,
                    SettingValue::Int {
                        value: 7,
                        bounds: Bounds::new(0, 10),
                        suffix: String::new(),
                    }
                );
            }
            other => panic!("expected choice, got {other:?}"),
        }
    }

    #[test]
    fn switch_to_unknown_choice_rejected() {
        let mut nodes = vec![mode_choice()];
        let path = vec!["Mode".to_string(), ACTIVE_SEGMENT.to_string()];
        let err = apply_to_nodes(&mut nodes, &path, &json!("Teleport"));
        assert!(matches!(err, Err(SettingsError::UnknownChoice { .. })));
    }

    #[test]
    fn blocks_string_inserts_array_replaces() {
        let mut nodes = vec![SettingNode::new(
            "Targets",
            SettingValue::Blocks(vec!["stone".to_string()]),
        )];
        let path = vec!["Targets".to_string()];

        apply_to_nodes(&mut nodes, &path, &json!("dirt")).expect("insert");
        apply_to_nodes(&mut nodes, &path, &json!(["sand", "gravel"])).expect("replace");
        assert_eq!(
            nodes[0].value,
            SettingValue::Blocks(vec!["sand".to_string(), "gravel".to_string()])
        );
    }

    #[test]
    fn togglable_enabled_flag_addressable() {
        let mut nodes = vec![SettingNode::new(
            "AutoPot",
            SettingValue::Togglable {
                enabled: false,
                children: vec![SettingNode::int("Health", 10, 0, 20, "HP")],
            },
        )];
        let path = vec!["AutoPot".to_string(), ENABLED_CHILD.to_string()];
        apply_to_nodes(&mut nodes, &path, &json!(true)).expect("apply");
        assert!(matches!(
            nodes[0].value,
            SettingValue::Togglable { enabled: true, .. }
        ));
    }

    #[test]
    fn merge_restores_values_not_structure() {
        let mut live = vec![
            SettingNode::int("Range", 3, 0, 6, "m"),
            SettingNode::boolean("Wall", false),
        ];
        let incoming = vec![
            SettingNode::int("Range", 5, 0, 6, "m"),
            SettingNode::text("Gone", "missing"),
        ];
        merge_nodes(&mut live, &incoming);
        assert_eq!(
            live[0].value,
            SettingValue::Int {
                value: 5,
                bounds: Bounds::new(0, 6),
                suffix: "m".to_string(),
            }
        );
        assert_eq!(live.len(), 2);
    }
}
