//! Kind-specific invariant checks for setting values
//!
//! Used both at module registration (whole-tree validation) and on every
//! write. All checks reject rather than clamp.

use std::collections::HashSet;

use crate::contract::{Bounds, SettingNode, SettingValue, SettingsError};

/// Validate an entire settings tree: sibling name uniqueness plus every
/// node's declared invariant, recursively.
pub fn validate_tree(nodes: &[SettingNode]) -> Result<(), SettingsError> {
    ensure_unique_names(nodes)?;
    for node in nodes {
        validate_node(node)?;
    }
    Ok(())
}

fn validate_node(node: &SettingNode) -> Result<(), SettingsError> {
    match &node.value {
        SettingValue::Int { value, bounds, .. } => check_int(&node.name, *value, bounds),
        SettingValue::IntRange { value, bounds, .. } => check_int_span(&node.name, value, bounds),
        SettingValue::Float { value, bounds, .. } => check_float(&node.name, *value, bounds),
        SettingValue::FloatRange { value, bounds, .. } => {
            check_float_span(&node.name, value, bounds)
        }
        SettingValue::Blocks(entries) => check_unique_entries(&node.name, entries),
        SettingValue::Choose { value, choices } => check_membership(&node.name, value, choices),
        SettingValue::Choice { active, choices } => {
            if !choices.contains_key(active) {
                return Err(SettingsError::UnknownChoice {
                    name: node.name.clone(),
                    choice: active.clone(),
                });
            }
            for children in choices.values() {
                validate_tree(children)?;
            }
            Ok(())
        }
        SettingValue::Configurable(children) => validate_tree(children),
        SettingValue::Togglable { children, .. } => validate_tree(children),
        SettingValue::Boolean(_)
        | SettingValue::Text(_)
        | SettingValue::Key(_)
        | SettingValue::Color(_) => Ok(()),
    }
}

/// Sibling names must be unique so edit paths resolve unambiguously.
pub(crate) fn ensure_unique_names(nodes: &[SettingNode]) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            return Err(SettingsError::DuplicateEntry {
                name: node.name.clone(),
                entry: node.name.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn check_int(name: &str, value: i64, bounds: &Bounds<i64>) -> Result<(), SettingsError> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(out_of_range(name, value, bounds.from, bounds.to))
    }
}

pub(crate) fn check_float(
    name: &str,
    value: f64,
    bounds: &Bounds<f64>,
) -> Result<(), SettingsError> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(out_of_range(name, value, bounds.from, bounds.to))
    }
}

pub(crate) fn check_int_span(
    name: &str,
    value: &Bounds<i64>,
    bounds: &Bounds<i64>,
) -> Result<(), SettingsError> {
    if bounds.contains_span(value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name: name.to_string(),
            value: format!("{}..{}", value.from, value.to),
            from: bounds.from.to_string(),
            to: bounds.to.to_string(),
        })
    }
}

pub(crate) fn check_float_span(
    name: &str,
    value: &Bounds<f64>,
    bounds: &Bounds<f64>,
) -> Result<(), SettingsError> {
    if bounds.contains_span(value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            name: name.to_string(),
            value: format!("{}..{}", value.from, value.to),
            from: bounds.from.to_string(),
            to: bounds.to.to_string(),
        })
    }
}

/// Entries of a Blocks list must be unique.
pub(crate) fn check_unique_entries(name: &str, entries: &[String]) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.as_str()) {
            return Err(SettingsError::DuplicateEntry {
                name: name.to_string(),
                entry: entry.clone(),
            });
        }
    }
    Ok(())
}

/// A Choose value must be one of the declared choices.
pub(crate) fn check_membership(
    name: &str,
    value: &str,
    choices: &[String],
) -> Result<(), SettingsError> {
    if choices.iter().any(|c| c == value) {
        Ok(())
    } else {
        Err(SettingsError::UnknownChoice {
            name: name.to_string(),
            choice: value.to_string(),
        })
    }
}

fn out_of_range<T: std::fmt::Display>(name: &str, value: T, from: T, to: T) -> SettingsError {
    SettingsError::OutOfRange {
        name: name.to_string(),
        value: value.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn int_within_bounds() {
        assert!(check_int("Speed", 5, &Bounds::new(0, 10)).is_ok());
        assert!(check_int("Speed", 0, &Bounds::new(0, 10)).is_ok());
        assert!(check_int("Speed", 10, &Bounds::new(0, 10)).is_ok());
    }

    #[test]
    fn int_out_of_bounds() {
        let err = check_int("Speed", 11, &Bounds::new(0, 10));
        assert!(matches!(err, Err(SettingsError::OutOfRange { .. })));
    }

    #[test]
    fn span_must_be_ordered() {
        let result = check_int_span("Delay", &Bounds::new(7, 3), &Bounds::new(0, 10));
        assert!(matches!(result, Err(SettingsError::OutOfRange { .. })));
    }

    #[test]
    fn span_within_bounds() {
        assert!(check_int_span("Delay", &Bounds::new(2, 8), &Bounds::new(0, 10)).is_ok());
    }

    #[test]
    fn duplicate_entries_rejected() {
        let entries = vec!["stone".to_string(), "dirt".to_string(), "stone".to_string()];
        let result = check_unique_entries("Exclusions", &entries);
        assert_eq!(
            result,
            Err(SettingsError::DuplicateEntry {
                name: "Exclusions".to_string(),
                entry: "stone".to_string(),
            })
        );
    }

    #[test]
    fn membership_check() {
        let choices = vec!["Low".to_string(), "High".to_string()];
        assert!(check_membership("Detail", "Low", &choices).is_ok());
        assert!(matches!(
            check_membership("Detail", "Ultra", &choices),
            Err(SettingsError::UnknownChoice { .. })
        ));
    }

    #[test]
    fn tree_with_duplicate_sibling_names_rejected() {
        let nodes = vec![
            SettingNode::boolean("Enabled", true),
            SettingNode::boolean("Enabled", false),
        ];
        assert!(validate_tree(&nodes).is_err());
    }

    #[test]
    fn tree_with_invalid_active_choice_rejected() {
        let mut choices = IndexMap::new();
        choices.insert("Vanilla".to_string(), vec![SettingNode::boolean("Fast", false)]);
        let nodes = vec![SettingNode::new(
            "Mode",
            SettingValue::Choice {
                active: "Missing".to_string(),
                choices,
            },
        )];
        assert!(matches!(
            validate_tree(&nodes),
            Err(SettingsError::UnknownChoice { .. })
        ));
    }
}
