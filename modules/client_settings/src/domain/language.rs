//! Client language override exposed through the settings tree
//!
//! Textual commands and the UI edit the same Choose node, so there is a
//! single source of truth with a fixed known-set validator. The empty string
//! means "no override".

use serde_json::Value;

use crate::config::Config;
use crate::contract::{
    Category, ModuleDescriptor, SettingNode, SettingValue, SettingsError, UNBOUND_KEY,
};

use super::registry::ModuleRegistry;

/// Hidden module carrying client-wide configuration entries.
pub const CLIENT_MODULE: &str = "Client";

/// Name of the language override setting.
pub const LANGUAGE_SETTING: &str = "Language";

/// Choose value meaning "no override".
pub const NO_OVERRIDE: &str = "";

/// Register the hidden client module. Applies the persisted language override
/// from configuration; an override outside the known set fails registration.
pub fn register_client_module(
    registry: &ModuleRegistry,
    config: &Config,
) -> Result<(), SettingsError> {
    let mut choices = vec![NO_OVERRIDE.to_string()];
    choices.extend(config.known_languages.iter().cloned());

    registry.register(ModuleDescriptor {
        name: CLIENT_MODULE.to_string(),
        category: Category::Client,
        key_bind: UNBOUND_KEY,
        enabled: true,
        description: "Client-wide configuration".to_string(),
        hidden: true,
        settings: vec![SettingNode::new(
            LANGUAGE_SETTING,
            SettingValue::Choose {
                value: config.language_override.clone(),
                choices,
            },
        )],
    })
}

/// Override the client language; must be one of the known languages.
pub fn set_language_override(
    registry: &ModuleRegistry,
    language: &str,
) -> Result<(), SettingsError> {
    registry.apply(
        CLIENT_MODULE,
        &[LANGUAGE_SETTING.to_string()],
        &Value::String(language.to_string()),
    )
}

/// Clear the language override.
pub fn unset_language_override(registry: &ModuleRegistry) -> Result<(), SettingsError> {
    registry.apply(
        CLIENT_MODULE,
        &[LANGUAGE_SETTING.to_string()],
        &Value::String(NO_OVERRIDE.to_string()),
    )
}

/// Current override, `None` when unset.
pub fn language_override(registry: &ModuleRegistry) -> Result<Option<String>, SettingsError> {
    let settings = registry.settings_snapshot(CLIENT_MODULE)?;
    match settings.iter().find(|n| n.name == LANGUAGE_SETTING) {
        Some(SettingNode {
            value: SettingValue::Choose { value, .. },
            ..
        }) if !value.is_empty() => Ok(Some(value.clone())),
        _ => Ok(None),
    }
}

/// Languages the override may be set to.
pub fn known_languages(registry: &ModuleRegistry) -> Result<Vec<String>, SettingsError> {
    let settings = registry.settings_snapshot(CLIENT_MODULE)?;
    match settings.iter().find(|n| n.name == LANGUAGE_SETTING) {
        Some(SettingNode {
            value: SettingValue::Choose { choices, .. },
            ..
        }) => Ok(choices
            .iter()
            .filter(|c| !c.is_empty())
            .cloned()
            .collect()),
        _ => Ok(Vec::new()),
    }
}
