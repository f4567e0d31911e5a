//! Native client trait for inter-module communication
//!
//! This trait defines the API that other collaborators (commands, the
//! persistence store, the UI bridge) use to interact with module settings.
//! NO HTTP - direct function calls for performance.

use async_trait::async_trait;

use super::error::SettingsError;
use super::model::{Category, ModuleInfo, SettingNode};

/// Module settings API for inter-module communication
#[async_trait]
pub trait SettingsApi: Send + Sync {
    // ===== Module Operations =====

    /// Modules grouped by category, in category enumeration order then module
    /// declaration order. Hidden modules are excluded unless requested.
    async fn grouped_modules(
        &self,
        include_hidden: bool,
    ) -> Result<Vec<(Category, Vec<ModuleInfo>)>, SettingsError>;

    /// Look up a single module by name; hidden modules are addressable here
    async fn module(&self, name: &str) -> Result<ModuleInfo, SettingsError>;

    /// Toggle a module on or off; does not alter its settings
    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<(), SettingsError>;

    /// Rebind a module's key
    async fn set_key_bind(&self, name: &str, key: i32) -> Result<(), SettingsError>;

    // ===== Setting Operations =====

    /// Copy of a module's current settings tree
    async fn module_settings(&self, name: &str) -> Result<Vec<SettingNode>, SettingsError>;

    /// Apply a validated edit to the setting addressed by `path`
    async fn apply_setting(
        &self,
        module: &str,
        path: &[String],
        new_value: serde_json::Value,
    ) -> Result<(), SettingsError>;

    // ===== Persistence Boundary =====

    /// Serialized snapshot of a module for the persistence collaborator
    async fn snapshot(&self, name: &str) -> Result<serde_json::Value, SettingsError>;

    /// Restore a module from a serialized snapshot
    async fn restore(&self, name: &str, snapshot: serde_json::Value)
        -> Result<(), SettingsError>;

    // ===== Language Override =====

    /// Override the client language; must be one of the known languages
    async fn set_language_override(&self, language: &str) -> Result<(), SettingsError>;

    /// Clear the language override
    async fn unset_language_override(&self) -> Result<(), SettingsError>;
}
