//! Native client implementation - wraps the domain registry for in-process calls
//!
//! Used by collaborators living in the same process (commands, the
//! persistence store) without HTTP overhead.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::wire::mapper;
use crate::contract::{Category, ModuleInfo, SettingNode, SettingsApi, SettingsError};
use crate::domain::{language, ModuleRegistry};

/// Native client that directly calls the module registry
#[derive(Clone)]
pub struct NativeClient {
    registry: Arc<ModuleRegistry>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl SettingsApi for NativeClient {
    async fn grouped_modules(
        &self,
        include_hidden: bool,
    ) -> Result<Vec<(Category, Vec<ModuleInfo>)>, SettingsError> {
        Ok(self.registry.list_by_category(include_hidden))
    }

    async fn module(&self, name: &str) -> Result<ModuleInfo, SettingsError> {
        self.registry.find(name)
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<(), SettingsError> {
        self.registry.set_enabled(name, enabled)
    }

    async fn set_key_bind(&self, name: &str, key: i32) -> Result<(), SettingsError> {
        self.registry.set_key_bind(name, key)
    }

    async fn module_settings(&self, name: &str) -> Result<Vec<SettingNode>, SettingsError> {
        self.registry.settings_snapshot(name)
    }

    async fn apply_setting(
        &self,
        module: &str,
        path: &[String],
        new_value: serde_json::Value,
    ) -> Result<(), SettingsError> {
        self.registry.apply(module, path, &new_value)
    }

    async fn snapshot(&self, name: &str) -> Result<serde_json::Value, SettingsError> {
        let info = self.registry.find(name)?;
        let settings = self.registry.settings_snapshot(name)?;
        serde_json::to_value(mapper::snapshot_dto(&info, &settings))
            .map_err(|_| SettingsError::Internal)
    }

    async fn restore(
        &self,
        name: &str,
        snapshot: serde_json::Value,
    ) -> Result<(), SettingsError> {
        let (enabled, key_bind, settings) = mapper::parse_snapshot(&snapshot)?;
        self.registry.restore(name, enabled, key_bind, settings)
    }

    async fn set_language_override(&self, lang: &str) -> Result<(), SettingsError> {
        language::set_language_override(&self.registry, lang)
    }

    async fn unset_language_override(&self) -> Result<(), SettingsError> {
        language::unset_language_override(&self.registry)
    }
}
