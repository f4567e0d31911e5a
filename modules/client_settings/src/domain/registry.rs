//! Module registry - process-wide catalog of module descriptors
//!
//! The registry exclusively owns every descriptor and its settings tree for
//! the process lifetime. Each module's mutable state sits behind its own
//! reader/writer lock: a tick-thread read never observes a half-applied
//! mutation, and serializing one module proceeds concurrently with mutations
//! to others.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::contract::{Category, ModuleDescriptor, ModuleInfo, SettingNode, SettingsError};

use super::events::{EventPublisher, NoOpEventPublisher, SettingEvent};
use super::{mutation, validation};

/// Mutable per-module state, guarded as one unit.
struct ModuleState {
    enabled: bool,
    key_bind: i32,
    settings: Vec<SettingNode>,
}

struct ModuleEntry {
    name: String,
    category: Category,
    description: String,
    hidden: bool,
    state: RwLock<ModuleState>,
    dirty: AtomicBool,
}

impl ModuleEntry {
    fn info(&self) -> ModuleInfo {
        let state = self.state.read();
        ModuleInfo {
            name: self.name.clone(),
            category: self.category,
            key_bind: state.key_bind,
            enabled: state.enabled,
            description: self.description.clone(),
            hidden: self.hidden,
        }
    }
}

/// Process-wide module catalog. One owned instance is passed by `Arc` into
/// every collaborator; registration happens at startup, lookups and mutations
/// for the rest of the process lifetime.
pub struct ModuleRegistry {
    modules: RwLock<IndexMap<String, Arc<ModuleEntry>>>,
    events: Arc<dyn EventPublisher>,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NoOpEventPublisher))
    }
}

impl ModuleRegistry {
    /// Create a registry publishing to the given event sink
    pub fn new(events: Arc<dyn EventPublisher>) -> Self {
        Self {
            modules: RwLock::new(IndexMap::new()),
            events,
        }
    }

    // ===== Module Operations =====

    /// Register a module descriptor. The name must be unique and the settings
    /// tree must satisfy every declared invariant.
    pub fn register(&self, descriptor: ModuleDescriptor) -> Result<(), SettingsError> {
        validation::validate_tree(&descriptor.settings)?;

        let mut modules = self.modules.write();
        if modules.contains_key(&descriptor.name) {
            return Err(SettingsError::DuplicateModule {
                name: descriptor.name,
            });
        }

        tracing::info!(
            module = %descriptor.name,
            category = descriptor.category.name(),
            "module registered"
        );
        let entry = Arc::new(ModuleEntry {
            name: descriptor.name.clone(),
            category: descriptor.category,
            description: descriptor.description,
            hidden: descriptor.hidden,
            state: RwLock::new(ModuleState {
                enabled: descriptor.enabled,
                key_bind: descriptor.key_bind,
                settings: descriptor.settings,
            }),
            dirty: AtomicBool::new(false),
        });
        modules.insert(descriptor.name, entry);
        Ok(())
    }

    /// Look up a module by name. Hidden modules are addressable here.
    pub fn find(&self, name: &str) -> Result<ModuleInfo, SettingsError> {
        Ok(self.entry(name)?.info())
    }

    /// Modules grouped by category, in category enumeration order then module
    /// declaration order. Hidden modules are excluded unless requested; empty
    /// categories are omitted.
    pub fn list_by_category(&self, include_hidden: bool) -> Vec<(Category, Vec<ModuleInfo>)> {
        let modules = self.modules.read();
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let group: Vec<ModuleInfo> = modules
                    .values()
                    .filter(|e| e.category == category && (include_hidden || !e.hidden))
                    .map(|e| e.info())
                    .collect();
                if group.is_empty() {
                    None
                } else {
                    Some((category, group))
                }
            })
            .collect()
    }

    /// Enable or disable a module. A pure state flag; settings are untouched.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<(), SettingsError> {
        let entry = self.entry(name)?;
        entry.state.write().enabled = enabled;
        entry.dirty.store(true, Ordering::Release);
        self.publish(SettingEvent::toggled(name, enabled));
        Ok(())
    }

    /// Rebind a module's key.
    pub fn set_key_bind(&self, name: &str, key: i32) -> Result<(), SettingsError> {
        let entry = self.entry(name)?;
        entry.state.write().key_bind = key;
        entry.dirty.store(true, Ordering::Release);
        self.publish(SettingEvent::bound(name, key));
        Ok(())
    }

    // ===== Setting Operations =====

    /// Apply a validated edit to the setting addressed by `path`. The write
    /// lock is held for the whole operation, so readers observe either the
    /// previous or the new state, never a torn one.
    pub fn apply(
        &self,
        module: &str,
        path: &[String],
        new_value: &Value,
    ) -> Result<(), SettingsError> {
        let entry = self.entry(module)?;
        {
            let mut state = entry.state.write();
            mutation::apply_to_nodes(&mut state.settings, path, new_value)?;
        }
        entry.dirty.store(true, Ordering::Release);
        tracing::debug!(module, path = path.join("/"), "setting applied");
        self.publish(SettingEvent::changed(module, path));
        Ok(())
    }

    /// Copy of a module's current settings tree.
    pub fn settings_snapshot(&self, name: &str) -> Result<Vec<SettingNode>, SettingsError> {
        Ok(self.entry(name)?.state.read().settings.clone())
    }

    // ===== Persistence Boundary =====

    /// Restore a module's state from deserialized snapshot data, atomically
    /// per module. Values came from the store, so the module is not re-marked
    /// dirty and no events fire.
    pub fn restore(
        &self,
        name: &str,
        enabled: Option<bool>,
        key_bind: Option<i32>,
        settings: Vec<SettingNode>,
    ) -> Result<(), SettingsError> {
        let entry = self.entry(name)?;
        let mut state = entry.state.write();
        if let Some(enabled) = enabled {
            state.enabled = enabled;
        }
        if let Some(key) = key_bind {
            state.key_bind = key;
        }
        mutation::merge_nodes(&mut state.settings, &settings);
        Ok(())
    }

    /// Names of modules mutated since the last drain, clearing their flags.
    /// The persistence collaborator calls this out-of-band.
    pub fn take_dirty(&self) -> Vec<String> {
        self.modules
            .read()
            .values()
            .filter(|e| e.dirty.swap(false, Ordering::AcqRel))
            .map(|e| e.name.clone())
            .collect()
    }

    // ===== Helper Methods =====

    fn entry(&self, name: &str) -> Result<Arc<ModuleEntry>, SettingsError> {
        self.modules
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SettingsError::NotFound {
                name: name.to_string(),
            })
    }

    fn publish(&self, event: SettingEvent) {
        if let Err(error) = self.events.publish(event) {
            tracing::warn!(%error, "failed to publish settings event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::UNBOUND_KEY;

    fn descriptor(name: &str, category: Category) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            category,
            key_bind: UNBOUND_KEY,
            enabled: false,
            description: String::new(),
            hidden: false,
            settings: vec![SettingNode::boolean("Toggle", false)],
        }
    }

    #[test]
    fn dirty_flag_drained_once() {
        let registry = ModuleRegistry::default();
        registry.register(descriptor("Sprint", Category::Movement)).unwrap();
        registry
            .apply(
                "Sprint",
                &["Toggle".to_string()],
                &serde_json::Value::Bool(true),
            )
            .unwrap();

        assert_eq!(registry.take_dirty(), vec!["Sprint".to_string()]);
        assert!(registry.take_dirty().is_empty());
    }

    #[test]
    fn invalid_tree_rejected_at_registration() {
        let registry = ModuleRegistry::default();
        let mut descriptor = descriptor("Scaffold", Category::World);
        descriptor.settings = vec![SettingNode::int("Delay", 99, 0, 10, "ms")];
        assert!(matches!(
            registry.register(descriptor),
            Err(SettingsError::OutOfRange { .. })
        ));
        assert!(registry.find("Scaffold").is_err());
    }
}
