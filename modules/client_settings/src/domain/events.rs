//! Domain events for the client settings module
//!
//! Mutations never block on storage: successful writes hand an event to the
//! publisher and the persistence collaborator drains them out-of-band.
//! Publishing failures are logged, never propagated into mutation results.

use serde::{Deserialize, Serialize};

/// Domain event types for module settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SettingEvent {
    /// A setting value changed through the mutation applier
    SettingChanged(SettingChangedEvent),
    /// A module was enabled or disabled
    ModuleToggled(ModuleToggledEvent),
    /// A module's key bind changed
    KeyBindChanged(KeyBindChangedEvent),
}

/// Event data for a setting change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingChangedEvent {
    /// Owning module name
    pub module: String,
    /// Path of the edited setting
    pub path: Vec<String>,
}

/// Event data for a module toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleToggledEvent {
    /// Module name
    pub module: String,
    /// New enabled state
    pub enabled: bool,
}

/// Event data for a key bind change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindChangedEvent {
    /// Module name
    pub module: String,
    /// New key code
    pub key: i32,
}

impl SettingEvent {
    /// Create a new SettingChanged event
    pub fn changed(module: impl Into<String>, path: &[String]) -> Self {
        SettingEvent::SettingChanged(SettingChangedEvent {
            module: module.into(),
            path: path.to_vec(),
        })
    }

    /// Create a new ModuleToggled event
    pub fn toggled(module: impl Into<String>, enabled: bool) -> Self {
        SettingEvent::ModuleToggled(ModuleToggledEvent {
            module: module.into(),
            enabled,
        })
    }

    /// Create a new KeyBindChanged event
    pub fn bound(module: impl Into<String>, key: i32) -> Self {
        SettingEvent::KeyBindChanged(KeyBindChangedEvent {
            module: module.into(),
            key,
        })
    }
}

/// Event publisher trait for the persistence/notification boundary
pub trait EventPublisher: Send + Sync {
    /// Publish a domain event
    fn publish(&self, event: SettingEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

impl EventPublisher for NoOpEventPublisher {
    fn publish(&self, _event: SettingEvent) -> anyhow::Result<()> {
        // No-op: events are not published
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_event_carries_path() {
        let path = vec!["Mode".to_string(), "active".to_string()];
        let event = SettingEvent::changed("Speed", &path);
        match event {
            SettingEvent::SettingChanged(e) => {
                assert_eq!(e.module, "Speed");
                assert_eq!(e.path, path);
            }
            _ => panic!("expected SettingChanged event"),
        }
    }

    #[test]
    fn noop_publisher_accepts_events() {
        let publisher = NoOpEventPublisher;
        let result = publisher.publish(SettingEvent::toggled("Sprint", true));
        assert!(result.is_ok());
    }
}
