//! Client Settings Module
//!
//! Exposes the client's runtime-configurable modules and their parameters to
//! the external presentation layer through a generic, introspectable settings
//! schema: a recursive tree of typed setting nodes that serializes losslessly
//! to the wire and accepts validated in-place mutations back from the UI.

// Public exports
pub mod contract;
pub use contract::{
    client::SettingsApi, error::SettingsError, Bounds, Category, ModuleDescriptor, ModuleInfo,
    SettingNode, SettingValue, UNBOUND_KEY,
};

pub mod domain;
pub use domain::ModuleRegistry;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
