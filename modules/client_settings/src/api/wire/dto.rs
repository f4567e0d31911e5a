//! Wire DTOs exchanged with the presentation layer
//!
//! One tagged object per setting kind; field names (`valueType`, `name`,
//! `value`, `range`, `suffix`, `active`, `choices`) are the wire contract and
//! must not drift.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive integer bounds on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IntRangeDto {
    pub from: i64,
    pub to: i64,
}

/// Inclusive float bounds on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FloatRangeDto {
    pub from: f64,
    pub to: f64,
}

/// Serialized setting node, discriminated by `valueType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "valueType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettingDto {
    Boolean {
        name: String,
        value: bool,
    },
    Int {
        name: String,
        range: IntRangeDto,
        suffix: String,
        value: i64,
    },
    IntRange {
        name: String,
        range: IntRangeDto,
        suffix: String,
        value: IntRangeDto,
    },
    Float {
        name: String,
        range: FloatRangeDto,
        suffix: String,
        value: f64,
    },
    FloatRange {
        name: String,
        range: FloatRangeDto,
        suffix: String,
        value: FloatRangeDto,
    },
    Text {
        name: String,
        value: String,
    },
    Blocks {
        name: String,
        value: Vec<String>,
    },
    Key {
        name: String,
        value: i32,
    },
    Color {
        name: String,
        value: u32,
    },
    /// Dual representation: `choices` maps every choice to its serialized
    /// subtree while `value` repeats the active choice's settings for the
    /// detail panel. Preserved verbatim for wire compatibility.
    Choice {
        name: String,
        active: String,
        choices: IndexMap<String, SettingDto>,
        value: Vec<SettingDto>,
    },
    Choose {
        name: String,
        choices: Vec<String>,
        value: String,
    },
    Configurable {
        name: String,
        value: Vec<SettingDto>,
    },
    Togglable {
        name: String,
        value: Vec<SettingDto>,
    },
}

/// Module listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    pub name: String,
    pub category: String,
    pub key_bind: i32,
    pub enabled: bool,
    pub description: String,
    pub hidden: bool,
}

/// Modules grouped by category, preserving category enumeration order and
/// module declaration order
pub type GroupedModulesDto = IndexMap<String, Vec<ModuleDto>>;

/// External edit request; the module name travels in the request URL
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditRequestDto {
    /// Child names descending from the module's top-level settings
    pub path: Vec<String>,
    /// Wire value whose shape must match the addressed node's kind
    pub new_value: serde_json::Value,
}

/// Enable/disable request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetEnabledRequestDto {
    pub enabled: bool,
}

/// Key rebind request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BindRequestDto {
    pub key: i32,
}

/// Module snapshot for the persistence boundary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSnapshotDto {
    pub name: String,
    pub enabled: bool,
    pub key_bind: i32,
    pub settings: Vec<SettingDto>,
}

/// Language override request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LanguageRequestDto {
    pub language: String,
}

/// Language override state
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDto {
    /// Current override, empty when unset
    pub language: String,
    pub known_languages: Vec<String>,
}
