//! Contract models for the client settings module
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models. The wire representation
//! lives in the api layer.

use indexmap::IndexMap;

/// Key code used when a module or key setting has nothing bound.
pub const UNBOUND_KEY: i32 = -1;

/// Module category, in the order the presentation layer lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Combat,
    Player,
    Movement,
    Render,
    World,
    Exploit,
    Fun,
    Misc,
    Client,
}

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Category; 9] = [
        Category::Combat,
        Category::Player,
        Category::Movement,
        Category::Render,
        Category::World,
        Category::Exploit,
        Category::Fun,
        Category::Misc,
        Category::Client,
    ];

    /// Display name, also used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Combat => "Combat",
            Category::Player => "Player",
            Category::Movement => "Movement",
            Category::Render => "Render",
            Category::World => "World",
            Category::Exploit => "Exploit",
            Category::Fun => "Fun",
            Category::Misc => "Misc",
            Category::Client => "Client",
        }
    }
}

/// A named, categorized, runtime-configurable unit owning an ordered set of
/// top-level setting nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDescriptor {
    /// Globally unique module name
    pub name: String,
    /// Presentation category
    pub category: Category,
    /// Bound key code, [`UNBOUND_KEY`] if unbound
    pub key_bind: i32,
    /// Whether the module is currently active
    pub enabled: bool,
    /// Human-readable description
    pub description: String,
    /// Excluded from default listings but still addressable by name
    pub hidden: bool,
    /// Top-level settings, in declaration order
    pub settings: Vec<SettingNode>,
}

/// Lightweight module view for listings; carries no settings tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub category: Category,
    pub key_bind: i32,
    pub enabled: bool,
    pub description: String,
    pub hidden: bool,
}

/// Inclusive bounds for numeric settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// Whether `value` lies within these bounds.
    pub fn contains(&self, value: T) -> bool {
        self.from <= value && value <= self.to
    }

    /// Whether `span` is ordered and lies entirely within these bounds.
    pub fn contains_span(&self, span: &Bounds<T>) -> bool {
        self.from <= span.from && span.from <= span.to && span.to <= self.to
    }
}

/// The recursive schema/value unit: a named, kinded value cell or composite.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingNode {
    /// Unique within the parent's sibling set
    pub name: String,
    /// Kinded value payload
    pub value: SettingValue,
}

impl SettingNode {
    pub fn new(name: impl Into<String>, value: SettingValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, SettingValue::Boolean(value))
    }

    pub fn int(name: impl Into<String>, value: i64, from: i64, to: i64, suffix: &str) -> Self {
        Self::new(
            name,
            SettingValue::Int {
                value,
                bounds: Bounds::new(from, to),
                suffix: suffix.to_string(),
            },
        )
    }

    pub fn float(name: impl Into<String>, value: f64, from: f64, to: f64, suffix: &str) -> Self {
        Self::new(
            name,
            SettingValue::Float {
                value,
                bounds: Bounds::new(from, to),
                suffix: suffix.to_string(),
            },
        )
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, SettingValue::Text(value.into()))
    }
}

/// Kinded value payload of a setting node.
///
/// This is a closed set: serialization and validation match exhaustively over
/// it, so adding a kind is a compile-checked, single-point change.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Boolean(bool),
    Int {
        value: i64,
        bounds: Bounds<i64>,
        suffix: String,
    },
    IntRange {
        value: Bounds<i64>,
        bounds: Bounds<i64>,
        suffix: String,
    },
    Float {
        value: f64,
        bounds: Bounds<f64>,
        suffix: String,
    },
    FloatRange {
        value: Bounds<f64>,
        bounds: Bounds<f64>,
        suffix: String,
    },
    Text(String),
    /// Ordered string list; entries unique within the list
    Blocks(Vec<String>),
    /// Key code, [`UNBOUND_KEY`] if unbound
    Key(i32),
    /// Packed ARGB color
    Color(u32),
    /// Single-active selector; every choice carries its own nested settings
    Choice {
        active: String,
        choices: IndexMap<String, Vec<SettingNode>>,
    },
    /// Single pick from a fixed string list
    Choose {
        value: String,
        choices: Vec<String>,
    },
    /// Generic named group of nested settings
    Configurable(Vec<SettingNode>),
    /// A configurable with an implicit enabled flag
    Togglable {
        enabled: bool,
        children: Vec<SettingNode>,
    },
}

impl SettingValue {
    /// Wire discriminator for this kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "BOOLEAN",
            SettingValue::Int { .. } => "INT",
            SettingValue::IntRange { .. } => "INT_RANGE",
            SettingValue::Float { .. } => "FLOAT",
            SettingValue::FloatRange { .. } => "FLOAT_RANGE",
            SettingValue::Text(_) => "TEXT",
            SettingValue::Blocks(_) => "BLOCKS",
            SettingValue::Key(_) => "KEY",
            SettingValue::Color(_) => "COLOR",
            SettingValue::Choice { .. } => "CHOICE",
            SettingValue::Choose { .. } => "CHOOSE",
            SettingValue::Configurable(_) => "CONFIGURABLE",
            SettingValue::Togglable { .. } => "TOGGLABLE",
        }
    }
}
