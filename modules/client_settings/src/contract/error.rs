//! Contract error types for the client settings module
//!
//! Every failure here is local and recoverable: a failed mutation leaves the
//! settings tree exactly as it was before the call.

/// Domain errors for module and settings operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Edit path references a node that does not exist
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    /// Value shape disagrees with the node kind
    #[error("type mismatch on '{name}': expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// Value violates the node's declared bounds
    #[error("value {value} for '{name}' is out of range [{from}, {to}]")]
    OutOfRange {
        name: String,
        value: String,
        from: String,
        to: String,
    },

    /// Entry already present in a list setting
    #[error("duplicate entry '{entry}' in '{name}'")]
    DuplicateEntry { name: String, entry: String },

    /// Selection outside the declared choice set
    #[error("unknown choice '{choice}' for '{name}'")]
    UnknownChoice { name: String, choice: String },

    /// Serializer encountered an unknown valueType tag
    #[error("unsupported value type '{value_type}'")]
    UnsupportedKind { value_type: String },

    /// Module name already registered
    #[error("module already registered: {name}")]
    DuplicateModule { name: String },

    /// Module not present in the registry
    #[error("module not found: {name}")]
    NotFound { name: String },

    /// Unexpected failure that does not fit the taxonomy above
    #[error("internal error")]
    Internal,
}
