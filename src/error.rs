use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetconfError {
    #[error("Namespace is required: pass a non-empty name to Resolver::builder()")]
    NamespaceRequired,

    #[error("Failed to parse {path} (line {line}): {reason}")]
    ParseError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid value for '{key}' ({value:?}): {reason}")]
    MalformedValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid default for '{key}': {reason}")]
    InvalidDefault { key: String, reason: String },

    #[error("Empty list separator requested for '{key}'")]
    EmptySeparator { key: String },

    #[error("Cannot interpolate '{entry}' in section [{section}]: {reason}")]
    Interpolation {
        section: String,
        entry: String,
        reason: String,
    },

    #[error("Failed to parse default table: {0}")]
    DefaultsParse(#[from] toml::de::Error),

    #[error("Failed to convert default table: {0}")]
    DefaultsSerialize(#[from] toml::ser::Error),
}
