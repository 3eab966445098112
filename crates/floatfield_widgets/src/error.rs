//! Widget error types

use std::path::PathBuf;

use floatfield_core::ColorParseError;
use thiserror::Error;

/// Errors raised while building a field's rule set
#[derive(Error, Debug)]
pub enum FieldError {
    /// A validation rule carries a pattern the regex engine rejects
    #[error("invalid validation pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while loading a style file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read style file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid color for `{key}`: {source}")]
    InvalidColor {
        key: &'static str,
        #[source]
        source: ColorParseError,
    },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
