//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 5s, 1m, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a raw `key=value` notification option cannot be read
#[derive(Debug, Clone, Error)]
pub enum OptionsError {
    #[error("Invalid option \"{0}\". Expected format: key=value")]
    MalformedPair(String),

    #[error("Unknown option key \"{key}\". Valid keys are: {valid}")]
    UnknownKey { key: String, valid: String },
}

/// Error from the identity override setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("No installed application has bundle identifier \"{0}\"")]
    NotInstalled(String),

    #[error("No application named \"{0}\" could be resolved to a bundle identifier")]
    UnknownApplication(String),

    /// The override is single-assignment for the process lifetime.
    #[error("Sender identity has already been set to \"{0}\"")]
    AlreadySet(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
