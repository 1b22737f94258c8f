use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common error for configuring and running a porting pass
///
/// Every variant is fatal to the whole run; there are no per-file retries.
/// Malformed tag syntax in a template is not an error.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum PortError {
    #[error("ConfigError: {0}")]
    ConfigError(ConfigError),
    #[error("FileError: {0}")]
    FileError(FileError),
}

#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum ConfigError {
    #[error(
        "No rewrites requested. Enable at least one of --add-extension, --update-relations, --update-file-fields, or --rename-generic."
    )]
    NoRulesEnabled,
    #[error("None of the given paths resolve to a template file or directory")]
    NoTemplatesFound,
    #[error("Config is invalid: {message}")]
    InvalidConfig { message: String },
    #[error("force_update lists '{0}', which ignored_methods does not contain")]
    UnknownForceUpdate(String),
}

#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum FileError {
    #[error("Cannot read {path}: {message}")]
    Unreadable { path: String, message: String },
    #[error("Cannot write {path}: {message}")]
    Unwritable { path: String, message: String },
}

macro_rules! impl_from_error {
    ($($error:tt),+) => {$(
        impl From<$error> for PortError {
            fn from(e: $error) -> Self {
                PortError::$error(e)
            }
        }
    )+};
}

impl_from_error!(ConfigError, FileError);
