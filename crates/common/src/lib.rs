//! Shared helpers used by every crate in the workspace: logging setup and
//! runtime environment checks.

pub mod env;
pub mod utils;

/// Log output flavour selected by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a config value; anything unrecognised falls back to compact output.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}
