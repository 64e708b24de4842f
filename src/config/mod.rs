//! Configuration schema definitions and validation.
//!
//! Defines the configuration structure for pacontrol: how the audio client
//! identifies itself and which server it talks to, plus logging preferences.
//! All configurations are serializable to/from TOML format and every field
//! has a default, so a missing file is equivalent to an empty one.

mod client;
mod loading;
mod logging;
mod paths;

pub use client::ClientConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use paths::ConfigPaths;

use serde::{Deserialize, Serialize};

/// Main configuration structure for pacontrol.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Audio server client settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests;
