use serde::{Deserialize, Serialize};

/// Default application name announced to the audio server.
pub const DEFAULT_CLIENT_NAME: &str = "Mixer";

/// Audio server client settings.
///
/// Controls how the session identifies itself and where it connects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Application name shown by the server for this client.
    #[serde(default = "default_name")]
    pub name: String,

    /// Server address (e.g. `unix:/run/user/1000/pulse/native`).
    /// The library default is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

fn default_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            server: None,
        }
    }
}
