use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use super::{Config, ConfigPaths};
use crate::{PacontrolError, Result};

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined, or the
    /// file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::config_file()?;
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(PacontrolError::io_at(&e, path)),
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| PacontrolError::toml_parse(e, Some(path)))?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the string is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| PacontrolError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field values that the schema alone cannot express.
    ///
    /// # Errors
    /// Returns [`PacontrolError::InvalidConfigField`] for the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.client.name.trim().is_empty() {
            return Err(PacontrolError::invalid_field(
                "client.name",
                "must not be empty",
            ));
        }

        if let Some(server) = &self.client.server {
            if server.trim().is_empty() {
                return Err(PacontrolError::invalid_field(
                    "client.server",
                    "must not be empty when set; remove it to use the default server",
                ));
            }
        }

        Ok(())
    }
}
