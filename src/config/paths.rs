use std::{
    env,
    ffi::OsString,
    fs,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "pacontrol";

/// Locations of the config file and log directory
pub struct ConfigPaths;

impl ConfigPaths {
    /// `$XDG_CONFIG_HOME/pacontrol/config.toml`, else
    /// `$HOME/.config/pacontrol/config.toml`
    ///
    /// # Errors
    /// Returns an error if neither variable is set
    pub fn config_file() -> Result<PathBuf, Error> {
        config_file_from(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))
    }

    /// `$HOME/.pacontrol/logs`, created if missing
    ///
    /// # Errors
    /// Returns error if HOME is unset or the directory cannot be created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = log_dir_from(env::var_os("HOME"))?;
        fs::create_dir_all(&log_dir)?;
        Ok(log_dir)
    }
}

// An empty XDG_CONFIG_HOME counts as unset.
fn config_file_from(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, Error> {
    let config_home = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home_or_err(home)?).join(".config"),
    };
    Ok(config_home.join(APP_DIR).join("config.toml"))
}

fn log_dir_from(home: Option<OsString>) -> Result<PathBuf, Error> {
    Ok(PathBuf::from(home_or_err(home)?)
        .join(format!(".{APP_DIR}"))
        .join("logs"))
}

fn home_or_err(home: Option<OsString>) -> Result<OsString, Error> {
    home.filter(|home| !home.is_empty())
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "HOME environment variable not found"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_file_prefers_xdg() {
        let path = config_file_from(Some("/xdg".into()), Some("/home/me".into())).unwrap();
        assert_eq!(path, PathBuf::from("/xdg/pacontrol/config.toml"));
    }

    #[test]
    fn config_file_falls_back_to_home() {
        let path = config_file_from(Some("".into()), Some("/home/me".into())).unwrap();
        assert_eq!(path, PathBuf::from("/home/me/.config/pacontrol/config.toml"));

        let path = config_file_from(None, Some("/home/me".into())).unwrap();
        assert_eq!(path, PathBuf::from("/home/me/.config/pacontrol/config.toml"));
    }

    #[test]
    fn config_file_needs_some_base() {
        let err = config_file_from(None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn log_dir_under_home() {
        let dir = log_dir_from(Some("/home/me".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/home/me/.pacontrol/logs"));
        assert!(log_dir_from(None).is_err());
    }
}
