//! Unit tests for config module
//!
//! Tests configuration types, defaults, and parsing. All in-memory.

#![allow(clippy::unwrap_used)]

use crate::{
    PacontrolError,
    config::{Config, LogFormat},
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.client.name, "Mixer");
    assert_eq!(config.client.server, None);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(!config.logging.file);
}

#[test]
fn empty_toml_gives_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_deserialize_toml() {
    let config = Config::from_toml_str(
        r#"
        [client]
        name = "Panel"
        server = "unix:/tmp/pulse.sock"

        [logging]
        format = "json"
        file = true
    "#,
    )
    .unwrap();

    assert_eq!(config.client.name, "Panel");
    assert_eq!(config.client.server.as_deref(), Some("unix:/tmp/pulse.sock"));
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.logging.file);
}

#[test]
fn partial_sections_keep_defaults() {
    let config = Config::from_toml_str(
        r#"
        [logging]
        file = true
    "#,
    )
    .unwrap();

    assert_eq!(config.client.name, "Mixer");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn rejects_empty_client_name() {
    let err = Config::from_toml_str(
        r#"
        [client]
        name = "  "
    "#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PacontrolError::InvalidConfigField { ref field, .. } if field == "client.name"
    ));
}

#[test]
fn rejects_blank_server() {
    let err = Config::from_toml_str(
        r#"
        [client]
        server = ""
    "#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PacontrolError::InvalidConfigField { ref field, .. } if field == "client.server"
    ));
}

#[test]
fn rejects_unknown_log_format() {
    let err = Config::from_toml_str(
        r#"
        [logging]
        format = "xml"
    "#,
    )
    .unwrap_err();

    assert!(matches!(err, PacontrolError::TomlParseError { .. }));
}

#[test]
fn log_format_from_str() {
    assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!(" pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    assert!("compact".parse::<LogFormat>().is_err());
}

#[test]
fn serialize_roundtrip_omits_unset_server() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[client]"));
    assert!(!toml_str.contains("server"));
    assert_eq!(Config::from_toml_str(&toml_str).unwrap(), Config::default());
}
