//! Formatting utilities for CLI output.
//!
//! Renders control rows as a table and parses volume levels typed by users.

use crate::services::mixer::{
    ControlRecord, Role, VOLUME_MAX, level_to_percent, percent_to_level,
};

use super::CliError;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a level as raw units plus percentage, e.g. `32768 (50%)`
pub fn format_level(level: u32) -> String {
    format!("{level} ({}%)", level_to_percent(level))
}

/// Renders rows as an aligned plain-text table, one line per channel.
pub fn format_rows(rows: &[ControlRecord]) -> String {
    let mut output = format_header(&format!(
        "{:<5} {:<7} {:<6} {:<3} {:<13} {:<16} {}",
        "ROW", "TYPE", "INDEX", "CH", "CHANNEL", "VOLUME", "DEVICE"
    ));
    output.push('\n');

    for (row, record) in rows.iter().enumerate() {
        output.push_str(&format!(
            "{:<5} {:<7} {:<6} {:<3} {:<13} {:<16} {}\n",
            row,
            record.device_class,
            record.device_index.to_string(),
            record.channel,
            record.channel_label,
            format_level(record.volume),
            record.description
        ));
    }

    output.trim_end().to_string()
}

/// Lists role names in registry order, marking editable ones.
pub fn format_roles() -> String {
    Role::ALL
        .into_iter()
        .map(|role| {
            if role.is_editable() {
                format!("{} (editable)", role.name())
            } else {
                format!("{} {}", role.name(), format_description("(read-only)"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a volume level.
///
/// Accepts raw server units (`65536`) or a percentage of the normal level
/// (`100%`).
///
/// # Errors
/// Returns [`CliError::InvalidArgument`] for anything else, or a level above
/// the server maximum.
pub fn parse_level(input: &str) -> Result<u32, CliError> {
    let invalid = |reason: String| CliError::InvalidArgument {
        arg: "level".to_string(),
        reason,
    };
    let input = input.trim();

    let level = match input.strip_suffix('%') {
        Some(percent) => {
            let percent = percent
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid(format!("'{input}' is not a whole percentage")))?;
            percent_to_level(percent)
        }
        None => input
            .parse::<u32>()
            .map_err(|_| invalid(format!("'{input}' is not a level or percentage")))?,
    };

    if level > VOLUME_MAX {
        return Err(invalid(format!("{level} exceeds the maximum {VOLUME_MAX}")));
    }
    Ok(level)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::mixer::{DeviceClass, DeviceIndex, VOLUME_NORM};

    #[test]
    fn parse_level_accepts_raw_units() {
        assert_eq!(parse_level("65536").unwrap(), VOLUME_NORM);
        assert_eq!(parse_level(" 0 ").unwrap(), 0);
    }

    #[test]
    fn parse_level_accepts_percent() {
        assert_eq!(parse_level("100%").unwrap(), VOLUME_NORM);
        assert_eq!(parse_level("0%").unwrap(), 0);
        assert_eq!(parse_level("50%").unwrap(), VOLUME_NORM / 2);
    }

    #[test]
    fn parse_level_rejects_garbage() {
        assert!(matches!(
            parse_level("loud"),
            Err(CliError::InvalidArgument { .. })
        ));
        assert!(parse_level("-5").is_err());
        assert!(parse_level("1.5%").is_err());
    }

    #[test]
    fn parse_level_rejects_above_max() {
        let too_high = (u64::from(VOLUME_MAX) + 1).to_string();
        assert!(parse_level(&too_high).is_err());
        assert_eq!(parse_level(&VOLUME_MAX.to_string()).unwrap(), VOLUME_MAX);
    }

    #[test]
    fn format_rows_has_one_line_per_record() {
        let rows = vec![
            ControlRecord {
                device_index: DeviceIndex(3),
                device_class: DeviceClass::Sink,
                channel: 0,
                description: "Speakers".to_string(),
                channel_label: "Front Left".to_string(),
                volume: VOLUME_NORM,
            },
            ControlRecord {
                device_index: DeviceIndex(3),
                device_class: DeviceClass::Sink,
                channel: 1,
                description: "Speakers".to_string(),
                channel_label: "Front Right".to_string(),
                volume: 0,
            },
        ];

        let output = format_rows(&rows);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Front Left"));
        assert!(lines[1].contains("65536 (100%)"));
        assert!(lines[2].contains("#3"));
        assert!(lines[2].contains("0 (0%)"));
    }

    #[test]
    fn format_roles_marks_volume_editable() {
        let output = format_roles();
        assert!(output.contains("volume (editable)"));
        assert_eq!(output.lines().count(), Role::ALL.len());
    }
}
