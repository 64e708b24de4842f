//! Command-line front-end for the mixer.
//!
//! Lists the control rows of every source and sink, and edits single channel
//! levels either by row or by device address.

mod commands;
pub mod formatting;
mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use commands::execute;
pub use types::{CliError, CommandResult};

use crate::services::DeviceClass;

/// Top-level arguments
#[derive(Parser, Debug)]
#[command(name = "pacontrol")]
#[command(about = "Per-channel volume control for audio sources and sinks")]
pub struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Audio server to connect to, overriding the configuration
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// What to do
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print one row per device channel
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Set the level of a row
    Set {
        /// Row number as shown by `list`
        row: usize,
        /// Raw level (65536) or percentage (100%)
        level: String,
    },
    /// Set one channel of a device
    SetDevice {
        /// Device class
        class: ClassArg,
        /// Server-assigned device index
        index: u32,
        /// Channel position within the device
        channel: usize,
        /// Raw level (65536) or percentage (100%)
        level: String,
    },
    /// Print changes to the rows as they happen
    Watch,
    /// Print the role names rows expose
    Roles,
}

impl Commands {
    /// Whether the command talks to the audio server
    pub fn needs_server(&self) -> bool {
        !matches!(self, Commands::Roles)
    }
}

/// Device class as typed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassArg {
    /// Capture device
    Source,
    /// Playback device
    Sink,
}

impl From<ClassArg> for DeviceClass {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::Source => DeviceClass::Source,
            ClassArg::Sink => DeviceClass::Sink,
        }
    }
}
