//! pacontrol - per-channel volume control for audio sources and sinks.
//!
//! Connects to a PulseAudio-compatible server, lists every source and sink,
//! and exposes one row per device channel through
//! [`services::ControlListModel`]. Editing a row's volume writes the device's
//! full channel vector back to the server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pacontrol::{config::Config, services::MixerService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let service = MixerService::new(&config.client).await?;
//! service.wait_for_enumeration().await?;
//!
//! for record in service.model().rows() {
//!     println!("{} {}: {}", record.description, record.channel_label, record.volume);
//! }
//! service.shutdown().await?;
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line front-end.
pub mod cli;

/// Audio server services.
pub mod services;

/// Logging setup.
pub mod tracing_config;

pub use core::{PacontrolError, Result};
