use thiserror::Error;

use crate::services::MixerError;

/// Errors that can occur during CLI command execution.
///
/// Each variant carries enough context to tell the user what went wrong
/// without a backtrace.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments were provided to a command.
    ///
    /// Returned when a value parses at the shell level but is not
    /// meaningful, such as a malformed volume level.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Argument name
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// The audio service failed.
    #[error("Audio error: {0}")]
    Mixer(#[from] MixerError),

    /// Terminal or signal handling failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success.
pub type CommandResult = Result<String, CliError>;
