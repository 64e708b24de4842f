use super::{ConnectionState, DeviceClass, DeviceKey, Role, VolumeError};

/// Errors that can occur during mixer operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MixerError {
    /// Could not create the client, connect, or start the worker loop
    #[error("Audio server connection failed: {0}")]
    ConnectionFailed(String),

    /// The session stopped before the awaited condition was reached
    #[error("Audio server session ended ({0})")]
    SessionEnded(ConnectionState),

    /// The server refused to list a device class
    #[error("Listing {0}s failed")]
    EnumerationFailed(DeviceClass),

    /// The session worker is gone and can't accept commands
    #[error("Audio server session is closed")]
    SessionClosed,

    /// Row index outside the model
    #[error("Row {row} out of range (model has {rows} rows)")]
    RowOutOfRange {
        /// Requested row
        row: usize,
        /// Current row count
        rows: usize,
    },

    /// Edit addressed to a device that was never enumerated
    #[error("No cached volume for {0}")]
    DeviceNotCached(DeviceKey),

    /// Edit of a role that is not editable
    #[error("Role '{}' is read-only", .0.name())]
    ReadOnlyRole(Role),

    /// Value of the wrong kind for the role
    #[error("Invalid value for role '{}'", .0.name())]
    InvalidRoleValue(Role),

    /// Volume validation failed
    #[error("Volume operation failed: {0}")]
    Volume(#[from] VolumeError),

    /// Shared state lock was poisoned by a panicking thread
    #[error("Mixer state lock poisoned")]
    LockPoisoned,
}
