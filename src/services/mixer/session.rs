use std::fmt;

use super::{DeviceClass, MixerError};

/// Connection lifecycle of the audio server session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not connected yet
    #[default]
    Unconnected,
    /// Opening the transport
    Connecting,
    /// Authenticating with the server
    Authorizing,
    /// Announcing the client name
    SettingName,
    /// Connected and usable
    Ready,
    /// Connection failed or was lost
    Failed,
    /// Connection was closed cleanly
    Terminated,
}

impl ConnectionState {
    /// Whether the session can no longer make progress
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Failed | ConnectionState::Terminated)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Unconnected => "unconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Authorizing => "authorizing",
            ConnectionState::SettingName => "setting name",
            ConnectionState::Ready => "ready",
            ConnectionState::Failed => "failed",
            ConnectionState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Progress of one device class's enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumerationStatus {
    /// Not requested or still streaming
    #[default]
    Pending,
    /// End of list reached
    Complete,
    /// The server reported an error
    Failed,
}

/// Snapshot of the session published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStatus {
    /// Connection state
    pub state: ConnectionState,
    /// Source enumeration progress
    pub sources: EnumerationStatus,
    /// Sink enumeration progress
    pub sinks: EnumerationStatus,
    /// Volume writes still waiting for the server's reply
    pub pending_writes: usize,
}

impl SessionStatus {
    /// Enumeration progress for one class
    pub fn enumeration(&self, class: DeviceClass) -> EnumerationStatus {
        match class {
            DeviceClass::Source => self.sources,
            DeviceClass::Sink => self.sinks,
        }
    }

    /// Mutable enumeration progress for one class
    pub fn enumeration_mut(&mut self, class: DeviceClass) -> &mut EnumerationStatus {
        match class {
            DeviceClass::Source => &mut self.sources,
            DeviceClass::Sink => &mut self.sinks,
        }
    }

    /// Both classes reached the end of their lists
    pub fn is_enumerated(&self) -> bool {
        self.sources == EnumerationStatus::Complete && self.sinks == EnumerationStatus::Complete
    }

    /// Either class failed to enumerate
    pub fn enumeration_failed(&self) -> bool {
        self.sources == EnumerationStatus::Failed || self.sinks == EnumerationStatus::Failed
    }

    /// How enumeration ended, or `None` while it is still running
    ///
    /// A failed list wins over a terminal connection state, so the caller
    /// learns which class the server refused.
    pub fn enumeration_outcome(&self) -> Option<Result<(), MixerError>> {
        if self.is_enumerated() {
            Some(Ok(()))
        } else if self.sources == EnumerationStatus::Failed {
            Some(Err(MixerError::EnumerationFailed(DeviceClass::Source)))
        } else if self.sinks == EnumerationStatus::Failed {
            Some(Err(MixerError::EnumerationFailed(DeviceClass::Sink)))
        } else if self.state.is_terminal() {
            Some(Err(MixerError::SessionEnded(self.state)))
        } else {
            None
        }
    }

    /// Whether every submitted write was answered, or `None` while some are
    /// outstanding on a live session
    pub fn writes_outcome(&self) -> Option<Result<(), MixerError>> {
        if self.pending_writes == 0 {
            Some(Ok(()))
        } else if self.state.is_terminal() {
            Some(Err(MixerError::SessionEnded(self.state)))
        } else {
            None
        }
    }
}
