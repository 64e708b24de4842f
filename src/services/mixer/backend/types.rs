use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::services::mixer::{DeviceClass, DeviceKey, SessionStatus, VolumeVector};

/// Requests from the service handle to the session worker
#[derive(Debug)]
pub enum MixerCommand {
    /// Submit a device's full volume vector
    SetVolume {
        /// Target device
        key: DeviceKey,
        /// Complete channel vector
        volume: VolumeVector,
    },
    /// Disconnect and stop the worker
    Shutdown,
}

/// Everything the session worker reacts to
///
/// Library callbacks run on the server loop's thread and only post these;
/// the worker does all context calls itself.
#[derive(Debug)]
pub enum SessionMessage {
    /// External request
    Command(MixerCommand),
    /// The context's connection state moved
    StateChanged,
    /// A device list request ended with an error
    EnumerationFailed(DeviceClass),
    /// The server reported a new or changed device
    DeviceChanged(DeviceKey),
    /// The server answered a volume write
    WriteFinished {
        /// Device written
        key: DeviceKey,
        /// Server reported success
        success: bool,
    },
}

/// Sending half of the worker's queue
pub type SessionSender = mpsc::UnboundedSender<SessionMessage>;
/// Receiving half of the worker's queue
pub type SessionReceiver = mpsc::UnboundedReceiver<SessionMessage>;
/// Publisher of [`SessionStatus`] snapshots
pub type StatusSender = Arc<watch::Sender<SessionStatus>>;
