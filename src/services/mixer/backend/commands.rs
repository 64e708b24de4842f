use libpulse_binding::context::Context;

use super::{
    conversion::volume_to_pulse,
    types::{MixerCommand, SessionMessage, SessionSender, StatusSender},
};
use crate::services::mixer::{DeviceClass, DeviceKey, MixerError, VolumeVector, VolumeWriter};

/// Submit a device's full vector with the class-appropriate call
///
/// The server's answer comes back to the worker as
/// [`SessionMessage::WriteFinished`].
pub fn set_device_volume(
    context: &Context,
    key: DeviceKey,
    volume: &VolumeVector,
    session_tx: &SessionSender,
) {
    let pulse_volume = volume_to_pulse(volume);
    let mut introspect = context.introspect();

    let done_tx = session_tx.clone();
    let on_done: Box<dyn FnMut(bool)> = Box::new(move |success| {
        let _ = done_tx.send(SessionMessage::WriteFinished { key, success });
    });

    match key.class {
        DeviceClass::Source => {
            introspect.set_source_volume_by_index(key.index.0, &pulse_volume, Some(on_done));
        }
        DeviceClass::Sink => {
            introspect.set_sink_volume_by_index(key.index.0, &pulse_volume, Some(on_done));
        }
    }
}

/// [`VolumeWriter`] that queues writes for the session worker
pub struct CommandWriter {
    session_tx: SessionSender,
    status: StatusSender,
}

impl CommandWriter {
    /// Create a writer feeding the given worker queue
    pub fn new(session_tx: SessionSender, status: StatusSender) -> Self {
        Self { session_tx, status }
    }
}

impl VolumeWriter for CommandWriter {
    fn submit(&self, key: DeviceKey, volume: VolumeVector) -> Result<(), MixerError> {
        self.status.send_modify(|status| status.pending_writes += 1);

        let command = SessionMessage::Command(MixerCommand::SetVolume { key, volume });
        if self.session_tx.send(command).is_err() {
            self.status.send_modify(|status| {
                status.pending_writes = status.pending_writes.saturating_sub(1);
            });
            return Err(MixerError::SessionClosed);
        }
        Ok(())
    }
}
