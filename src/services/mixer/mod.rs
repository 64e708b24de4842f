use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::debug;

/// Audio server session worker
mod backend;
/// Control rows and device identity
pub mod control;
/// Error types
pub mod error;
/// List model consumed by the UI layer
pub mod model;
/// Session progress published to observers
pub mod session;
/// Per-device volume cache
pub mod state;
/// Volume vector type
pub mod volume;

pub use control::{ControlRecord, DeviceClass, DeviceIndex, DeviceKey, DeviceSnapshot};
pub use error::MixerError;
pub use model::{
    ControlListModel, ItemFlags, ModelChange, Role, RoleValue, VolumeEdit, VolumeWriter,
};
pub use session::{ConnectionState, EnumerationStatus, SessionStatus};
pub use state::{ControlState, ControlStateCache};
pub use volume::{
    MAX_CHANNELS, VOLUME_MAX, VOLUME_MUTED, VOLUME_NORM, VolumeError, VolumeVector,
    level_to_percent, percent_to_level,
};

use backend::{CommandWriter, MixerCommand, SessionMessage, SessionSender};

use crate::config::ClientConfig;

/// Mixer control panel service
///
/// Owns one audio server session. Sources and sinks are enumerated once the
/// connection is ready and show up as rows of [`ControlListModel`]; volume
/// edits made through the model are written back to the server.
pub struct MixerService {
    session_tx: SessionSender,
    model: ControlListModel,
    status_rx: watch::Receiver<SessionStatus>,
    session_handle: Option<JoinHandle<()>>,
}

impl MixerService {
    /// Connect to the audio server and start enumerating devices
    ///
    /// Returns once the connection attempt is under way; use
    /// [`MixerService::wait_for_enumeration`] to wait for the rows.
    ///
    /// # Errors
    /// Returns error if the client can't be created, the connection can't be
    /// initiated, or the worker loop fails to start
    pub async fn new(client: &ClientConfig) -> Result<Self, MixerError> {
        let (session_tx, session_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SessionStatus::default());
        let status_tx = Arc::new(status_tx);

        let writer = CommandWriter::new(session_tx.clone(), Arc::clone(&status_tx));
        let model = ControlListModel::new(Arc::new(writer));

        let (session_handle, started_rx) = backend::spawn_session(
            client.clone(),
            model.clone(),
            status_tx,
            session_tx.clone(),
            session_rx,
        );

        started_rx.await.map_err(|_| MixerError::SessionClosed)??;

        Ok(Self {
            session_tx,
            model,
            status_rx,
            session_handle: Some(session_handle),
        })
    }

    /// The control rows
    pub fn model(&self) -> &ControlListModel {
        &self.model
    }

    /// Current session status
    pub fn status(&self) -> SessionStatus {
        *self.status_rx.borrow()
    }

    /// Receiver notified on every session status change
    pub fn status_updates(&self) -> watch::Receiver<SessionStatus> {
        self.status_rx.clone()
    }

    /// Wait until both sources and sinks have been listed
    ///
    /// # Errors
    /// Returns [`MixerError::EnumerationFailed`] if the server refused a list,
    /// or [`MixerError::SessionEnded`] if the session stops first
    pub async fn wait_for_enumeration(&self) -> Result<(), MixerError> {
        self.wait_for_outcome(SessionStatus::enumeration_outcome).await
    }

    /// Wait until the server has answered every submitted volume write
    ///
    /// # Errors
    /// Returns [`MixerError::SessionEnded`] if the session stops with writes
    /// still outstanding
    pub async fn wait_for_writes(&self) -> Result<(), MixerError> {
        self.wait_for_outcome(SessionStatus::writes_outcome).await
    }

    async fn wait_for_outcome(
        &self,
        outcome: fn(&SessionStatus) -> Option<Result<(), MixerError>>,
    ) -> Result<(), MixerError> {
        let mut status_rx = self.status_rx.clone();
        let status = *status_rx
            .wait_for(|status| outcome(status).is_some())
            .await
            .map_err(|_| MixerError::SessionClosed)?;
        outcome(&status).unwrap_or(Err(MixerError::SessionClosed))
    }

    /// Disconnect from the server and stop the worker
    ///
    /// # Errors
    /// Returns error if the worker task panicked
    pub async fn shutdown(mut self) -> Result<(), MixerError> {
        let _ = self
            .session_tx
            .send(SessionMessage::Command(MixerCommand::Shutdown));

        if let Some(handle) = self.session_handle.take() {
            handle.await.map_err(|_| MixerError::SessionClosed)?;
        }

        debug!("Mixer service shut down");
        Ok(())
    }
}

impl Drop for MixerService {
    fn drop(&mut self) {
        if self.session_handle.take().is_some() {
            let _ = self
                .session_tx
                .send(SessionMessage::Command(MixerCommand::Shutdown));
        }
    }
}
