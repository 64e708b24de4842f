//! Audio server session worker.
//!
//! The server loop itself runs on the client library's threaded mainloop.
//! A blocking worker owns the loop and the context, drains
//! [`SessionMessage`]s, and makes every context call with the loop locked.

mod commands;
mod conversion;
mod discovery;
mod events;
mod types;

use std::ops::ControlFlow;

use libpulse_binding::{
    context::{Context, FlagSet as ContextFlags},
    mainloop::threaded::Mainloop,
};
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug, error, info, warn};

pub use commands::CommandWriter;
pub use types::{MixerCommand, SessionMessage, SessionReceiver, SessionSender, StatusSender};

use super::{ConnectionState, ControlListModel, MixerError};
use crate::config::ClientConfig;

const MAINLOOP_NAME: &str = "pa_mainloop";

/// Start the session worker
///
/// The returned receiver resolves once the connection attempt is under way
/// (or failed to start). Progress afterwards is published through `status`.
pub fn spawn_session(
    client: ClientConfig,
    model: ControlListModel,
    status: StatusSender,
    session_tx: SessionSender,
    session_rx: SessionReceiver,
) -> (JoinHandle<()>, oneshot::Receiver<Result<(), MixerError>>) {
    let (started_tx, started_rx) = oneshot::channel();

    let handle = tokio::task::spawn_blocking(move || {
        let session = match Session::connect(&client, model, status.clone(), session_tx) {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Could not start audio server session");
                status.send_modify(|status| status.state = ConnectionState::Failed);
                let _ = started_tx.send(Err(e));
                return;
            }
        };

        let _ = started_tx.send(Ok(()));
        session.run(session_rx);
    });

    (handle, started_rx)
}

struct Session {
    // Dropped before the mainloop it was created on.
    context: Context,
    mainloop: Mainloop,
    model: ControlListModel,
    status: StatusSender,
    session_tx: SessionSender,
}

impl Session {
    fn connect(
        client: &ClientConfig,
        model: ControlListModel,
        status: StatusSender,
        session_tx: SessionSender,
    ) -> Result<Self, MixerError> {
        let mut mainloop = Mainloop::new()
            .ok_or_else(|| MixerError::ConnectionFailed("Failed to create mainloop".to_string()))?;
        mainloop.set_name(MAINLOOP_NAME);

        let mut context = Context::new(&mainloop, &client.name)
            .ok_or_else(|| MixerError::ConnectionFailed("Failed to create context".to_string()))?;

        let state_tx = session_tx.clone();
        context.set_state_callback(Some(Box::new(move || {
            let _ = state_tx.send(SessionMessage::StateChanged);
        })));

        context
            .connect(client.server.as_deref(), ContextFlags::NOFLAGS, None)
            .map_err(|e| MixerError::ConnectionFailed(format!("Connection failed: {e}")))?;

        mainloop.start().map_err(|e| {
            MixerError::ConnectionFailed(format!("Failed to start mainloop: {e}"))
        })?;

        info!(
            client = %client.name,
            server = client.server.as_deref().unwrap_or("default"),
            "Connecting to audio server"
        );

        Ok(Self {
            context,
            mainloop,
            model,
            status,
            session_tx,
        })
    }

    fn run(mut self, mut session_rx: SessionReceiver) {
        while let Some(message) = session_rx.blocking_recv() {
            self.mainloop.lock();
            let flow = self.handle_message(message);
            self.mainloop.unlock();

            if flow.is_break() {
                break;
            }
        }

        self.teardown();
    }

    fn handle_message(&mut self, message: SessionMessage) -> ControlFlow<()> {
        match message {
            SessionMessage::StateChanged => self.handle_state_change(),
            SessionMessage::EnumerationFailed(class) => {
                error!(%class, error = %self.context.errno(), "Device list request failed");
                ControlFlow::Break(())
            }
            SessionMessage::DeviceChanged(key) => {
                debug!(%key, "Device changed on server");
                discovery::refresh_device(&self.context, &self.model, key);
                ControlFlow::Continue(())
            }
            SessionMessage::WriteFinished { key, success } => {
                self.status.send_modify(|status| {
                    status.pending_writes = status.pending_writes.saturating_sub(1);
                });
                if success {
                    debug!(%key, "Volume applied");
                } else {
                    warn!(%key, error = %self.context.errno(), "Set volume failed");
                }
                ControlFlow::Continue(())
            }
            SessionMessage::Command(MixerCommand::SetVolume { key, volume }) => {
                commands::set_device_volume(&self.context, key, &volume, &self.session_tx);
                ControlFlow::Continue(())
            }
            SessionMessage::Command(MixerCommand::Shutdown) => {
                info!("Audio server session shutting down");
                ControlFlow::Break(())
            }
        }
    }

    fn handle_state_change(&mut self) -> ControlFlow<()> {
        let state = ConnectionState::from(self.context.get_state());
        let previous = self.status.borrow().state;
        if state == previous {
            return ControlFlow::Continue(());
        }
        self.status.send_modify(|status| status.state = state);

        match state {
            ConnectionState::Unconnected
            | ConnectionState::Connecting
            | ConnectionState::Authorizing
            | ConnectionState::SettingName => {
                debug!(%state, "Connection state changed");
                ControlFlow::Continue(())
            }
            ConnectionState::Ready => {
                info!("Connected to audio server");
                discovery::trigger_device_discovery(
                    &self.context,
                    &self.model,
                    &self.status,
                    &self.session_tx,
                );
                events::setup_device_subscription(&mut self.context, &self.session_tx);
                ControlFlow::Continue(())
            }
            ConnectionState::Terminated => {
                info!("Audio server connection terminated");
                ControlFlow::Break(())
            }
            ConnectionState::Failed => {
                error!(error = %self.context.errno(), "Audio server connection failed");
                ControlFlow::Break(())
            }
        }
    }

    fn teardown(mut self) {
        self.mainloop.lock();
        self.context.disconnect();
        self.mainloop.unlock();
        self.mainloop.stop();

        self.status.send_modify(|status| {
            if !status.state.is_terminal() {
                status.state = ConnectionState::Terminated;
            }
        });
        debug!("Audio server session stopped");
    }
}
