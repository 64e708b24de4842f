//! List model exposing one row per device channel.
//!
//! Mirrors the protocol a declarative UI binds to: row count, read a field by
//! role, write a field by role, change notifications and a role-name
//! registry. Only the volume role is writable; a volume edit updates the row
//! and the cached device vector together and then writes the whole vector
//! through to the audio server.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::{
    ControlRecord, ControlStateCache, DeviceKey, DeviceSnapshot, MixerError, VOLUME_MAX,
    VolumeError, VolumeVector,
};

const CHANGES_BUFFER_SIZE: usize = 256;

/// Named fields of a control row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Device index (`cindex`)
    DeviceIndex,
    /// Device description (`desc`)
    Description,
    /// Device class as a number, source 0 and sink 1 (`type`)
    Class,
    /// Channel slot (`channel`)
    Channel,
    /// Channel position label (`cdesc`)
    ChannelLabel,
    /// Volume level (`volume`)
    Volume,
}

impl Role {
    /// Every role, in registry order
    pub const ALL: [Role; 6] = [
        Role::DeviceIndex,
        Role::Description,
        Role::Class,
        Role::Channel,
        Role::ChannelLabel,
        Role::Volume,
    ];

    /// Name the UI binds to
    pub fn name(self) -> &'static str {
        match self {
            Role::DeviceIndex => "cindex",
            Role::Description => "desc",
            Role::Class => "type",
            Role::Channel => "channel",
            Role::ChannelLabel => "cdesc",
            Role::Volume => "volume",
        }
    }

    /// Reverse lookup of [`Role::name`]
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.name() == name)
    }

    /// Whether `set_data` accepts this role
    pub fn is_editable(self) -> bool {
        matches!(self, Role::Volume)
    }
}

/// Value of one field of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RoleValue {
    /// Numeric field
    UInt(u32),
    /// Text field
    Text(String),
}

/// Per-row capabilities reported to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    /// Row can be interacted with
    pub enabled: bool,
    /// Row accepts edits
    pub editable: bool,
}

/// Notification sent to views after the model changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    /// Rows `first..=last` were appended
    RowsInserted {
        /// First new row
        first: usize,
        /// Last new row
        last: usize,
    },
    /// Fields of one row changed
    DataChanged {
        /// Changed row
        row: usize,
    },
}

/// Outcome of an accepted volume edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeEdit {
    /// The new level equals the current one; nothing was submitted
    Unchanged,
    /// Row and cache updated, vector submitted to the server
    Applied,
}

/// Receives full device vectors to push to the audio server
pub trait VolumeWriter: Send + Sync {
    /// Queue a write of `volume` to the device identified by `key`
    ///
    /// # Errors
    /// Returns error if the write cannot be handed to the server session
    fn submit(&self, key: DeviceKey, volume: VolumeVector) -> Result<(), MixerError>;
}

#[derive(Debug, Default)]
struct MixerState {
    rows: Vec<ControlRecord>,
    cache: ControlStateCache,
}

/// Shared, cloneable handle to the control rows and their volume cache
///
/// Clones observe the same rows; enumeration callbacks and the UI hold
/// clones of the same model. Once a panicking thread has poisoned the state
/// lock, reads see an empty model (with a warning) and writes fail with
/// [`MixerError::LockPoisoned`].
#[derive(Clone)]
pub struct ControlListModel {
    state: Arc<RwLock<MixerState>>,
    changes_tx: broadcast::Sender<ModelChange>,
    writer: Arc<dyn VolumeWriter>,
}

impl ControlListModel {
    /// Create an empty model writing edits through `writer`
    pub fn new(writer: Arc<dyn VolumeWriter>) -> Self {
        let (changes_tx, _) = broadcast::channel(CHANGES_BUFFER_SIZE);
        Self {
            state: Arc::new(RwLock::new(MixerState::default())),
            changes_tx,
            writer,
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.read_state().map_or(0, |state| state.rows.len())
    }

    /// Copy of one row
    pub fn row(&self, row: usize) -> Option<ControlRecord> {
        self.read_state()?.rows.get(row).cloned()
    }

    /// Copy of every row, in model order
    pub fn rows(&self) -> Vec<ControlRecord> {
        self.read_state()
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }

    /// Cached full vector of a device
    pub fn cached_volume(&self, key: DeviceKey) -> Option<VolumeVector> {
        self.read_state()?.cache.get(key).cloned()
    }

    /// Read one field of a row
    pub fn data(&self, row: usize, role: Role) -> Option<RoleValue> {
        let record = self.row(row)?;
        let value = match role {
            Role::DeviceIndex => RoleValue::UInt(record.device_index.0),
            Role::Description => RoleValue::Text(record.description),
            Role::Class => RoleValue::UInt(record.device_class.as_u32()),
            Role::Channel => RoleValue::UInt(record.channel as u32),
            Role::ChannelLabel => RoleValue::Text(record.channel_label),
            Role::Volume => RoleValue::UInt(record.volume),
        };
        Some(value)
    }

    /// Write one field of a row
    ///
    /// # Errors
    /// Returns [`MixerError::ReadOnlyRole`] for anything but the volume role,
    /// [`MixerError::InvalidRoleValue`] for a non-numeric volume, and the
    /// errors of [`ControlListModel::set_volume`]
    pub fn set_data(
        &self,
        row: usize,
        role: Role,
        value: RoleValue,
    ) -> Result<VolumeEdit, MixerError> {
        match (role, value) {
            (Role::Volume, RoleValue::UInt(level)) => self.set_volume(row, level),
            (Role::Volume, RoleValue::Text(_)) => Err(MixerError::InvalidRoleValue(role)),
            (role, _) => Err(MixerError::ReadOnlyRole(role)),
        }
    }

    /// Capabilities of a row
    pub fn flags(&self, row: usize) -> ItemFlags {
        if row < self.row_count() {
            ItemFlags {
                enabled: true,
                editable: true,
            }
        } else {
            ItemFlags {
                enabled: true,
                editable: false,
            }
        }
    }

    /// Role registry, in registry order
    pub fn role_names(&self) -> Vec<(Role, &'static str)> {
        Role::ALL.into_iter().map(|role| (role, role.name())).collect()
    }

    /// Set one channel's level and write the device's full vector through
    ///
    /// The row shows the new level immediately, independent of the server's
    /// answer. If the write can't be queued the edit stays in place and the
    /// error is returned.
    ///
    /// # Errors
    /// Returns error if the row doesn't exist, the level exceeds
    /// [`VOLUME_MAX`], the device has no cached vector, or the write can't be
    /// queued
    pub fn set_volume(&self, row: usize, level: u32) -> Result<VolumeEdit, MixerError> {
        let (key, volume) = {
            let mut state = self.state.write().map_err(|_| MixerError::LockPoisoned)?;
            let rows = state.rows.len();
            let (key, channel, current) = state
                .rows
                .get(row)
                .map(|record| (record.key(), record.channel, record.volume))
                .ok_or(MixerError::RowOutOfRange { row, rows })?;

            if level > VOLUME_MAX {
                return Err(VolumeError::InvalidVolume { channel, level }.into());
            }
            if current == level {
                return Ok(VolumeEdit::Unchanged);
            }

            let volume = state
                .cache
                .set_channel(key, channel, level)?
                .ok_or(MixerError::DeviceNotCached(key))?;
            state.rows[row].volume = level;
            (key, volume)
        };

        debug!(%key, row, level, "Volume edited");
        self.notify(ModelChange::DataChanged { row });

        if let Err(e) = self.writer.submit(key, volume) {
            warn!(%key, error = %e, "Could not submit volume");
            return Err(e);
        }
        Ok(VolumeEdit::Applied)
    }

    /// Set one channel's level addressed by device and channel
    ///
    /// # Errors
    /// Returns [`MixerError::DeviceNotCached`] for an unknown device,
    /// [`VolumeError::InvalidChannel`] for a channel the device lacks, and
    /// the errors of [`ControlListModel::set_volume`]
    pub fn set_device_volume(
        &self,
        key: DeviceKey,
        channel: usize,
        level: u32,
    ) -> Result<VolumeEdit, MixerError> {
        let row = {
            let state = self.state.read().map_err(|_| MixerError::LockPoisoned)?;
            let channels = state
                .cache
                .get(key)
                .map(VolumeVector::channels)
                .ok_or(MixerError::DeviceNotCached(key))?;
            state
                .rows
                .iter()
                .position(|record| record.key() == key && record.channel == channel)
                .ok_or(VolumeError::InvalidChannel { channel, channels })?
        };
        self.set_volume(row, level)
    }

    /// Record an enumerated device: cache its vector and expose its channels
    ///
    /// A device seen for the first time appends one row per channel. A
    /// device seen again has its existing rows refreshed in place.
    ///
    /// # Errors
    /// Returns error if the state lock is poisoned
    pub fn apply_snapshot(&self, snapshot: &DeviceSnapshot) -> Result<(), MixerError> {
        let mut changes = Vec::new();
        {
            let mut state = self.state.write().map_err(|_| MixerError::LockPoisoned)?;
            state.cache.upsert(snapshot.key, snapshot.volume.clone());

            let first_new = state.rows.len();
            for record in snapshot.records() {
                let existing = state
                    .rows
                    .iter()
                    .position(|r| r.key() == record.key() && r.channel == record.channel);
                match existing {
                    Some(row) => {
                        state.rows[row] = record;
                        changes.push(ModelChange::DataChanged { row });
                    }
                    None => state.rows.push(record),
                }
            }

            let last = state.rows.len();
            if last > first_new {
                changes.push(ModelChange::RowsInserted {
                    first: first_new,
                    last: last - 1,
                });
            }
        }

        for change in changes {
            self.notify(change);
        }
        Ok(())
    }

    /// Subscribe to model changes
    pub fn subscribe(&self) -> broadcast::Receiver<ModelChange> {
        self.changes_tx.subscribe()
    }

    /// Stream of model changes
    ///
    /// Changes missed by a slow consumer are skipped.
    pub fn changes(&self) -> impl Stream<Item = ModelChange> + Send + use<> {
        use async_stream::stream;

        let mut changes_rx = self.changes_tx.subscribe();
        stream! {
            loop {
                match changes_rx.recv().await {
                    Ok(change) => yield change,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    fn read_state(&self) -> Option<RwLockReadGuard<'_, MixerState>> {
        match self.state.read() {
            Ok(state) => Some(state),
            Err(_) => {
                warn!("Mixer state lock poisoned, reading as empty");
                None
            }
        }
    }

    fn notify(&self, change: ModelChange) {
        let _ = self.changes_tx.send(change);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::thread;

    use super::*;
    use crate::services::mixer::DeviceClass;

    struct NullWriter;

    impl VolumeWriter for NullWriter {
        fn submit(&self, _key: DeviceKey, _volume: VolumeVector) -> Result<(), MixerError> {
            Ok(())
        }
    }

    #[test]
    fn poisoned_model_reads_empty_and_rejects_edits() {
        let model = ControlListModel::new(Arc::new(NullWriter));
        model
            .apply_snapshot(&DeviceSnapshot {
                key: DeviceKey::new(DeviceClass::Sink, 0),
                description: "Speakers".to_string(),
                channel_labels: Vec::new(),
                volume: VolumeVector::new(vec![1, 2]).unwrap(),
            })
            .unwrap();

        let poisoner = model.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.state.write().unwrap();
            panic!("poison the state lock");
        })
        .join();

        assert_eq!(model.row_count(), 0);
        assert!(model.rows().is_empty());
        assert!(model.row(0).is_none());
        assert!(
            model
                .cached_volume(DeviceKey::new(DeviceClass::Sink, 0))
                .is_none()
        );
        assert_eq!(model.set_volume(0, 5), Err(MixerError::LockPoisoned));
    }
}
