use libpulse_binding::{callbacks::ListResult, context::Context};
use tracing::{debug, info, warn};

use super::{
    conversion::{snapshot_from_sink, snapshot_from_source},
    types::{SessionMessage, SessionSender, StatusSender},
};
use crate::services::mixer::{
    ControlListModel, DeviceClass, DeviceKey, DeviceSnapshot, EnumerationStatus, VolumeError,
};

/// Request both device lists; sources are asked for first so their rows
/// come first in the model
pub fn trigger_device_discovery(
    context: &Context,
    model: &ControlListModel,
    status: &StatusSender,
    session_tx: &SessionSender,
) {
    discover_sources(context, model, status, session_tx);
    discover_sinks(context, model, status, session_tx);
}

fn discover_sources(
    context: &Context,
    model: &ControlListModel,
    status: &StatusSender,
    session_tx: &SessionSender,
) {
    let model = model.clone();
    let status = status.clone();
    let session_tx = session_tx.clone();
    let introspect = context.introspect();

    introspect.get_source_info_list(move |result| match result {
        ListResult::Item(source_info) => {
            record_device(&model, DeviceClass::Source, snapshot_from_source(source_info));
        }
        ListResult::End => finish(&status, DeviceClass::Source),
        ListResult::Error => fail(&status, &session_tx, DeviceClass::Source),
    });
}

fn discover_sinks(
    context: &Context,
    model: &ControlListModel,
    status: &StatusSender,
    session_tx: &SessionSender,
) {
    let model = model.clone();
    let status = status.clone();
    let session_tx = session_tx.clone();
    let introspect = context.introspect();

    introspect.get_sink_info_list(move |result| match result {
        ListResult::Item(sink_info) => {
            record_device(&model, DeviceClass::Sink, snapshot_from_sink(sink_info));
        }
        ListResult::End => finish(&status, DeviceClass::Sink),
        ListResult::Error => fail(&status, &session_tx, DeviceClass::Sink),
    });
}

/// Re-read one device after the server reported a change
///
/// Updates its rows in place, or appends rows for a device not seen before.
pub fn refresh_device(context: &Context, model: &ControlListModel, key: DeviceKey) {
    let model = model.clone();
    let introspect = context.introspect();

    match key.class {
        DeviceClass::Source => {
            introspect.get_source_info_by_index(key.index.0, move |result| match result {
                ListResult::Item(source_info) => {
                    record_device(&model, key.class, snapshot_from_source(source_info));
                }
                ListResult::End => {}
                ListResult::Error => debug!(%key, "Changed device is gone"),
            });
        }
        DeviceClass::Sink => {
            introspect.get_sink_info_by_index(key.index.0, move |result| match result {
                ListResult::Item(sink_info) => {
                    record_device(&model, key.class, snapshot_from_sink(sink_info));
                }
                ListResult::End => {}
                ListResult::Error => debug!(%key, "Changed device is gone"),
            });
        }
    }
}

fn record_device(
    model: &ControlListModel,
    class: DeviceClass,
    snapshot: Result<DeviceSnapshot, VolumeError>,
) {
    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(%class, error = %e, "Skipping device with unusable volume");
            return;
        }
    };

    debug!(
        key = %snapshot.key,
        description = %snapshot.description,
        channels = snapshot.volume.channels(),
        "Device enumerated"
    );
    if let Err(e) = model.apply_snapshot(&snapshot) {
        warn!(key = %snapshot.key, error = %e, "Could not record device");
    }
}

fn finish(status: &StatusSender, class: DeviceClass) {
    info!(%class, "Enumeration complete");
    status.send_modify(|status| *status.enumeration_mut(class) = EnumerationStatus::Complete);
}

fn fail(status: &StatusSender, session_tx: &SessionSender, class: DeviceClass) {
    status.send_modify(|status| *status.enumeration_mut(class) = EnumerationStatus::Failed);
    let _ = session_tx.send(SessionMessage::EnumerationFailed(class));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::mixer::{MixerError, VolumeVector, VolumeWriter};

    struct NullWriter;

    impl VolumeWriter for NullWriter {
        fn submit(&self, _key: DeviceKey, _volume: VolumeVector) -> Result<(), MixerError> {
            Ok(())
        }
    }

    fn sink(index: u32, levels: Vec<u32>) -> DeviceSnapshot {
        DeviceSnapshot {
            key: DeviceKey::new(DeviceClass::Sink, index),
            description: "Speakers".to_string(),
            channel_labels: Vec::new(),
            volume: VolumeVector::new(levels).unwrap(),
        }
    }

    #[test]
    fn unusable_volume_is_skipped() {
        let model = ControlListModel::new(Arc::new(NullWriter));

        record_device(
            &model,
            DeviceClass::Source,
            Err(VolumeError::InvalidChannelCount { count: 0 }),
        );

        assert_eq!(model.row_count(), 0);
    }

    #[test]
    fn skipped_device_leaves_others_untouched() {
        let model = ControlListModel::new(Arc::new(NullWriter));
        record_device(&model, DeviceClass::Sink, Ok(sink(1, vec![10, 20])));

        record_device(
            &model,
            DeviceClass::Sink,
            Err(VolumeError::InvalidChannelCount { count: 33 }),
        );

        assert_eq!(model.row_count(), 2);
        assert_eq!(
            model
                .cached_volume(DeviceKey::new(DeviceClass::Sink, 1))
                .unwrap()
                .as_slice(),
            &[10, 20]
        );
    }

    #[test]
    fn refreshed_device_updates_rows_in_place() {
        let model = ControlListModel::new(Arc::new(NullWriter));
        record_device(&model, DeviceClass::Sink, Ok(sink(1, vec![10, 20])));

        record_device(&model, DeviceClass::Sink, Ok(sink(1, vec![30, 40])));

        assert_eq!(model.row_count(), 2);
        assert_eq!(model.row(1).unwrap().volume, 40);
    }
}
