use futures::StreamExt;
use tracing::info;

use crate::{
    cli::{CommandResult, formatting::format_level},
    services::{ControlListModel, MixerError, MixerService, mixer::ModelChange},
};

/// Prints rows as they are inserted or edited until interrupted
///
/// Subscribes before enumeration finishes, so the initial rows are printed
/// too; later lines come from server-side device changes.
///
/// # Errors
/// Returns error if enumeration fails or the Ctrl-C handler can't be
/// installed
pub async fn execute(service: &MixerService) -> CommandResult {
    let model = service.model();
    let mut changes = Box::pin(model.changes());
    service.wait_for_enumeration().await?;

    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            change = changes.next() => {
                let Some(change) = change else {
                    return Err(MixerError::SessionClosed.into());
                };
                for line in describe_change(model, change) {
                    println!("{line}");
                }
            }
            signal = &mut interrupted => {
                signal?;
                info!("Interrupted, stopping watch");
                return Ok(String::new());
            }
        }
    }
}

/// One line per row touched by `change`
fn describe_change(model: &ControlListModel, change: ModelChange) -> Vec<String> {
    let rows = match change {
        ModelChange::RowsInserted { first, last } => first..=last,
        ModelChange::DataChanged { row } => row..=row,
    };

    rows.filter_map(|row| {
        model.row(row).map(|record| {
            format!(
                "{row}: {} {} {} -> {}",
                record.device_class,
                record.description,
                record.channel_label,
                format_level(record.volume)
            )
        })
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::{
        DeviceClass, DeviceKey, VolumeVector,
        mixer::{DeviceSnapshot, VolumeWriter},
    };

    struct NullWriter;

    impl VolumeWriter for NullWriter {
        fn submit(&self, _key: DeviceKey, _volume: VolumeVector) -> Result<(), MixerError> {
            Ok(())
        }
    }

    fn speakers(levels: Vec<u32>) -> DeviceSnapshot {
        DeviceSnapshot {
            key: DeviceKey::new(DeviceClass::Sink, 2),
            description: "Speakers".to_string(),
            channel_labels: vec!["Front Left".to_string(), "Front Right".to_string()],
            volume: VolumeVector::new(levels).unwrap(),
        }
    }

    #[tokio::test]
    async fn rows_enumerated_after_subscribing_are_printed() {
        let model = ControlListModel::new(Arc::new(NullWriter));
        let mut changes = Box::pin(model.changes());

        model.apply_snapshot(&speakers(vec![65536, 0])).unwrap();

        let change = changes.next().await.unwrap();
        let lines = describe_change(&model, change);

        assert_eq!(
            lines,
            [
                "0: sink Speakers Front Left -> 65536 (100%)",
                "1: sink Speakers Front Right -> 0 (0%)",
            ]
        );
    }

    #[tokio::test]
    async fn server_side_change_prints_the_updated_row() {
        let model = ControlListModel::new(Arc::new(NullWriter));
        model.apply_snapshot(&speakers(vec![65536, 0])).unwrap();
        let mut changes = Box::pin(model.changes());

        model.apply_snapshot(&speakers(vec![65536, 32768])).unwrap();

        let mut lines = Vec::new();
        for _ in 0..2 {
            let change = changes.next().await.unwrap();
            lines.extend(describe_change(&model, change));
        }
        assert!(lines.contains(&"1: sink Speakers Front Right -> 32768 (50%)".to_string()));
    }
}
