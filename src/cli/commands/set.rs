use tracing::instrument;

use crate::{
    cli::{
        CommandResult,
        formatting::{format_level, parse_level},
    },
    services::{DeviceClass, DeviceKey, MixerService, mixer::VolumeEdit},
};

/// Sets the level of one row and waits for the server to confirm
///
/// # Errors
/// Returns error if the level doesn't parse, the row doesn't exist, or the
/// write can't be submitted
#[instrument(skip(service))]
pub async fn by_row(service: &MixerService, row: usize, level: &str) -> CommandResult {
    let level = parse_level(level)?;
    let edit = service.model().set_volume(row, level)?;
    finish(service, edit, &format!("row {row}"), level).await
}

/// Sets one channel of a device and waits for the server to confirm
///
/// # Errors
/// Returns error if the level doesn't parse, the device was never listed,
/// the channel doesn't exist, or the write can't be submitted
#[instrument(skip(service))]
pub async fn by_device(
    service: &MixerService,
    class: DeviceClass,
    index: u32,
    channel: usize,
    level: &str,
) -> CommandResult {
    let level = parse_level(level)?;
    let key = DeviceKey::new(class, index);
    let edit = service.model().set_device_volume(key, channel, level)?;
    finish(service, edit, &format!("{key} channel {channel}"), level).await
}

async fn finish(
    service: &MixerService,
    edit: VolumeEdit,
    target: &str,
    level: u32,
) -> CommandResult {
    match edit {
        VolumeEdit::Unchanged => Ok(format!("{target} already at {}", format_level(level))),
        VolumeEdit::Applied => {
            service.wait_for_writes().await?;
            Ok(format!("{target} set to {}", format_level(level)))
        }
    }
}
