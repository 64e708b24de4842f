use std::borrow::Cow;

use libpulse_binding::{
    channelmap::{Map as ChannelMap, Position},
    context::{
        State as PulseState,
        introspect::{SinkInfo, SourceInfo},
    },
    volume::{ChannelVolumes, Volume as PulseVolume},
};

use crate::services::mixer::{
    ConnectionState, DeviceClass, DeviceKey, DeviceSnapshot, VolumeError, VolumeVector,
};

impl From<PulseState> for ConnectionState {
    fn from(state: PulseState) -> Self {
        match state {
            PulseState::Unconnected => ConnectionState::Unconnected,
            PulseState::Connecting => ConnectionState::Connecting,
            PulseState::Authorizing => ConnectionState::Authorizing,
            PulseState::SettingName => ConnectionState::SettingName,
            PulseState::Ready => ConnectionState::Ready,
            PulseState::Failed => ConnectionState::Failed,
            PulseState::Terminated => ConnectionState::Terminated,
        }
    }
}

/// Convert a server volume vector to ours
///
/// # Errors
/// Returns error if the server sent an empty vector or out-of-range level
pub fn volume_from_pulse(pulse_volume: &ChannelVolumes) -> Result<VolumeVector, VolumeError> {
    VolumeVector::new(pulse_volume.get().iter().map(|level| level.0).collect())
}

/// Convert our volume vector to the server's
pub fn volume_to_pulse(volume: &VolumeVector) -> ChannelVolumes {
    let mut pulse_volume = ChannelVolumes::default();
    pulse_volume.set_len(volume.channels() as u8);
    for (slot, &level) in pulse_volume.get_mut().iter_mut().zip(volume.as_slice()) {
        *slot = PulseVolume(level);
    }
    pulse_volume
}

/// Display label for a channel position
pub fn channel_label(position: Position) -> Option<&'static str> {
    let label = match position {
        Position::Mono => "Mono",
        Position::FrontLeft => "Front Left",
        Position::FrontRight => "Front Right",
        Position::FrontCenter => "Center",
        Position::RearCenter => "Rear Center",
        Position::RearLeft => "Rear Left",
        Position::RearRight => "Rear Right",
        Position::Lfe => "LFE",
        Position::FrontLeftOfCenter => "Left Center",
        Position::FrontRightOfCenter => "Right Center",
        Position::SideLeft => "Side Left",
        Position::SideRight => "Side Right",
        _ => return None,
    };
    Some(label)
}

fn channel_labels(map: &ChannelMap) -> Vec<String> {
    map.get()
        .iter()
        .enumerate()
        .map(|(channel, &position)| {
            channel_label(position)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Channel {channel}"))
        })
        .collect()
}

fn cow_str_to_string(cow_str: Option<&Cow<str>>) -> String {
    cow_str.map(|s| s.to_string()).unwrap_or_default()
}

/// Build a snapshot from a source list entry
///
/// # Errors
/// Returns error if the entry's volume vector is unusable
pub fn snapshot_from_source(info: &SourceInfo) -> Result<DeviceSnapshot, VolumeError> {
    Ok(DeviceSnapshot {
        key: DeviceKey::new(DeviceClass::Source, info.index),
        description: cow_str_to_string(info.description.as_ref()),
        channel_labels: channel_labels(&info.channel_map),
        volume: volume_from_pulse(&info.volume)?,
    })
}

/// Build a snapshot from a sink list entry
///
/// # Errors
/// Returns error if the entry's volume vector is unusable
pub fn snapshot_from_sink(info: &SinkInfo) -> Result<DeviceSnapshot, VolumeError> {
    Ok(DeviceSnapshot {
        key: DeviceKey::new(DeviceClass::Sink, info.index),
        description: cow_str_to_string(info.description.as_ref()),
        channel_labels: channel_labels(&info.channel_map),
        volume: volume_from_pulse(&info.volume)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_common_positions() {
        assert_eq!(channel_label(Position::Mono), Some("Mono"));
        assert_eq!(channel_label(Position::FrontLeft), Some("Front Left"));
        assert_eq!(channel_label(Position::Lfe), Some("LFE"));
        assert_eq!(channel_label(Position::SideRight), Some("Side Right"));
        assert_eq!(channel_label(Position::TopCenter), None);
    }

    #[test]
    fn volume_conversion_keeps_every_slot() {
        let volume = VolumeVector::new(vec![0, 0x10000, 0x8000]).unwrap();

        let pulse_volume = volume_to_pulse(&volume);

        assert_eq!(pulse_volume.len(), 3);
        assert_eq!(volume_from_pulse(&pulse_volume).unwrap(), volume);
    }

    #[test]
    fn connection_states_map_one_to_one() {
        assert_eq!(
            ConnectionState::from(PulseState::SettingName),
            ConnectionState::SettingName
        );
        assert_eq!(
            ConnectionState::from(PulseState::Failed),
            ConnectionState::Failed
        );
    }
}
