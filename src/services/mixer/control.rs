use std::fmt;

use serde::Serialize;

use super::VolumeVector;

/// Server-assigned device index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DeviceIndex(pub u32);

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the audio graph a device sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Capture device (microphone, line-in, monitor)
    Source,
    /// Playback device (speakers, headphones)
    Sink,
}

impl DeviceClass {
    /// Numeric form exposed through the `type` role
    pub fn as_u32(self) -> u32 {
        match self {
            DeviceClass::Source => 0,
            DeviceClass::Sink => 1,
        }
    }

    /// Lowercase name, as accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Source => "source",
            DeviceClass::Sink => "sink",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a device across both classes
///
/// Sources and sinks are numbered independently, so the index alone is
/// ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceKey {
    /// Device class
    pub class: DeviceClass,
    /// Index within the class
    pub index: DeviceIndex,
}

impl DeviceKey {
    /// Create a key from class and raw index
    pub fn new(class: DeviceClass, index: u32) -> Self {
        Self {
            class,
            index: DeviceIndex(index),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.index)
    }
}

/// One row of the mixer: a single channel of a single device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlRecord {
    /// Owning device index
    pub device_index: DeviceIndex,
    /// Owning device class
    pub device_class: DeviceClass,
    /// Channel slot within the device's volume vector
    pub channel: usize,
    /// Human readable device description
    pub description: String,
    /// Human readable channel position
    pub channel_label: String,
    /// Current level in server units
    pub volume: u32,
}

impl ControlRecord {
    /// Key of the device this row belongs to
    pub fn key(&self) -> DeviceKey {
        DeviceKey {
            class: self.device_class,
            index: self.device_index,
        }
    }
}

/// A device as delivered by enumeration, before it is split into rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSnapshot {
    /// Device identity
    pub key: DeviceKey,
    /// Human readable description
    pub description: String,
    /// One label per channel, in channel order
    pub channel_labels: Vec<String>,
    /// Full volume vector
    pub volume: VolumeVector,
}

impl DeviceSnapshot {
    /// Splits the snapshot into one record per channel
    ///
    /// Channels without a label get `Channel N`.
    pub fn records(&self) -> Vec<ControlRecord> {
        self.volume
            .as_slice()
            .iter()
            .enumerate()
            .map(|(channel, &volume)| ControlRecord {
                device_index: self.key.index,
                device_class: self.key.class,
                channel,
                description: self.description.clone(),
                channel_label: self
                    .channel_labels
                    .get(channel)
                    .cloned()
                    .unwrap_or_else(|| format!("Channel {channel}")),
                volume,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_yields_one_record_per_channel() {
        let snapshot = DeviceSnapshot {
            key: DeviceKey::new(DeviceClass::Sink, 3),
            description: "Built-in Audio".to_string(),
            channel_labels: vec!["Front Left".to_string(), "Front Right".to_string()],
            volume: VolumeVector::new(vec![10, 20]).unwrap(),
        };

        let records = snapshot.records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel_label, "Front Left");
        assert_eq!(records[1].channel, 1);
        assert_eq!(records[1].volume, 20);
        assert!(records.iter().all(|r| r.key() == snapshot.key));
    }

    #[test]
    fn missing_labels_fall_back_to_slot_number() {
        let snapshot = DeviceSnapshot {
            key: DeviceKey::new(DeviceClass::Source, 0),
            description: String::new(),
            channel_labels: vec!["Mono".to_string()],
            volume: VolumeVector::new(vec![1, 2, 3]).unwrap(),
        };

        let labels: Vec<_> = snapshot
            .records()
            .into_iter()
            .map(|r| r.channel_label)
            .collect();

        assert_eq!(labels, ["Mono", "Channel 1", "Channel 2"]);
    }

    #[test]
    fn source_and_sink_with_same_index_are_distinct() {
        assert_ne!(
            DeviceKey::new(DeviceClass::Source, 0),
            DeviceKey::new(DeviceClass::Sink, 0)
        );
    }
}
