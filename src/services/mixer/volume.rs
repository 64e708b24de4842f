use serde::Serialize;

/// Most channels a single device can carry.
pub const MAX_CHANNELS: usize = 32;

/// Silence.
pub const VOLUME_MUTED: u32 = 0;

/// Unamplified level (100%).
pub const VOLUME_NORM: u32 = 0x10000;

/// Largest level the server accepts.
pub const VOLUME_MAX: u32 = u32::MAX / 2;

/// Full multi-channel volume of one device, in server units
///
/// The server only accepts whole vectors, so a single-channel edit is always
/// applied to a copy of the complete vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeVector {
    levels: Vec<u32>,
}

impl VolumeVector {
    /// Create a volume vector from per-channel levels
    ///
    /// # Errors
    /// Returns error if there are no channels, more than [`MAX_CHANNELS`],
    /// or any level exceeds [`VOLUME_MAX`]
    pub fn new(levels: Vec<u32>) -> Result<Self, VolumeError> {
        if levels.is_empty() || levels.len() > MAX_CHANNELS {
            return Err(VolumeError::InvalidChannelCount {
                count: levels.len(),
            });
        }
        for (channel, &level) in levels.iter().enumerate() {
            check_level(channel, level)?;
        }
        Ok(Self { levels })
    }

    /// Get the level of one channel
    pub fn get_channel(&self, channel: usize) -> Option<u32> {
        self.levels.get(channel).copied()
    }

    /// Set the level of one channel, leaving every other slot untouched
    ///
    /// # Errors
    /// Returns error if the level is out of range or the channel doesn't exist
    pub fn set_channel(&mut self, channel: usize, level: u32) -> Result<(), VolumeError> {
        check_level(channel, level)?;
        match self.levels.get_mut(channel) {
            Some(slot) => {
                *slot = level;
                Ok(())
            }
            None => Err(VolumeError::InvalidChannel {
                channel,
                channels: self.levels.len(),
            }),
        }
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.levels.len()
    }

    /// All channel levels in channel order
    pub fn as_slice(&self) -> &[u32] {
        &self.levels
    }
}

fn check_level(channel: usize, level: u32) -> Result<(), VolumeError> {
    if level > VOLUME_MAX {
        return Err(VolumeError::InvalidVolume { channel, level });
    }
    Ok(())
}

/// Converts a level to a percentage of [`VOLUME_NORM`], rounded.
pub fn level_to_percent(level: u32) -> u32 {
    ((u64::from(level) * 100 + u64::from(VOLUME_NORM) / 2) / u64::from(VOLUME_NORM)) as u32
}

/// Converts a percentage of [`VOLUME_NORM`] to a level, rounded and clamped to
/// [`VOLUME_MAX`].
pub fn percent_to_level(percent: u32) -> u32 {
    let level = (u64::from(percent) * u64::from(VOLUME_NORM) + 50) / 100;
    level.min(u64::from(VOLUME_MAX)) as u32
}

/// Volume-related errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// Level above the server maximum
    #[error("Invalid volume {level} for channel {channel} (must be at most {max})", max = VOLUME_MAX)]
    InvalidVolume {
        /// Channel index
        channel: usize,
        /// Rejected level
        level: u32,
    },
    /// Channel index past the end of the vector
    #[error("Invalid channel index {channel} (device has {channels} channels)")]
    InvalidChannel {
        /// Channel index
        channel: usize,
        /// Channels the device actually has
        channels: usize,
    },
    /// Empty or oversized vector
    #[error("Invalid channel count {count} (must be 1-{max})", max = MAX_CHANNELS)]
    InvalidChannelCount {
        /// Rejected channel count
        count: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized_vectors() {
        assert_eq!(
            VolumeVector::new(vec![]),
            Err(VolumeError::InvalidChannelCount { count: 0 })
        );
        assert!(VolumeVector::new(vec![VOLUME_NORM; MAX_CHANNELS]).is_ok());
        assert_eq!(
            VolumeVector::new(vec![VOLUME_NORM; MAX_CHANNELS + 1]),
            Err(VolumeError::InvalidChannelCount {
                count: MAX_CHANNELS + 1
            })
        );
    }

    #[test]
    fn rejects_levels_above_max() {
        assert_eq!(
            VolumeVector::new(vec![VOLUME_NORM, VOLUME_MAX + 1]),
            Err(VolumeError::InvalidVolume {
                channel: 1,
                level: VOLUME_MAX + 1
            })
        );
    }

    #[test]
    fn set_channel_touches_one_slot() {
        let mut volume = VolumeVector::new(vec![100, 200, 300]).unwrap();

        volume.set_channel(1, 999).unwrap();

        assert_eq!(volume.as_slice(), &[100, 999, 300]);
    }

    #[test]
    fn set_channel_out_of_range_leaves_vector_alone() {
        let mut volume = VolumeVector::new(vec![100, 200]).unwrap();

        assert_eq!(
            volume.set_channel(2, 5),
            Err(VolumeError::InvalidChannel {
                channel: 2,
                channels: 2
            })
        );
        assert_eq!(
            volume.set_channel(0, VOLUME_MAX + 1),
            Err(VolumeError::InvalidVolume {
                channel: 0,
                level: VOLUME_MAX + 1
            })
        );
        assert_eq!(volume.as_slice(), &[100, 200]);
    }

    #[test]
    fn percent_conversions() {
        assert_eq!(level_to_percent(VOLUME_MUTED), 0);
        assert_eq!(level_to_percent(VOLUME_NORM), 100);
        assert_eq!(level_to_percent(VOLUME_NORM / 2), 50);
        assert_eq!(percent_to_level(100), VOLUME_NORM);
        assert_eq!(percent_to_level(150), VOLUME_NORM + VOLUME_NORM / 2);
        assert_eq!(percent_to_level(u32::MAX), VOLUME_MAX);
    }
}
