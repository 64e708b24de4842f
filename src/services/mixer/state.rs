use super::{DeviceKey, VolumeError, VolumeVector};

/// Cached full volume vector of one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// Device identity
    pub key: DeviceKey,
    /// Complete channel vector last known for the device
    pub volume: VolumeVector,
}

/// Ordered per-device volume cache
///
/// Holds the whole vector the write API needs when only one channel was
/// edited. Entries are kept in arrival order and never removed.
#[derive(Debug, Clone, Default)]
pub struct ControlStateCache {
    entries: Vec<ControlState>,
}

impl ControlStateCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a device's vector, replacing the previous one for the same key
    pub fn upsert(&mut self, key: DeviceKey, volume: VolumeVector) {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.volume = volume,
            None => self.entries.push(ControlState { key, volume }),
        }
    }

    /// Look up a device's cached vector
    pub fn get(&self, key: DeviceKey) -> Option<&VolumeVector> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.volume)
    }

    /// Overwrite one channel of a cached vector and return the full result
    ///
    /// Returns `Ok(None)` when the device is not cached.
    ///
    /// # Errors
    /// Returns error if the channel or level is invalid; the cache is left
    /// unchanged in that case
    pub fn set_channel(
        &mut self,
        key: DeviceKey,
        channel: usize,
        level: u32,
    ) -> Result<Option<VolumeVector>, VolumeError> {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) else {
            return Ok(None);
        };
        entry.volume.set_channel(channel, level)?;
        Ok(Some(entry.volume.clone()))
    }

    /// Number of cached devices
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate cached devices in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &ControlState> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::mixer::DeviceClass;

    fn vector(levels: &[u32]) -> VolumeVector {
        VolumeVector::new(levels.to_vec()).unwrap()
    }

    #[test]
    fn upsert_keeps_arrival_order_and_replaces_in_place() {
        let mut cache = ControlStateCache::new();
        let sink = DeviceKey::new(DeviceClass::Sink, 1);
        let source = DeviceKey::new(DeviceClass::Source, 1);

        cache.upsert(sink, vector(&[1, 2]));
        cache.upsert(source, vector(&[3]));
        cache.upsert(sink, vector(&[5, 6]));

        let keys: Vec<_> = cache.iter().map(|entry| entry.key).collect();
        assert_eq!(keys, [sink, source]);
        assert_eq!(cache.get(sink).unwrap().as_slice(), &[5, 6]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn set_channel_changes_only_that_slot() {
        let mut cache = ControlStateCache::new();
        let key = DeviceKey::new(DeviceClass::Sink, 0);
        let other = DeviceKey::new(DeviceClass::Sink, 4);
        cache.upsert(key, vector(&[10, 20, 30]));
        cache.upsert(other, vector(&[7, 7]));

        let submitted = cache.set_channel(key, 2, 99).unwrap().unwrap();

        assert_eq!(submitted.as_slice(), &[10, 20, 99]);
        assert_eq!(cache.get(key).unwrap().as_slice(), &[10, 20, 99]);
        assert_eq!(cache.get(other).unwrap().as_slice(), &[7, 7]);
    }

    #[test]
    fn set_channel_on_unknown_device_is_none() {
        let mut cache = ControlStateCache::new();
        cache.upsert(DeviceKey::new(DeviceClass::Source, 0), vector(&[1]));

        let result = cache.set_channel(DeviceKey::new(DeviceClass::Sink, 0), 0, 5);

        assert_eq!(result, Ok(None));
    }

    #[test]
    fn invalid_channel_is_rejected_without_change() {
        let mut cache = ControlStateCache::new();
        let key = DeviceKey::new(DeviceClass::Source, 2);
        cache.upsert(key, vector(&[1, 2]));

        assert!(cache.set_channel(key, 5, 3).is_err());
        assert_eq!(cache.get(key).unwrap().as_slice(), &[1, 2]);
    }
}
