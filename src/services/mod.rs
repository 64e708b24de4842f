/// Mixer control panel service
pub mod mixer;

pub use mixer::{
    ControlListModel, ControlRecord, DeviceClass, DeviceIndex, DeviceKey, MixerError,
    MixerService, Role, RoleValue, VolumeVector,
};
