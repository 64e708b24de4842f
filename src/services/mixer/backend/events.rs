use libpulse_binding::context::{
    Context,
    subscribe::{Facility, InterestMaskSet, Operation},
};
use tracing::{debug, warn};

use super::types::{SessionMessage, SessionSender};
use crate::services::mixer::{DeviceClass, DeviceKey};

type SubscriptionCallback = Option<Box<dyn FnMut(Option<Facility>, Option<Operation>, u32)>>;

/// Ask the server to report source and sink changes
///
/// Each relevant event is posted to the worker as
/// [`SessionMessage::DeviceChanged`].
pub fn setup_device_subscription(context: &mut Context, session_tx: &SessionSender) {
    let change_tx = session_tx.clone();
    let subscription_callback: SubscriptionCallback =
        Some(Box::new(move |facility, operation, index| {
            if let Some(key) = device_change(facility, operation, index) {
                let _ = change_tx.send(SessionMessage::DeviceChanged(key));
            }
        }));

    context.set_subscribe_callback(subscription_callback);
    context.subscribe(InterestMaskSet::SINK | InterestMaskSet::SOURCE, |success| {
        if !success {
            warn!("Device change subscription refused");
        }
    });
}

/// Device worth re-reading after a server event
///
/// Rows are never deleted, so removals are dropped here.
pub fn device_change(
    facility: Option<Facility>,
    operation: Option<Operation>,
    index: u32,
) -> Option<DeviceKey> {
    let class = match facility? {
        Facility::Source => DeviceClass::Source,
        Facility::Sink => DeviceClass::Sink,
        _ => return None,
    };

    match operation? {
        Operation::New | Operation::Changed => Some(DeviceKey::new(class, index)),
        Operation::Removed => {
            debug!(%class, index, "Device removed, keeping its rows");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_changed_devices_are_refreshed() {
        assert_eq!(
            device_change(Some(Facility::Sink), Some(Operation::Changed), 4),
            Some(DeviceKey::new(DeviceClass::Sink, 4))
        );
        assert_eq!(
            device_change(Some(Facility::Source), Some(Operation::New), 2),
            Some(DeviceKey::new(DeviceClass::Source, 2))
        );
    }

    #[test]
    fn removals_and_other_facilities_are_ignored() {
        assert_eq!(
            device_change(Some(Facility::Sink), Some(Operation::Removed), 4),
            None
        );
        assert_eq!(
            device_change(Some(Facility::SinkInput), Some(Operation::Changed), 9),
            None
        );
        assert_eq!(device_change(None, Some(Operation::New), 1), None);
        assert_eq!(device_change(Some(Facility::Source), None, 1), None);
    }
}
