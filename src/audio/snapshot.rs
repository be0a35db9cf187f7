use tracing::{debug, info};

use crate::audio::{DeviceState, EndpointRecord, PassError, PropertyKey};
use crate::system::{DeviceSource, EndpointProbe, PropertyStore};

/// One-shot enumeration pass over a device source.
///
/// The pass is strictly sequential and best-effort: a failure on one device
/// or one field never aborts the pass. Only a listing failure does, in
/// which case no records are produced at all.
pub struct EndpointSnapshot<S: DeviceSource> {
    source: S,
}

impl<S: DeviceSource> EndpointSnapshot<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Capture one snapshot: one record per device, in platform order.
    pub fn capture(&self) -> Result<Vec<EndpointRecord>, PassError> {
        let collection = self.source.list_devices()?;
        let count = collection.len();
        info!("enumerating {} endpoint device(s)", count);

        let mut records = Vec::with_capacity(count as usize);
        for index in 0..count {
            // Probe and property store live only for this iteration.
            let record = match collection.item(index) {
                Ok(probe) => read_device(index, probe.as_ref()),
                Err(e) => {
                    debug!("device {} unreachable: {}", index, e);
                    EndpointRecord::empty(index)
                }
            };
            records.push(record);
        }

        Ok(records)
    }

    /// Get reference to the device source (for testing)
    #[cfg(any(test, feature = "test-mocks"))]
    #[allow(dead_code)]
    pub fn get_source(&self) -> &S {
        &self.source
    }
}

/// Pull every field of one device, substituting absence for any field
/// that cannot be retrieved.
fn read_device(index: u32, probe: &dyn EndpointProbe) -> EndpointRecord {
    let id = match probe.id() {
        Ok(id) => Some(id),
        Err(e) => {
            debug!("device {}: id unavailable: {}", index, e);
            None
        }
    };

    let state = probe.state().unwrap_or_else(|e| {
        debug!("device {}: state unavailable: {}", index, e);
        DeviceState::Unknown
    });

    let (friendly_name, description, interface_name) = match probe.open_properties() {
        Ok(store) => (
            read_property(index, store.as_ref(), PropertyKey::FriendlyName),
            read_property(index, store.as_ref(), PropertyKey::Description),
            read_property(index, store.as_ref(), PropertyKey::InterfaceFriendlyName),
        ),
        Err(e) => {
            debug!("device {}: property store unavailable: {}", index, e);
            (None, None, None)
        }
    };

    EndpointRecord {
        index,
        id,
        state,
        friendly_name,
        description,
        interface_name,
    }
}

fn read_property(index: u32, store: &dyn PropertyStore, key: PropertyKey) -> Option<String> {
    match store.read_string(key) {
        Ok(value) => value,
        Err(e) => {
            debug!("device {}: property {:?} unavailable: {}", index, key, e);
            None
        }
    }
}
