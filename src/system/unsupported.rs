use crate::audio::PassError;
use crate::system::traits::{DeviceCollection, DeviceSource};

/// Placeholder source for platforms without an endpoint backend. The pass
/// fails cleanly (no report) and the process still exits 0.
pub struct UnsupportedDeviceSource;

impl DeviceSource for UnsupportedDeviceSource {
    fn list_devices(&self) -> Result<Box<dyn DeviceCollection>, PassError> {
        Err(PassError::SubsystemInit(
            "no audio endpoint backend for this platform".to_string(),
        ))
    }
}
