pub mod device;
pub mod snapshot;

pub use device::{DeviceState, EndpointRecord, FieldError, PassError, PropertyKey};
pub use snapshot::EndpointSnapshot;
