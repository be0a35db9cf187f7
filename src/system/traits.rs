use anyhow::Result;
use std::path::Path;

use crate::audio::{DeviceState, FieldError, PassError, PropertyKey};

/// Trait for the platform audio subsystem - abstracts MMDevice/COM interactions.
///
/// The split into source, collection, probe, and store mirrors where the
/// platform can fail independently: a listing failure aborts the pass, an
/// unreachable device loses only its own fields, and a missing property
/// loses only itself.
pub trait DeviceSource {
    /// Take a fixed-size snapshot of all endpoint devices currently known
    /// to the platform, regardless of direction or state.
    fn list_devices(&self) -> Result<Box<dyn DeviceCollection>, PassError>;
}

/// A fixed-size, indexable snapshot of endpoint devices. Not live: devices
/// added or removed after the snapshot are not reflected.
pub trait DeviceCollection {
    /// Number of devices in the snapshot, fixed at creation.
    fn len(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open the device at `index`. Failure is scoped to that device.
    fn item(&self, index: u32) -> Result<Box<dyn EndpointProbe>, FieldError>;
}

/// Read-only handle to a single endpoint device, scoped to one loop
/// iteration of the enumeration pass.
pub trait EndpointProbe {
    /// Opaque unique identifier, stable within a session.
    fn id(&self) -> Result<String, FieldError>;

    /// Coarse lifecycle state.
    fn state(&self) -> Result<DeviceState, FieldError>;

    /// Open the read-only property store holding descriptive metadata.
    fn open_properties(&self) -> Result<Box<dyn PropertyStore>, FieldError>;
}

/// Read-only key-value store of string-typed device properties.
pub trait PropertyStore {
    /// Read a string property. `Ok(None)` means the platform has no value
    /// for that key; `Err` means the read itself failed. Both render the
    /// field as absent.
    fn read_string(&self, key: PropertyKey) -> Result<Option<String>, FieldError>;
}

/// Trait for file system operations - abstracts std::fs for testability.
/// This tool only ever reads its configuration; it never writes files.
pub trait FileSystemInterface {
    /// Read the entire contents of a configuration file
    fn read_config_file(&self, path: &Path) -> Result<String>;

    /// Check if a configuration file exists
    fn config_file_exists(&self, path: &Path) -> bool;
}
