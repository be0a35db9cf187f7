use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::audio::{DeviceState, FieldError, PassError, PropertyKey};
use crate::system::traits::{
    DeviceCollection, DeviceSource, EndpointProbe, FileSystemInterface, PropertyStore,
};

/// Mock device source for testing - provides scripted device behavior
pub struct MockDeviceSource {
    devices: Vec<MockEndpoint>,
    fail_listing: bool,
    list_calls: Arc<Mutex<usize>>,
}

impl MockDeviceSource {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            fail_listing: false,
            list_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Append a device to the snapshot this source will hand out
    pub fn with_device(mut self, device: MockEndpoint) -> Self {
        self.devices.push(device);
        self
    }

    /// Configure the source to fail the whole listing
    pub fn with_listing_failure(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Number of times list_devices was called
    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

impl Default for MockDeviceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSource for MockDeviceSource {
    fn list_devices(&self) -> Result<Box<dyn DeviceCollection>, PassError> {
        *self.list_calls.lock().unwrap() += 1;

        if self.fail_listing {
            return Err(PassError::CollectionUnavailable(
                "mock listing failure".to_string(),
            ));
        }

        Ok(Box::new(MockCollection {
            devices: self.devices.clone(),
        }))
    }
}

struct MockCollection {
    devices: Vec<MockEndpoint>,
}

impl DeviceCollection for MockCollection {
    fn len(&self) -> u32 {
        self.devices.len() as u32
    }

    fn item(&self, index: u32) -> Result<Box<dyn EndpointProbe>, FieldError> {
        let device = self
            .devices
            .get(index as usize)
            .ok_or_else(|| FieldError(format!("mock index {} out of range", index)))?;

        if device.unreachable {
            return Err(FieldError(format!("mock device {} unreachable", index)));
        }

        Ok(Box::new(device.clone()))
    }
}

/// One scripted endpoint device. Every failure mode of the real platform
/// has a knob: unreachable device, id/state fetch failure, store-open
/// failure, per-key read failure, or plain property absence.
#[derive(Clone)]
pub struct MockEndpoint {
    id: Option<String>,
    state: Option<DeviceState>,
    properties: HashMap<PropertyKey, String>,
    failing_properties: HashSet<PropertyKey>,
    store_fails: bool,
    unreachable: bool,
}

impl MockEndpoint {
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            state: Some(DeviceState::Active),
            properties: HashMap::new(),
            failing_properties: HashSet::new(),
            store_fails: false,
            unreachable: false,
        }
    }

    pub fn with_state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_property(mut self, key: PropertyKey, value: &str) -> Self {
        self.properties.insert(key, value.to_string());
        self
    }

    /// Make the id fetch fail for this device
    pub fn with_id_failure(mut self) -> Self {
        self.id = None;
        self
    }

    /// Make the state fetch fail for this device
    pub fn with_state_failure(mut self) -> Self {
        self.state = None;
        self
    }

    /// Make opening the property store fail for this device
    pub fn with_store_failure(mut self) -> Self {
        self.store_fails = true;
        self
    }

    /// Make reading one specific property fail (distinct from absence)
    pub fn with_property_failure(mut self, key: PropertyKey) -> Self {
        self.failing_properties.insert(key);
        self
    }

    /// Make the device handle itself unobtainable
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }
}

impl EndpointProbe for MockEndpoint {
    fn id(&self) -> Result<String, FieldError> {
        self.id
            .clone()
            .ok_or_else(|| FieldError("mock id failure".to_string()))
    }

    fn state(&self) -> Result<DeviceState, FieldError> {
        self.state
            .ok_or_else(|| FieldError("mock state failure".to_string()))
    }

    fn open_properties(&self) -> Result<Box<dyn PropertyStore>, FieldError> {
        if self.store_fails {
            return Err(FieldError("mock property store failure".to_string()));
        }

        Ok(Box::new(MockPropertyStore {
            properties: self.properties.clone(),
            failing_properties: self.failing_properties.clone(),
        }))
    }
}

struct MockPropertyStore {
    properties: HashMap<PropertyKey, String>,
    failing_properties: HashSet<PropertyKey>,
}

impl PropertyStore for MockPropertyStore {
    fn read_string(&self, key: PropertyKey) -> Result<Option<String>, FieldError> {
        if self.failing_properties.contains(&key) {
            return Err(FieldError(format!("mock read failure for {:?}", key)));
        }
        Ok(self.properties.get(&key).cloned())
    }
}

/// Mock file system for testing - provides controllable file operations
#[derive(Clone)]
pub struct MockFileSystem {
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    pub read_calls: Arc<Mutex<Vec<PathBuf>>>,
    pub should_fail_read: Arc<Mutex<bool>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            read_calls: Arc::new(Mutex::new(Vec::new())),
            should_fail_read: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a file to the mock file system
    pub fn add_file<P: AsRef<Path>>(&self, path: P, content: String) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), content);
    }

    /// Get all read calls that were made
    pub fn get_read_calls(&self) -> Vec<PathBuf> {
        self.read_calls.lock().unwrap().clone()
    }

    /// Configure the mock to fail read operations
    pub fn set_read_failure(&self, should_fail: bool) {
        *self.should_fail_read.lock().unwrap() = should_fail;
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemInterface for MockFileSystem {
    fn read_config_file(&self, path: &Path) -> Result<String> {
        self.read_calls.lock().unwrap().push(path.to_path_buf());

        if *self.should_fail_read.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock read failure"));
        }

        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }

    fn config_file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(&path.to_path_buf())
    }
}
