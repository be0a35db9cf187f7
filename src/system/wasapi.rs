//! Device enumeration over the Windows MMDevice API.
//!
//! All COM coupling lives here, behind the `DeviceSource` seam. Every
//! per-device and per-field COM failure is converted into a `FieldError`
//! so the pass can substitute absence and keep going.

use windows::Win32::Devices::Properties::{
    DEVPKEY_Device_DeviceDesc, DEVPKEY_Device_FriendlyName, DEVPKEY_DeviceInterface_FriendlyName,
};
use windows::Win32::Media::Audio::{
    DEVICE_STATE, DEVICE_STATE_ACTIVE, DEVICE_STATE_DISABLED, DEVICE_STATE_NOTPRESENT,
    DEVICE_STATE_UNPLUGGED, DEVICE_STATEMASK_ALL, IMMDevice, IMMDeviceCollection,
    IMMDeviceEnumerator, MMDeviceEnumerator, eAll,
};
use windows::Win32::System::Com::{
    CLSCTX_ALL, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx, CoTaskMemFree,
    CoUninitialize, STGM_READ,
};
use windows::Win32::UI::Shell::PropertiesSystem::{IPropertyStore, PROPERTYKEY};

use crate::audio::{DeviceState, FieldError, PassError, PropertyKey};
use crate::system::traits::{DeviceCollection, DeviceSource, EndpointProbe, PropertyStore};

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, PassError> {
        unsafe {
            // Apartment-threaded, matching the MMDevice requirements
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(|e| PassError::SubsystemInit(e.to_string()))?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// Device source backed by IMMDeviceEnumerator.
pub struct WasapiDeviceSource {
    // Field order matters: the enumerator must drop before COM shuts down.
    enumerator: IMMDeviceEnumerator,
    _com: ComGuard,
}

impl WasapiDeviceSource {
    /// Initialize COM and create the MMDevice enumerator. Failure here is
    /// fatal to the pass.
    pub fn new() -> Result<Self, PassError> {
        let com = ComGuard::new()?;
        let enumerator: IMMDeviceEnumerator =
            unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL) }
                .map_err(|e| PassError::SubsystemInit(e.to_string()))?;

        Ok(Self {
            enumerator,
            _com: com,
        })
    }
}

impl DeviceSource for WasapiDeviceSource {
    fn list_devices(&self) -> Result<Box<dyn DeviceCollection>, PassError> {
        unsafe {
            // All directions, all states: the report covers disabled,
            // absent and unplugged endpoints too.
            let collection = self
                .enumerator
                .EnumAudioEndpoints(eAll, DEVICE_STATEMASK_ALL)
                .map_err(|e| PassError::CollectionUnavailable(e.to_string()))?;

            let count = collection
                .GetCount()
                .map_err(|e| PassError::CollectionUnavailable(e.to_string()))?;

            Ok(Box::new(WasapiCollection { collection, count }))
        }
    }
}

struct WasapiCollection {
    collection: IMMDeviceCollection,
    count: u32,
}

impl DeviceCollection for WasapiCollection {
    fn len(&self) -> u32 {
        self.count
    }

    fn item(&self, index: u32) -> Result<Box<dyn EndpointProbe>, FieldError> {
        let device = unsafe { self.collection.Item(index) }
            .map_err(|e| FieldError(format!("device {} unavailable: {}", index, e)))?;
        Ok(Box::new(WasapiProbe { device }))
    }
}

struct WasapiProbe {
    device: IMMDevice,
}

impl EndpointProbe for WasapiProbe {
    fn id(&self) -> Result<String, FieldError> {
        unsafe {
            let buffer = self
                .device
                .GetId()
                .map_err(|e| FieldError(format!("GetId failed: {}", e)))?;

            // The returned string is a task allocation owned by us for the
            // duration of this read; free it once converted.
            let id = buffer.to_string();
            CoTaskMemFree(Some(buffer.as_ptr() as *const core::ffi::c_void));

            id.map_err(|e| FieldError(format!("device id not valid UTF-16: {}", e)))
        }
    }

    fn state(&self) -> Result<DeviceState, FieldError> {
        let state = unsafe { self.device.GetState() }
            .map_err(|e| FieldError(format!("GetState failed: {}", e)))?;
        Ok(map_state(state))
    }

    fn open_properties(&self) -> Result<Box<dyn PropertyStore>, FieldError> {
        let props: IPropertyStore = unsafe { self.device.OpenPropertyStore(STGM_READ) }
            .map_err(|e| FieldError(format!("OpenPropertyStore failed: {}", e)))?;
        Ok(Box::new(WasapiPropertyStore { props }))
    }
}

struct WasapiPropertyStore {
    props: IPropertyStore,
}

impl PropertyStore for WasapiPropertyStore {
    fn read_string(&self, key: PropertyKey) -> Result<Option<String>, FieldError> {
        let key = property_key(key);
        unsafe {
            let value = self
                .props
                .GetValue(&key)
                .map_err(|e| FieldError(format!("GetValue failed: {}", e)))?;

            // PROPVARIANT renders VT_EMPTY as an empty string; treat that
            // as the property being absent.
            let s = value.to_string();
            if s.is_empty() { Ok(None) } else { Ok(Some(s)) }
        }
    }
}

fn map_state(state: DEVICE_STATE) -> DeviceState {
    if state == DEVICE_STATE_ACTIVE {
        DeviceState::Active
    } else if state == DEVICE_STATE_DISABLED {
        DeviceState::Disabled
    } else if state == DEVICE_STATE_NOTPRESENT {
        DeviceState::NotPresent
    } else if state == DEVICE_STATE_UNPLUGGED {
        DeviceState::Unplugged
    } else {
        DeviceState::Unknown
    }
}

/// Convert a DEVPROPKEY to the PROPERTYKEY the property store expects.
fn property_key(key: PropertyKey) -> PROPERTYKEY {
    let devpkey = match key {
        PropertyKey::FriendlyName => DEVPKEY_Device_FriendlyName,
        PropertyKey::Description => DEVPKEY_Device_DeviceDesc,
        PropertyKey::InterfaceFriendlyName => DEVPKEY_DeviceInterface_FriendlyName,
    };
    PROPERTYKEY {
        fmtid: devpkey.fmtid,
        pid: devpkey.pid,
    }
}
