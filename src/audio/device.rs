use std::fmt;
use thiserror::Error;

/// Lifecycle state of an audio endpoint as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Device is active and available for use
    Active,

    /// Device is disabled in the system sound settings
    Disabled,

    /// Device is registered but not present (driver issue)
    NotPresent,

    /// Device is physically unplugged
    Unplugged,

    /// State could not be retrieved or is not one of the known values
    Unknown,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Active => write!(f, "ACTIVE"),
            DeviceState::Disabled => write!(f, "DISABLED"),
            DeviceState::NotPresent => write!(f, "NOTPRESENT"),
            DeviceState::Unplugged => write!(f, "UNPLUGGED"),
            DeviceState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// String-typed properties read from an endpoint's property store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Full endpoint name, e.g. "Speakers (USB Audio Device)"
    FriendlyName,

    /// Short endpoint description, e.g. "Speakers"
    Description,

    /// Name of the physical adapter behind the endpoint
    InterfaceFriendlyName,
}

/// One device's worth of a snapshot. `None` fields could not be retrieved
/// and render as empty values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRecord {
    pub index: u32,
    pub id: Option<String>,
    pub state: DeviceState,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub interface_name: Option<String>,
}

impl EndpointRecord {
    /// A record for a device that could not be opened at all; the line
    /// still appears in the report with every field empty.
    pub fn empty(index: u32) -> Self {
        Self {
            index,
            id: None,
            state: DeviceState::Unknown,
            friendly_name: None,
            description: None,
            interface_name: None,
        }
    }
}

/// Failures that abort the whole enumeration pass: no report is produced.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("audio subsystem initialization failed: {0}")]
    SubsystemInit(String),

    #[error("device collection unavailable: {0}")]
    CollectionUnavailable(String),
}

/// Failure scoped to a single device or a single field within a device.
/// Never aborts the pass; the affected field(s) render as absent.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FieldError(pub String);
