pub mod adapters;
pub mod traits;

#[cfg(windows)]
pub mod wasapi;

#[cfg(not(windows))]
pub mod unsupported;

// Mock implementations for testing
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// Re-export traits and adapters for easy access
pub use adapters::*;
pub use traits::*;

// Re-export mocks when testing
#[cfg(any(test, feature = "test-mocks"))]
pub use mocks::*;

use crate::audio::PassError;

/// Build the device source for the current platform. Only Windows has a
/// real backend; elsewhere the source fails the pass cleanly.
#[cfg(windows)]
pub fn native_source() -> Result<impl DeviceSource, PassError> {
    wasapi::WasapiDeviceSource::new()
}

#[cfg(not(windows))]
pub fn native_source() -> Result<impl DeviceSource, PassError> {
    Ok(unsupported::UnsupportedDeviceSource)
}
