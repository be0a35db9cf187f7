pub mod audio;
pub mod config;
pub mod report;
pub mod system;

pub use audio::{DeviceState, EndpointRecord, EndpointSnapshot, PropertyKey};
pub use config::Config;
pub use report::{ReportRenderer, Verbosity};
