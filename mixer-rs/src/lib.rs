//! Audio Endpoint Mixer - Library
//!
//! Lists the audio endpoint devices of the host and reads or updates their
//! volume and mute state.
//!
//! ## Features
//!
//! - List active output and input devices, or both
//! - Read a single device by its Windows endpoint ID
//! - Set volume and/or mute, confirmed by re-reading the device
//! - One COM session per operation, torn down on every exit path

pub mod audio;

pub use audio::{
    AudioError, AudioService, Device, DeviceType, DeviceUpdate, ErrorKind, PlatformError,
    SystemPlatform,
};

/// Service over the current OS's audio platform.
pub fn system_service() -> AudioService<SystemPlatform> {
    AudioService::new(SystemPlatform::default())
}
