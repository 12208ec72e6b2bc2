//! Audio module for Windows Core Audio API interactions.
//!
//! This module provides endpoint enumeration, property reads, and
//! volume/mute control behind a platform abstraction.

pub mod device;
pub mod enumerator;
pub mod mock;
pub mod reader;
pub mod service;
pub mod session;
pub mod writer;

#[cfg(not(windows))]
pub mod unsupported;
#[cfg(windows)]
pub mod volume;
#[cfg(windows)]
pub mod wasapi;

pub use device::{
    AudioError, DataFlow, Device, DeviceProperty, DeviceType, DeviceUpdate, ErrorKind,
    PlatformError,
};
pub use service::AudioService;
pub use session::{AudioEndpoint, AudioPlatform, AudioSession, EndpointVolume};

/// The audio platform of the target OS.
#[cfg(windows)]
pub type SystemPlatform = wasapi::WasapiPlatform;

/// The audio platform of the target OS.
#[cfg(not(windows))]
pub type SystemPlatform = unsupported::UnsupportedPlatform;
