//! Fallback platform for operating systems without a backend.

use super::device::{DataFlow, DeviceProperty, PlatformError};
use super::session::{AudioEndpoint, AudioPlatform, AudioSession, EndpointVolume};
use std::convert::Infallible;

// E_NOTIMPL
const NOT_IMPLEMENTED: u32 = 0x8000_4001;

/// Platform whose sessions can never be opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl AudioPlatform for UnsupportedPlatform {
    type Session = Never;

    fn open_session(&self) -> Result<Never, PlatformError> {
        Err(PlatformError::new(
            NOT_IMPLEMENTED,
            format!(
                "audio endpoints are not supported on {}",
                std::env::consts::OS
            ),
        ))
    }
}

/// Uninhabited session, endpoint and volume type.
#[derive(Debug)]
pub struct Never(Infallible);

impl AudioSession for Never {
    type Endpoint = Never;

    fn endpoints(&self, _flow: DataFlow) -> Result<Vec<Never>, PlatformError> {
        match self.0 {}
    }
}

impl AudioEndpoint for Never {
    type Volume = Never;

    fn id(&self) -> Result<String, PlatformError> {
        match self.0 {}
    }

    fn data_flow(&self) -> Result<u32, PlatformError> {
        match self.0 {}
    }

    fn property(&self, _key: DeviceProperty) -> Result<String, PlatformError> {
        match self.0 {}
    }

    fn volume(&self) -> Result<Never, PlatformError> {
        match self.0 {}
    }
}

impl EndpointVolume for Never {
    fn level(&self) -> Result<f32, PlatformError> {
        match self.0 {}
    }

    fn set_level(&self, _level: f32) -> Result<(), PlatformError> {
        match self.0 {}
    }

    fn is_muted(&self) -> Result<bool, PlatformError> {
        match self.0 {}
    }

    fn set_muted(&self, _muted: bool) -> Result<(), PlatformError> {
        match self.0 {}
    }
}
