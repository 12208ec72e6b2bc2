//! Audio device data models.
//!
//! Defines the flat device record returned by every read, the partial
//! update request, the direction filter, and the error types shared by
//! all audio operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of an audio endpoint, or `All` when used as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Render endpoints (speakers, headphones)
    Output,

    /// Capture endpoints (microphones, line in)
    Input,

    /// Both directions. Only meaningful as a filter.
    #[default]
    All,
}

impl DeviceType {
    /// Parse a filter value, accepting exactly `output`, `input` or `all`.
    pub fn validate(value: &str) -> Result<Self, AudioError> {
        match value {
            "output" => Ok(DeviceType::Output),
            "input" => Ok(DeviceType::Input),
            "all" => Ok(DeviceType::All),
            other => Err(AudioError::InvalidDeviceType(other.to_string())),
        }
    }

    /// Native direction code used to query the platform.
    pub fn data_flow(self) -> DataFlow {
        match self {
            DeviceType::Output => DataFlow::Render,
            DeviceType::Input => DataFlow::Capture,
            DeviceType::All => DataFlow::All,
        }
    }

    /// Decode the data flow a device reports about itself.
    ///
    /// Only render and capture are valid here; a device never reports the
    /// combined code, so anything else is a platform error.
    pub fn from_data_flow(code: u32) -> Result<Self, AudioError> {
        match code {
            c if c == DataFlow::Render as u32 => Ok(DeviceType::Output),
            c if c == DataFlow::Capture as u32 => Ok(DeviceType::Input),
            other => Err(AudioError::UnknownDataFlow(other)),
        }
    }

    /// True if a device of type `other` passes this filter.
    pub fn matches(self, other: DeviceType) -> bool {
        self == DeviceType::All || self == other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Output => "output",
            DeviceType::Input => "input",
            DeviceType::All => "all",
        }
    }
}

impl FromStr for DeviceType {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native endpoint direction (maps to Windows EDataFlow enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DataFlow {
    Render = 0,
    Capture = 1,
    All = 2,
}

/// String properties read from an endpoint's property store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceProperty {
    /// Full display name, e.g. "Speakers (Realtek High Definition Audio)"
    FriendlyName,

    /// Short device description, e.g. "Speakers"
    Description,
}

/// Snapshot of an audio endpoint, read fresh from the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique Windows device ID (opaque string from IMMDevice::GetId)
    pub id: String,

    /// Friendly name from the device property store
    pub name: String,

    /// Device description from the device property store
    pub description: String,

    /// Master volume level as scalar (0.0 to 1.0)
    pub volume: f32,

    /// Output or input, never `All`
    #[serde(rename = "type")]
    pub device_type: DeviceType,

    pub mute: bool,
}

/// Partial update. Absent fields leave the device untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
}

impl DeviceUpdate {
    pub fn volume(level: f32) -> Self {
        Self {
            volume: Some(level),
            mute: None,
        }
    }

    pub fn mute(muted: bool) -> Self {
        Self {
            volume: None,
            mute: Some(muted),
        }
    }

    /// Check the volume range before the update reaches a device.
    pub fn validate(&self) -> Result<(), AudioError> {
        match self.volume {
            Some(level) if !(0.0..=1.0).contains(&level) => {
                Err(AudioError::VolumeOutOfRange(level))
            }
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.volume.is_none() && self.mute.is_none()
    }
}

/// Failure reported by the platform audio API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (0x{code:08X})")]
pub struct PlatformError {
    /// Native status code (HRESULT on Windows)
    pub code: u32,

    pub message: String,
}

impl PlatformError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        Self {
            code: err.code().0 as u32,
            message: err.message(),
        }
    }
}

/// Broad category of an [`AudioError`], used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Platform,
}

/// Audio service error types.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    #[error("invalid device type \"{0}\"")]
    InvalidDeviceType(String),

    #[error("volume {0} is outside the range 0.0 to 1.0")]
    VolumeOutOfRange(f32),

    #[error("device with id \"{device_id}\" not found")]
    DeviceNotFound { device_id: String },

    #[error("session init failed: {0}")]
    SessionInitFailed(#[source] PlatformError),

    #[error("failed to enumerate devices: {0}")]
    EnumerationFailed(#[source] PlatformError),

    #[error("unknown data flow ({0})")]
    UnknownDataFlow(u32),

    #[error("failed to read device {field}: {source}")]
    ReadFailed {
        field: &'static str,
        #[source]
        source: PlatformError,
    },

    #[error("failed to set device {field}: {source}")]
    WriteFailed {
        field: &'static str,
        #[source]
        source: PlatformError,
    },
}

impl AudioError {
    pub fn read(field: &'static str) -> impl FnOnce(PlatformError) -> Self {
        move |source| AudioError::ReadFailed { field, source }
    }

    pub fn write(field: &'static str) -> impl FnOnce(PlatformError) -> Self {
        move |source| AudioError::WriteFailed { field, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AudioError::InvalidDeviceType(_) | AudioError::VolumeOutOfRange(_) => {
                ErrorKind::InvalidArgument
            }
            AudioError::DeviceNotFound { .. } => ErrorKind::NotFound,
            AudioError::SessionInitFailed(_)
            | AudioError::EnumerationFailed(_)
            | AudioError::UnknownDataFlow(_)
            | AudioError::ReadFailed { .. }
            | AudioError::WriteFailed { .. } => ErrorKind::Platform,
        }
    }
}
