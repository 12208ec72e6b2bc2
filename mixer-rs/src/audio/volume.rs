//! Volume control using IAudioEndpointVolume.
//!
//! Provides volume and mute control for audio devices.

use super::device::PlatformError;
use super::session::EndpointVolume;
use windows::Win32::Media::Audio::{Endpoints::IAudioEndpointVolume, IMMDevice};
use windows::Win32::System::Com::CLSCTX_ALL;

/// Volume controller for a specific device.
pub struct VolumeController {
    endpoint_volume: IAudioEndpointVolume,
}

impl VolumeController {
    /// Create a new VolumeController for the given device.
    pub fn new(device: &IMMDevice) -> Result<Self, PlatformError> {
        unsafe {
            let endpoint_volume: IAudioEndpointVolume = device.Activate(CLSCTX_ALL, None)?;
            Ok(Self { endpoint_volume })
        }
    }
}

impl EndpointVolume for VolumeController {
    fn level(&self) -> Result<f32, PlatformError> {
        unsafe { Ok(self.endpoint_volume.GetMasterVolumeLevelScalar()?) }
    }

    /// The level is passed to Windows as given; range checks happen upstream.
    fn set_level(&self, level: f32) -> Result<(), PlatformError> {
        unsafe {
            self.endpoint_volume
                .SetMasterVolumeLevelScalar(level, std::ptr::null())?;
        }
        Ok(())
    }

    fn is_muted(&self) -> Result<bool, PlatformError> {
        unsafe { Ok(self.endpoint_volume.GetMute()?.as_bool()) }
    }

    fn set_muted(&self, muted: bool) -> Result<(), PlatformError> {
        unsafe {
            self.endpoint_volume.SetMute(muted, std::ptr::null())?;
        }
        Ok(())
    }
}
