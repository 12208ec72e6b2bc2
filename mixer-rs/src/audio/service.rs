//! Public list/get/update operations.
//!
//! Each operation runs in its own platform session; nothing is cached
//! between calls.

use super::device::{AudioError, Device, DeviceType, DeviceUpdate};
use super::enumerator::{find_endpoint, list_endpoints};
use super::reader::read_device;
use super::session::{with_session, AudioPlatform};
use super::writer::apply_update;

/// Audio device operations over a platform backend.
#[derive(Debug, Clone, Default)]
pub struct AudioService<P> {
    platform: P,
}

impl<P: AudioPlatform> AudioService<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Get all active devices passing `filter`.
    ///
    /// Fails as a whole if any single device cannot be read.
    pub fn list_devices(&self, filter: DeviceType) -> Result<Vec<Device>, AudioError> {
        with_session(&self.platform, |session| {
            list_endpoints(session, filter)?
                .iter()
                .map(read_device)
                .collect()
        })
    }

    /// Get a specific device by ID.
    pub fn get_device(&self, device_id: &str) -> Result<Device, AudioError> {
        with_session(&self.platform, |session| {
            let endpoint = find_endpoint(session, device_id)?;
            read_device(&endpoint)
        })
    }

    /// Apply `update` and return the device as re-read afterwards.
    ///
    /// `update` must already have passed [`DeviceUpdate::validate`].
    pub fn update_device(
        &self,
        device_id: &str,
        update: &DeviceUpdate,
    ) -> Result<Device, AudioError> {
        with_session(&self.platform, |session| {
            let endpoint = find_endpoint(session, device_id)?;
            apply_update(&endpoint, update)?;

            tracing::debug!(
                device_id,
                volume = ?update.volume,
                mute = ?update.mute,
                "applied device update"
            );
            read_device(&endpoint)
        })
    }
}
