//! Windows Core Audio backend using the MMDevice API.
//!
//! Provides COM initialization and endpoint access.

use super::device::{DataFlow, DeviceProperty, PlatformError};
use super::session::{AudioEndpoint, AudioPlatform, AudioSession};
use super::volume::VolumeController;
use std::marker::PhantomData;
use windows::core::{Interface, PWSTR};
use windows::Win32::Devices::Properties::{
    DEVPKEY_Device_DeviceDesc, DEVPKEY_Device_FriendlyName, DEVPROPKEY,
};
use windows::Win32::Foundation::E_UNEXPECTED;
use windows::Win32::Media::Audio::{
    eAll, eCapture, eRender, EDataFlow, IMMDevice, IMMDeviceEnumerator, IMMEndpoint,
    MMDeviceEnumerator, DEVICE_STATE_ACTIVE,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoTaskMemFree, CoUninitialize, CLSCTX_ALL,
    COINIT_APARTMENTTHREADED, STGM_READ,
};
use windows::Win32::UI::Shell::PropertiesSystem::{IPropertyStore, PROPERTYKEY};

/// COM initialization guard that uninitializes COM on drop.
///
/// COM state is per thread, so the guard is neither `Send` nor `Sync`.
pub struct ComGuard {
    _thread_bound: PhantomData<*const ()>,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, PlatformError> {
        unsafe {
            // Use apartment-threaded, same as the shell's audio settings
            CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;
        }
        Ok(Self {
            _thread_bound: PhantomData,
        })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            CoUninitialize();
        }
    }
}

/// The system audio platform on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasapiPlatform;

impl AudioPlatform for WasapiPlatform {
    type Session = WasapiSession;

    fn open_session(&self) -> Result<WasapiSession, PlatformError> {
        let com = ComGuard::new()?;

        let enumerator: IMMDeviceEnumerator =
            unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)? };

        Ok(WasapiSession {
            enumerator,
            _com: com,
        })
    }
}

/// COM session holding an IMMDeviceEnumerator.
pub struct WasapiSession {
    // Released before `_com` uninitializes COM (fields drop in order)
    enumerator: IMMDeviceEnumerator,
    _com: ComGuard,
}

impl AudioSession for WasapiSession {
    type Endpoint = WasapiEndpoint;

    fn endpoints(&self, flow: DataFlow) -> Result<Vec<WasapiEndpoint>, PlatformError> {
        let flow = match flow {
            DataFlow::Render => eRender,
            DataFlow::Capture => eCapture,
            DataFlow::All => eAll,
        };

        unsafe {
            let collection = self.enumerator.EnumAudioEndpoints(flow, DEVICE_STATE_ACTIVE)?;
            let count = collection.GetCount()?;

            let mut endpoints = Vec::with_capacity(count as usize);
            for i in 0..count {
                let device = collection.Item(i)?;
                endpoints.push(WasapiEndpoint { device });
            }

            Ok(endpoints)
        }
    }
}

/// One endpoint; the IMMDevice is released on drop.
pub struct WasapiEndpoint {
    device: IMMDevice,
}

impl WasapiEndpoint {
    fn open_properties(&self) -> Result<IPropertyStore, PlatformError> {
        Ok(unsafe { self.device.OpenPropertyStore(STGM_READ)? })
    }
}

impl AudioEndpoint for WasapiEndpoint {
    type Volume = VolumeController;

    fn id(&self) -> Result<String, PlatformError> {
        unsafe {
            let id: PWSTR = self.device.GetId()?;
            let result = id.to_string();
            CoTaskMemFree(Some(id.0 as *const _));

            result.map_err(|e| PlatformError::new(E_UNEXPECTED.0 as u32, e.to_string()))
        }
    }

    fn data_flow(&self) -> Result<u32, PlatformError> {
        unsafe {
            let endpoint: IMMEndpoint = self.device.cast()?;
            let flow: EDataFlow = endpoint.GetDataFlow()?;
            Ok(flow.0 as u32)
        }
    }

    fn property(&self, key: DeviceProperty) -> Result<String, PlatformError> {
        let key = match key {
            DeviceProperty::FriendlyName => property_key(&DEVPKEY_Device_FriendlyName),
            DeviceProperty::Description => property_key(&DEVPKEY_Device_DeviceDesc),
        };

        let props = self.open_properties()?;
        unsafe {
            let value = props.GetValue(&key)?;
            Ok(value.to_string())
        }
    }

    fn volume(&self) -> Result<VolumeController, PlatformError> {
        VolumeController::new(&self.device)
    }
}

// Endpoint property stores use the same keys as the device property set
fn property_key(key: &DEVPROPKEY) -> PROPERTYKEY {
    PROPERTYKEY {
        fmtid: key.fmtid,
        pid: key.pid,
    }
}
