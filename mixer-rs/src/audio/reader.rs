//! Converts a raw endpoint into a [`Device`] record.

use super::device::{AudioError, Device, DeviceProperty, DeviceType};
use super::session::{AudioEndpoint, EndpointVolume};

/// Read every field of `endpoint`.
///
/// Fails as a whole if any single read fails.
pub fn read_device<E: AudioEndpoint>(endpoint: &E) -> Result<Device, AudioError> {
    let id = endpoint.id().map_err(AudioError::read("id"))?;

    let flow = endpoint
        .data_flow()
        .map_err(AudioError::read("data flow"))?;
    let device_type = DeviceType::from_data_flow(flow)?;

    let name = endpoint
        .property(DeviceProperty::FriendlyName)
        .map_err(AudioError::read("name"))?;
    let description = endpoint
        .property(DeviceProperty::Description)
        .map_err(AudioError::read("description"))?;

    let volume = endpoint
        .volume()
        .map_err(AudioError::read("volume control"))?;
    let level = volume.level().map_err(AudioError::read("volume"))?;
    let mute = volume.is_muted().map_err(AudioError::read("mute"))?;

    Ok(Device {
        id,
        name,
        description,
        volume: level,
        device_type,
        mute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::{MockEndpoint, MockOperation, MockPlatform};
    use crate::audio::session::{AudioPlatform, AudioSession};
    use crate::audio::{DataFlow, ErrorKind};

    fn read_first(platform: &MockPlatform) -> Result<Device, AudioError> {
        let session = platform.open_session().unwrap();
        let endpoints = session.endpoints(DataFlow::All).unwrap();
        read_device(&endpoints[0])
    }

    #[test]
    fn test_read_all_fields() {
        let platform = MockPlatform::new(vec![MockEndpoint::input("mic", "Microphone (USB)")
            .with_description("Microphone")
            .with_volume(0.25)
            .with_mute(true)]);

        let device = read_first(&platform).unwrap();
        assert_eq!(
            device,
            Device {
                id: "mic".to_string(),
                name: "Microphone (USB)".to_string(),
                description: "Microphone".to_string(),
                volume: 0.25,
                device_type: DeviceType::Input,
                mute: true,
            }
        );
    }

    #[test]
    fn test_unknown_data_flow_is_error() {
        let platform =
            MockPlatform::new(vec![MockEndpoint::output("odd", "Odd").with_data_flow(5)]);

        let err = read_first(&platform).unwrap_err();
        assert_eq!(err.to_string(), "unknown data flow (5)");
        assert_eq!(err.kind(), ErrorKind::Platform);
    }

    #[test]
    fn test_sub_read_failure_fails_read() {
        for op in [
            MockOperation::ReadId,
            MockOperation::ReadDataFlow,
            MockOperation::ReadProperty,
            MockOperation::ActivateVolume,
            MockOperation::GetVolume,
            MockOperation::GetMute,
        ] {
            let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);
            platform.fail_on(op);

            let err = read_first(&platform).unwrap_err();
            assert!(
                matches!(err, AudioError::ReadFailed { .. }),
                "{op:?} gave {err:?}"
            );
        }
    }
}
