//! Applies a [`DeviceUpdate`] to a live endpoint.

use super::device::{AudioError, DeviceUpdate};
use super::session::{AudioEndpoint, EndpointVolume};

/// Write the fields present in `update`, volume before mute.
///
/// The volume is expected to be validated already and is passed through
/// unchanged.
pub fn apply_update<E: AudioEndpoint>(
    endpoint: &E,
    update: &DeviceUpdate,
) -> Result<(), AudioError> {
    if update.is_empty() {
        return Ok(());
    }

    let volume = endpoint
        .volume()
        .map_err(AudioError::write("volume control"))?;

    if let Some(level) = update.volume {
        volume
            .set_level(level)
            .map_err(AudioError::write("volume"))?;
    }

    if let Some(muted) = update.mute {
        volume.set_muted(muted).map_err(AudioError::write("mute"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::{MockEndpoint, MockOperation, MockPlatform};
    use crate::audio::session::{AudioPlatform, AudioSession};
    use crate::audio::DataFlow;

    fn apply(platform: &MockPlatform, update: DeviceUpdate) -> Result<(), AudioError> {
        let session = platform.open_session().unwrap();
        let endpoints = session.endpoints(DataFlow::All).unwrap();
        apply_update(&endpoints[0], &update)
    }

    #[test]
    fn test_apply_both_fields() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);

        apply(
            &platform,
            DeviceUpdate {
                volume: Some(0.3),
                mute: Some(true),
            },
        )
        .unwrap();

        let state = platform.endpoint("spk").unwrap();
        assert_eq!(state.volume, 0.3);
        assert!(state.mute);
    }

    #[test]
    fn test_empty_update_touches_nothing() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);
        platform.fail_on(MockOperation::ActivateVolume);

        apply(&platform, DeviceUpdate::default()).unwrap();
        assert_eq!(platform.writes(), 0);
    }

    #[test]
    fn test_volume_failure_stops_before_mute() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);
        platform.fail_on(MockOperation::SetVolume);

        let err = apply(
            &platform,
            DeviceUpdate {
                volume: Some(0.3),
                mute: Some(true),
            },
        )
        .unwrap_err();

        assert!(matches!(err, AudioError::WriteFailed { field: "volume", .. }));
        assert!(!platform.endpoint("spk").unwrap().mute);
    }

    #[test]
    fn test_mute_failure() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);
        platform.fail_on(MockOperation::SetMute);

        let err = apply(&platform, DeviceUpdate::mute(true)).unwrap_err();
        assert!(matches!(err, AudioError::WriteFailed { field: "mute", .. }));
    }
}
