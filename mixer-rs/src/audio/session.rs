//! Platform audio session abstraction.
//!
//! A session is the per-operation connection to the OS audio subsystem.
//! Endpoints handed out by a session are owned by the caller and must be
//! dropped before the session is.

use super::device::{AudioError, DataFlow, DeviceProperty, PlatformError};

/// Entry point to an OS audio subsystem.
pub trait AudioPlatform: Send + Sync {
    type Session: AudioSession;

    /// Initialize the audio subsystem for the current thread.
    ///
    /// Teardown happens when the returned session is dropped.
    fn open_session(&self) -> Result<Self::Session, PlatformError>;
}

/// An open connection to the audio subsystem.
pub trait AudioSession {
    type Endpoint: AudioEndpoint;

    /// All active endpoints for the given direction, in platform order.
    fn endpoints(&self, flow: DataFlow) -> Result<Vec<Self::Endpoint>, PlatformError>;
}

/// Raw handle to one endpoint device.
pub trait AudioEndpoint {
    type Volume: EndpointVolume;

    fn id(&self) -> Result<String, PlatformError>;

    /// Raw data flow code as reported by the platform.
    fn data_flow(&self) -> Result<u32, PlatformError>;

    fn property(&self, key: DeviceProperty) -> Result<String, PlatformError>;

    /// Activate the endpoint's master volume control.
    fn volume(&self) -> Result<Self::Volume, PlatformError>;
}

/// Master volume and mute control for one endpoint.
pub trait EndpointVolume {
    /// Scalar volume (0.0 to 1.0).
    fn level(&self) -> Result<f32, PlatformError>;

    fn set_level(&self, level: f32) -> Result<(), PlatformError>;

    fn is_muted(&self) -> Result<bool, PlatformError>;

    fn set_muted(&self, muted: bool) -> Result<(), PlatformError>;
}

/// Run `f` inside a freshly opened session.
///
/// The session is dropped on every exit path, including unwinding.
pub fn with_session<P, T, F>(platform: &P, f: F) -> Result<T, AudioError>
where
    P: AudioPlatform,
    F: FnOnce(&P::Session) -> Result<T, AudioError>,
{
    let session = platform
        .open_session()
        .map_err(AudioError::SessionInitFailed)?;
    tracing::trace!("audio session opened");

    let result = f(&session);

    drop(session);
    tracing::trace!("audio session closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::{MockEndpoint, MockOperation, MockPlatform};
    use crate::audio::ErrorKind;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn test_session_closed_after_success() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);

        let count = with_session(&platform, |session| {
            Ok(session.endpoints(DataFlow::All).unwrap().len())
        })
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(platform.sessions_opened(), 1);
        assert_eq!(platform.sessions_closed(), 1);
    }

    #[test]
    fn test_session_closed_after_error() {
        let platform = MockPlatform::new(vec![]);

        let result: Result<(), _> = with_session(&platform, |_| {
            Err(AudioError::DeviceNotFound {
                device_id: "x".to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(platform.sessions_closed(), 1);
    }

    #[test]
    fn test_session_closed_after_panic() {
        let platform = MockPlatform::new(vec![]);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _: Result<(), AudioError> = with_session(&platform, |_| panic!("boom"));
        }));

        assert!(outcome.is_err());
        assert_eq!(platform.sessions_opened(), 1);
        assert_eq!(platform.sessions_closed(), 1);
    }

    #[test]
    fn test_init_failure_skips_operation() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);
        platform.fail_on(MockOperation::SessionInit);

        let mut called = false;
        let err = with_session(&platform, |_| {
            called = true;
            Ok(())
        })
        .unwrap_err();

        assert!(!called);
        assert_eq!(err.kind(), ErrorKind::Platform);
        assert!(err.to_string().starts_with("session init failed"));
        assert_eq!(platform.sessions_opened(), 0);
    }
}
