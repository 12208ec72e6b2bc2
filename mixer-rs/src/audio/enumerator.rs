//! Endpoint enumeration and lookup by ID.

use super::device::{AudioError, DeviceType};
use super::session::{AudioEndpoint, AudioSession};

/// Get all active endpoints passing `filter`.
///
/// An empty collection is not an error.
pub fn list_endpoints<S: AudioSession>(
    session: &S,
    filter: DeviceType,
) -> Result<Vec<S::Endpoint>, AudioError> {
    let endpoints = session
        .endpoints(filter.data_flow())
        .map_err(AudioError::EnumerationFailed)?;

    tracing::debug!(filter = %filter, count = endpoints.len(), "enumerated endpoints");
    Ok(endpoints)
}

/// Find an active endpoint by its platform ID.
///
/// Scans every active endpoint in both directions.
pub fn find_endpoint<S: AudioSession>(
    session: &S,
    device_id: &str,
) -> Result<S::Endpoint, AudioError> {
    for endpoint in list_endpoints(session, DeviceType::All)? {
        let id = endpoint.id().map_err(AudioError::read("id"))?;
        if id == device_id {
            return Ok(endpoint);
        }
    }

    Err(AudioError::DeviceNotFound {
        device_id: device_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::{MockEndpoint, MockOperation, MockPlatform};
    use crate::audio::session::AudioPlatform;
    use crate::audio::ErrorKind;

    fn platform() -> MockPlatform {
        MockPlatform::new(vec![
            MockEndpoint::output("spk", "Speakers"),
            MockEndpoint::input("mic", "Microphone"),
            MockEndpoint::output("hdmi", "HDMI Output"),
        ])
    }

    fn ids<E: AudioEndpoint>(endpoints: &[E]) -> Vec<String> {
        endpoints.iter().map(|e| e.id().unwrap()).collect()
    }

    #[test]
    fn test_list_by_direction() {
        let platform = platform();
        let session = platform.open_session().unwrap();

        let outputs = list_endpoints(&session, DeviceType::Output).unwrap();
        assert_eq!(ids(&outputs), vec!["spk", "hdmi"]);

        let inputs = list_endpoints(&session, DeviceType::Input).unwrap();
        assert_eq!(ids(&inputs), vec!["mic"]);

        let all = list_endpoints(&session, DeviceType::All).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_list_empty_is_ok() {
        let platform = MockPlatform::new(vec![MockEndpoint::output("spk", "Speakers")]);
        let session = platform.open_session().unwrap();

        let inputs = list_endpoints(&session, DeviceType::Input).unwrap();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_list_skips_inactive() {
        let platform = MockPlatform::new(vec![
            MockEndpoint::output("spk", "Speakers"),
            MockEndpoint::output("old", "Unplugged").inactive(),
        ]);
        let session = platform.open_session().unwrap();

        let all = list_endpoints(&session, DeviceType::All).unwrap();
        assert_eq!(ids(&all), vec!["spk"]);
    }

    #[test]
    fn test_enumeration_failure() {
        let platform = platform();
        platform.fail_on(MockOperation::Enumerate);
        let session = platform.open_session().unwrap();

        let err = list_endpoints(&session, DeviceType::All).unwrap_err();
        assert!(matches!(err, AudioError::EnumerationFailed(_)));
        assert_eq!(err.kind(), ErrorKind::Platform);
    }

    #[test]
    fn test_find_endpoint() {
        let platform = platform();
        let session = platform.open_session().unwrap();

        let found = find_endpoint(&session, "mic").unwrap();
        assert_eq!(found.id().unwrap(), "mic");
    }

    #[test]
    fn test_find_missing_endpoint() {
        let platform = platform();
        let session = platform.open_session().unwrap();

        let err = find_endpoint(&session, "nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("\"nope\""));
    }
}
