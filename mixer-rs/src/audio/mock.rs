//! Mock audio platform for testing without hardware.
//!
//! Endpoints live in shared memory so writes made through one session are
//! visible to the next, the way the OS behaves. Individual platform calls
//! can be made to fail, and session open/close counts are recorded.
//!
//! # Example
//!
//! ```
//! use mixer_rs::audio::mock::{MockEndpoint, MockPlatform};
//! use mixer_rs::{AudioService, DeviceType};
//!
//! let platform = MockPlatform::new(vec![
//!     MockEndpoint::output("spk", "Speakers"),
//!     MockEndpoint::input("mic", "Microphone"),
//! ]);
//! let service = AudioService::new(platform.clone());
//!
//! let inputs = service.list_devices(DeviceType::Input).unwrap();
//! assert_eq!(inputs.len(), 1);
//! assert_eq!(platform.sessions_closed(), 1);
//! ```

use super::device::{DataFlow, DeviceProperty, PlatformError};
use super::session::{AudioEndpoint, AudioPlatform, AudioSession, EndpointVolume};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const E_FAIL: u32 = 0x8000_4005;

/// State of one simulated endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MockEndpoint {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Raw data flow code reported by the endpoint
    pub data_flow: u32,
    pub volume: f32,
    pub mute: bool,
    /// Inactive endpoints are never enumerated
    pub active: bool,
}

impl MockEndpoint {
    fn new(id: &str, name: &str, flow: DataFlow) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: name.to_string(),
            data_flow: flow as u32,
            volume: 1.0,
            mute: false,
            active: true,
        }
    }

    /// An active render endpoint at full volume.
    pub fn output(id: &str, name: &str) -> Self {
        Self::new(id, name, DataFlow::Render)
    }

    /// An active capture endpoint at full volume.
    pub fn input(id: &str, name: &str) -> Self {
        Self::new(id, name, DataFlow::Capture)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Override the raw data flow code, e.g. to simulate a bad driver.
    pub fn with_data_flow(mut self, code: u32) -> Self {
        self.data_flow = code;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    fn matches(&self, flow: DataFlow) -> bool {
        flow == DataFlow::All || self.data_flow == flow as u32
    }
}

/// Platform calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    SessionInit,
    Enumerate,
    ReadId,
    ReadDataFlow,
    ReadProperty,
    ActivateVolume,
    GetVolume,
    GetMute,
    SetVolume,
    SetMute,
}

#[derive(Debug, Default)]
struct MockState {
    endpoints: Vec<MockEndpoint>,
    failures: HashSet<MockOperation>,
    sessions_opened: usize,
    sessions_closed: usize,
    writes: usize,
}

impl MockState {
    fn check(&self, op: MockOperation) -> Result<(), PlatformError> {
        if self.failures.contains(&op) {
            Err(PlatformError::new(E_FAIL, format!("injected {op:?} failure")))
        } else {
            Ok(())
        }
    }
}

type SharedState = Arc<Mutex<MockState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory audio platform. Clones share the same endpoints.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    state: SharedState,
}

impl MockPlatform {
    pub fn new(endpoints: Vec<MockEndpoint>) -> Self {
        let state = MockState {
            endpoints,
            ..MockState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Make every subsequent call of `op` fail.
    pub fn fail_on(&self, op: MockOperation) {
        lock(&self.state).failures.insert(op);
    }

    pub fn clear_failures(&self) {
        lock(&self.state).failures.clear();
    }

    /// Current state of the endpoint with `id`, if any.
    pub fn endpoint(&self, id: &str) -> Option<MockEndpoint> {
        lock(&self.state)
            .endpoints
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    pub fn sessions_opened(&self) -> usize {
        lock(&self.state).sessions_opened
    }

    pub fn sessions_closed(&self) -> usize {
        lock(&self.state).sessions_closed
    }

    /// Number of successful volume or mute writes.
    pub fn writes(&self) -> usize {
        lock(&self.state).writes
    }
}

impl AudioPlatform for MockPlatform {
    type Session = MockSession;

    fn open_session(&self) -> Result<MockSession, PlatformError> {
        let mut state = lock(&self.state);
        state.check(MockOperation::SessionInit)?;
        state.sessions_opened += 1;

        Ok(MockSession {
            state: Arc::clone(&self.state),
        })
    }
}

/// Session over a [`MockPlatform`]. Records its close on drop.
#[derive(Debug)]
pub struct MockSession {
    state: SharedState,
}

impl AudioSession for MockSession {
    type Endpoint = MockEndpointHandle;

    fn endpoints(&self, flow: DataFlow) -> Result<Vec<MockEndpointHandle>, PlatformError> {
        let state = lock(&self.state);
        state.check(MockOperation::Enumerate)?;

        Ok(state
            .endpoints
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active && e.matches(flow))
            .map(|(index, _)| MockEndpointHandle {
                index,
                state: Arc::clone(&self.state),
            })
            .collect())
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        lock(&self.state).sessions_closed += 1;
    }
}

/// Handle to one endpoint of a [`MockPlatform`].
#[derive(Debug)]
pub struct MockEndpointHandle {
    index: usize,
    state: SharedState,
}

impl MockEndpointHandle {
    fn read<T>(
        &self,
        op: MockOperation,
        f: impl FnOnce(&MockEndpoint) -> T,
    ) -> Result<T, PlatformError> {
        let state = lock(&self.state);
        state.check(op)?;
        Ok(f(&state.endpoints[self.index]))
    }

    fn write(
        &self,
        op: MockOperation,
        f: impl FnOnce(&mut MockEndpoint),
    ) -> Result<(), PlatformError> {
        let mut state = lock(&self.state);
        state.check(op)?;
        f(&mut state.endpoints[self.index]);
        state.writes += 1;
        Ok(())
    }
}

impl AudioEndpoint for MockEndpointHandle {
    type Volume = MockVolume;

    fn id(&self) -> Result<String, PlatformError> {
        self.read(MockOperation::ReadId, |e| e.id.clone())
    }

    fn data_flow(&self) -> Result<u32, PlatformError> {
        self.read(MockOperation::ReadDataFlow, |e| e.data_flow)
    }

    fn property(&self, key: DeviceProperty) -> Result<String, PlatformError> {
        self.read(MockOperation::ReadProperty, |e| match key {
            DeviceProperty::FriendlyName => e.name.clone(),
            DeviceProperty::Description => e.description.clone(),
        })
    }

    fn volume(&self) -> Result<MockVolume, PlatformError> {
        lock(&self.state).check(MockOperation::ActivateVolume)?;
        Ok(MockVolume {
            endpoint: MockEndpointHandle {
                index: self.index,
                state: Arc::clone(&self.state),
            },
        })
    }
}

/// Volume control of one mock endpoint.
#[derive(Debug)]
pub struct MockVolume {
    endpoint: MockEndpointHandle,
}

impl EndpointVolume for MockVolume {
    fn level(&self) -> Result<f32, PlatformError> {
        self.endpoint.read(MockOperation::GetVolume, |e| e.volume)
    }

    fn set_level(&self, level: f32) -> Result<(), PlatformError> {
        self.endpoint
            .write(MockOperation::SetVolume, |e| e.volume = level)
    }

    fn is_muted(&self) -> Result<bool, PlatformError> {
        self.endpoint.read(MockOperation::GetMute, |e| e.mute)
    }

    fn set_muted(&self, muted: bool) -> Result<(), PlatformError> {
        self.endpoint.write(MockOperation::SetMute, |e| e.mute = muted)
    }
}
