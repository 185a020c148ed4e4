//! Scripted in-memory connection for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::platform::connection::CliConnection;
use crate::platform::error::TransportError;

#[derive(Default)]
struct State {
    responses: HashMap<String, Result<String, String>>,
    calls: Vec<String>,
    targets: Vec<(String, String)>,
    target_failure: Option<String>,
}

/// Answers `curl` from a path → body table and records every call.
/// Clones share state, so a test can keep one handle for assertions.
#[derive(Clone, Default)]
pub struct FakeConnection {
    state: Arc<Mutex<State>>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, body: impl Into<String>) -> Self {
        self.state.lock().unwrap().responses.insert(path.to_string(), Ok(body.into()));
        self
    }

    pub fn fail(self, path: &str, message: &str) -> Self {
        self.state.lock().unwrap().responses.insert(path.to_string(), Err(message.to_string()));
        self
    }

    /// Make every `target` call fail with `message`.
    pub fn fail_target(self, message: &str) -> Self {
        self.state.lock().unwrap().target_failure = Some(message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| c.as_str() == path).count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn targets(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().targets.clone()
    }
}

#[async_trait]
impl CliConnection for FakeConnection {
    async fn curl(&self, path: &str) -> Result<String, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(path.to_string());
        match state.responses.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(TransportError::Other(message.clone())),
            None => Err(TransportError::Other(format!("no response scripted for {}", path))),
        }
    }

    async fn target(&self, org: &str, space: &str) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.target_failure {
            return Err(TransportError::Other(message.clone()));
        }
        state.targets.push((org.to_string(), space.to_string()));
        Ok(())
    }
}
