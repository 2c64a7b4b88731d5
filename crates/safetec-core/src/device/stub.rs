//! Scripted transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::DeviceError;

use super::transport::Transport;

/// Replays canned bodies per path and records every request in order.
///
/// Paths without a script fail as if the device were offline.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<String, Result<String, DeviceError>>>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`.
    pub fn reply(self, path: &str, body: &str) -> Self {
        self.set(path, Ok(body.to_string()));
        self
    }

    /// Answer a read of `mnemonic` with `{"get<M>":"<value>"}`.
    pub fn value(self, mnemonic: &str, value: &str) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(format!("get{}", mnemonic), value.into());
        let body = serde_json::Value::Object(map).to_string();
        self.reply(&format!("get/{}", mnemonic), &body)
    }

    /// Fail `path` with an offline error.
    pub fn fail(self, path: &str) -> Self {
        self.set(
            path,
            Err(DeviceError::Offline {
                host: "stub".to_string(),
                message: "scripted failure".to_string(),
            }),
        );
        self
    }

    /// Change the reply for `path` after construction.
    pub fn set(&self, path: &str, reply: Result<String, DeviceError>) {
        self.replies
            .lock()
            .expect("stub lock poisoned")
            .insert(path.to_string(), reply);
    }

    /// Every path requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("stub lock poisoned").clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }
}

impl Transport for StubTransport {
    fn host(&self) -> &str {
        "stub"
    }

    async fn send(&self, path: &str) -> Result<String, DeviceError> {
        self.requests
            .lock()
            .expect("stub lock poisoned")
            .push(path.to_string());
        self.replies
            .lock()
            .expect("stub lock poisoned")
            .get(path)
            .cloned()
            .unwrap_or_else(|| {
                Err(DeviceError::Offline {
                    host: "stub".to_string(),
                    message: format!("no reply scripted for {}", path),
                })
            })
    }
}
