//! HTTP transport to the device.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::ClientConfig;
use crate::error::{CoreError, DeviceError};

/// Issues exactly one request per call and returns the raw body.
///
/// Connect errors, timeouts and non-200 statuses all come back as a
/// [`DeviceError`]; there are no retries.
pub trait Transport: Send + Sync {
    /// Host name used in error messages.
    fn host(&self) -> &str;

    /// Send a GET for `path` (relative to `/safe-tec/`).
    fn send(&self, path: &str) -> impl Future<Output = Result<String, DeviceError>> + Send;
}

/// Transport backed by a `reqwest` client.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    host: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = build_client(config.timeout)?;
        Ok(Self::with_client(client, config))
    }

    /// Use an already configured client.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url(),
            host: config.host.clone(),
        }
    }

    fn offline(&self, message: String) -> DeviceError {
        DeviceError::Offline {
            host: self.host.clone(),
            message,
        }
    }
}

fn build_client(timeout: Duration) -> Result<Client, CoreError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CoreError::Other(format!("HTTP client error: {}", e)))
}

impl Transport for HttpTransport {
    fn host(&self) -> &str {
        &self.host
    }

    async fn send(&self, path: &str) -> Result<String, DeviceError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "sending request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            self.offline(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%url, %status, "unexpected status");
            return Err(DeviceError::HttpStatus {
                host: self.host.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.offline(format!("failed to read body: {}", e)))
    }
}
