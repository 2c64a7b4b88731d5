//! Command codec: read, write and clear a register over a [`Transport`].

use serde::Serialize;

use crate::error::DeviceError;
use crate::model::registers::{find_register, mnemonic};
use crate::protocol::commands::{Commands, Operation};
use crate::protocol::response::{parse_read_response, ParsedResponse, RegisterValue};

use super::reading::Reading;
use super::transport::Transport;

/// Identity reported by the startup probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub firmware: String,
    pub serial: String,
}

/// Client for a single device.
///
/// All operations are strictly sequential: each call issues its requests one
/// after another and waits for each reply (bounded by the transport timeout).
pub struct DeviceClient<T: Transport> {
    transport: T,
}

impl<T: Transport> DeviceClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read a register. The mnemonic is upper-cased before sending.
    pub async fn read(&self, mnemonic: &str) -> Result<RegisterValue, DeviceError> {
        check_catalog(mnemonic, Operation::Read);
        let body = self.transport.send(&Commands::read(mnemonic)).await?;
        parse_read_response(&body, &Commands::read_key(mnemonic), self.host())
    }

    /// Read a register, keeping a failure as a displayable [`Reading`].
    pub async fn reading(&self, mnemonic: &str) -> Reading {
        Reading::from(self.read(mnemonic).await)
    }

    /// Write a register. The decoded reply is returned as is.
    pub async fn write(
        &self,
        mnemonic: &str,
        parameter: Option<&str>,
    ) -> Result<ParsedResponse, DeviceError> {
        check_catalog(mnemonic, Operation::Write);
        let body = self
            .transport
            .send(&Commands::write(mnemonic, parameter))
            .await?;
        Ok(ParsedResponse::parse(&body))
    }

    /// Clear a register.
    pub async fn clear(&self, mnemonic: &str) -> Result<ParsedResponse, DeviceError> {
        check_catalog(mnemonic, Operation::Clear);
        let body = self.transport.send(&Commands::clear(mnemonic)).await?;
        Ok(ParsedResponse::parse(&body))
    }

    /// Liveness probe: firmware version, then serial number.
    ///
    /// Stops at the first failure, so an unreachable device sees exactly one
    /// request.
    pub async fn probe(&self) -> Result<DeviceInfo, DeviceError> {
        let firmware = self.read(mnemonic::FIRMWARE).await?;
        let serial = self.read(mnemonic::SERIAL).await?;
        tracing::info!(host = self.host(), %firmware, %serial, "device reachable");
        Ok(DeviceInfo {
            firmware: firmware.to_string(),
            serial: serial.to_string(),
        })
    }
}

/// Flag requests the catalog says a register does not accept. The request is
/// still sent; indexed profile registers are not in the catalog.
fn check_catalog(mnemonic: &str, op: Operation) {
    if let Some(register) = find_register(mnemonic) {
        if !register.supports(op) {
            tracing::warn!(mnemonic = register.mnemonic, %op, "register does not list this operation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::stub::StubTransport;

    #[tokio::test]
    async fn test_read_canonicalizes_mnemonic() {
        let stub = StubTransport::new().value("AVO", "1500mL");
        let client = DeviceClient::new(stub);

        let lower = client.read("avo").await.unwrap();
        let upper = client.read("AVO").await.unwrap();

        assert_eq!(lower, upper);
        assert_eq!(client.transport().requests(), vec!["get/AVO", "get/AVO"]);
    }

    #[tokio::test]
    async fn test_read_pressure_value() {
        let stub = StubTransport::new().reply("get/BAR", r#"{"getBAR":"1013 mbar"}"#);
        let client = DeviceClient::new(stub);

        let value = client.read("BAR").await.unwrap();
        assert_eq!(value.as_str(), "1013 mbar");
    }

    #[tokio::test]
    async fn test_read_absent_key() {
        let stub = StubTransport::new().reply("get/SRV", r#"{"getXXX":"1"}"#);
        let client = DeviceClient::new(stub);

        assert_eq!(client.read("srv").await.unwrap(), RegisterValue::Absent);
        assert_eq!(client.reading("srv").await.to_string(), "None");
    }

    #[tokio::test]
    async fn test_read_failure_is_error_token() {
        let client = DeviceClient::new(StubTransport::new().fail("get/BAR"));

        assert!(client.read("BAR").await.is_err());
        assert_eq!(client.reading("BAR").await.to_string(), "ERROR");
    }

    #[tokio::test]
    async fn test_write_and_clear_paths() {
        let stub = StubTransport::new()
            .reply("set/PRF/3", r#"{"setPRF3":"OK"}"#)
            .reply("clr/ALA", r#"{"setALA":"OK"}"#);
        let client = DeviceClient::new(stub);

        let written = client.write("prf", Some("3")).await.unwrap();
        assert_eq!(written.single_value().as_deref(), Some("OK"));
        client.clear("ala").await.unwrap();

        assert_eq!(client.transport().requests(), vec!["set/PRF/3", "clr/ALA"]);
    }

    #[tokio::test]
    async fn test_probe_reads_firmware_then_serial() {
        let stub = StubTransport::new()
            .value("VER", "Safe-T+ V4.01")
            .value("SRN", "201812345");
        let client = DeviceClient::new(stub);

        let info = client.probe().await.unwrap();
        assert_eq!(info.firmware, "Safe-T+ V4.01");
        assert_eq!(info.serial, "201812345");
        assert_eq!(client.transport().requests(), vec!["get/VER", "get/SRN"]);
    }

    #[tokio::test]
    async fn test_probe_failure_stops_after_first_request() {
        let stub = StubTransport::new().fail("get/VER").value("SRN", "1");
        let client = DeviceClient::new(stub);

        assert!(client.probe().await.is_err());
        assert_eq!(client.transport().requests(), vec!["get/VER"]);
    }
}
