//! Response parsing for the device protocol.
//!
//! The device answers every request with a single-key JSON object, e.g.
//! `{"getBAR":"1013 mbar"}` or `{"setPRF3":"OK"}`. Reads only care about the
//! value under `get<MNEMONIC>`; writes and clears hand back the whole object
//! because its shape differs per mnemonic.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::DeviceError;

/// Text shown for a register the device reported without a value.
pub const ABSENT_TOKEN: &str = "None";

/// Value of a register as reported by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterValue {
    /// The device returned a value
    Value(String),
    /// The device replied, but the requested key was missing or null
    Absent,
}

impl RegisterValue {
    pub fn as_str(&self) -> &str {
        match self {
            RegisterValue::Value(v) => v,
            RegisterValue::Absent => ABSENT_TOKEN,
        }
    }
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded reply to a write or clear request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedResponse {
    /// JSON response
    Json(Value),
    /// Body that was not JSON, kept verbatim
    Text(String),
}

impl ParsedResponse {
    /// Parse a write/clear body. Non-JSON bodies are kept as text.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body.trim()) {
            Ok(value) => ParsedResponse::Json(value),
            Err(_) => ParsedResponse::Text(body.to_string()),
        }
    }

    /// Get as JSON value (if JSON)
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ParsedResponse::Json(v) => Some(v),
            ParsedResponse::Text(_) => None,
        }
    }

    /// The single value of a one-entry object reply, if there is one.
    pub fn single_value(&self) -> Option<String> {
        let map = self.as_json()?.as_object()?;
        if map.len() != 1 {
            return None;
        }
        map.values().next().map(value_to_string)
    }
}

impl fmt::Display for ParsedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedResponse::Json(v) => write!(f, "{}", v),
            ParsedResponse::Text(s) => f.write_str(s),
        }
    }
}

/// Extract the value stored under `key` in a read reply.
///
/// A body that is not a JSON object is an invalid response. A missing key
/// or a `null` value is [`RegisterValue::Absent`].
pub fn parse_read_response(
    body: &str,
    key: &str,
    host: &str,
) -> Result<RegisterValue, DeviceError> {
    let value: Value = serde_json::from_str(body.trim()).map_err(|e| {
        DeviceError::InvalidResponse {
            host: host.to_string(),
            message: format!("Failed to parse JSON: {}", e),
        }
    })?;

    let map = value.as_object().ok_or_else(|| DeviceError::InvalidResponse {
        host: host.to_string(),
        message: "Expected a JSON object".to_string(),
    })?;

    match map.get(key) {
        None | Some(Value::Null) => Ok(RegisterValue::Absent),
        Some(v) => Ok(RegisterValue::Value(value_to_string(v))),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => ABSENT_TOKEN.to_string(),
        other => other.to_string(),
    }
}
