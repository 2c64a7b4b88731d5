//! Outcome of a single register read, as kept by composite operations.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{DeviceError, ERROR_TOKEN};
use crate::protocol::response::{RegisterValue, ABSENT_TOKEN};

/// One register read, success or not.
///
/// Composite operations never abort on a failed register; they keep a
/// `Reading` and carry on. `Display` renders the raw value, `None` for an
/// absent value, and `ERROR` for a failed read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    Value(String),
    Absent,
    Failed(DeviceError),
}

impl Reading {
    /// The device value, if the read succeeded and carried one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Absent | Reading::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Reading::Failed(_))
    }

    /// Text shown to the user.
    pub fn as_str(&self) -> &str {
        match self {
            Reading::Value(v) => v,
            Reading::Absent => ABSENT_TOKEN,
            Reading::Failed(_) => ERROR_TOKEN,
        }
    }

    /// Apply `f` to a present value; absent and failed readings pass through.
    pub fn map_value<F>(&self, f: F) -> Reading
    where
        F: FnOnce(&str) -> String,
    {
        match self {
            Reading::Value(v) => Reading::Value(f(v)),
            other => other.clone(),
        }
    }
}

impl From<Result<RegisterValue, DeviceError>> for Reading {
    fn from(result: Result<RegisterValue, DeviceError>) -> Self {
        match result {
            Ok(RegisterValue::Value(v)) => Reading::Value(v),
            Ok(RegisterValue::Absent) => Reading::Absent,
            Err(e) => Reading::Failed(e),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
