//! Request path builders for the SafeTech REST protocol.
//!
//! Every request is a plain GET to
//! `http://<host>:5333/safe-tec/{get|set|clr}/<MNEMONIC>[/<parameter>]`.
//! The builders here produce the part after `/safe-tec/`.

use std::fmt;

use serde::Serialize;

/// The three request kinds the device understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Write,
    Clear,
}

impl Operation {
    /// Path segment used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "get",
            Operation::Write => "set",
            Operation::Clear => "clr",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-case a mnemonic. The device only answers to upper-case names.
pub fn canonical(mnemonic: &str) -> String {
    mnemonic.trim().to_ascii_uppercase()
}

/// Command path builders for the device protocol
pub struct Commands;

impl Commands {
    /// Read a register
    pub fn read(mnemonic: &str) -> String {
        format!("{}/{}", Operation::Read, canonical(mnemonic))
    }

    /// Write a register, with an optional parameter.
    ///
    /// Without a parameter no trailing slash is emitted.
    pub fn write(mnemonic: &str, parameter: Option<&str>) -> String {
        match parameter {
            Some(p) => format!("{}/{}/{}", Operation::Write, canonical(mnemonic), p),
            None => format!("{}/{}", Operation::Write, canonical(mnemonic)),
        }
    }

    /// Clear a register. Clears never take a parameter.
    pub fn clear(mnemonic: &str) -> String {
        format!("{}/{}", Operation::Clear, canonical(mnemonic))
    }

    /// Key the device uses in its reply to a read.
    pub fn read_key(mnemonic: &str) -> String {
        format!("{}{}", Operation::Read, canonical(mnemonic))
    }
}
