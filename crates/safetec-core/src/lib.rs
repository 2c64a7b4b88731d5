//! SafeTech core - protocol client for SafeTech water-safety shutoff devices.
//!
//! The device speaks a GET-only REST dialect on port 5333:
//! `get/<M>` reads a register, `set/<M>[/<param>]` writes one and `clr/<M>`
//! clears one. This crate encodes those requests, decodes the single-key
//! JSON replies, and builds the composite operations (status dump, profile
//! queries, alarm clearing) and the continuous logging loop on top.

pub mod config;
pub mod device;
pub mod error;
pub mod model;
pub mod poll;
pub mod protocol;
pub mod session;

pub use config::{ClientConfig, PollConfig};
pub use device::{DeviceClient, DeviceInfo, HttpTransport, Reading, Transport};
pub use error::{ConfigError, CoreError, DeviceError};
pub use model::{ProfileField, ProfileIndex};
