//! Device communication layer.
//!
//! Provides the HTTP transport and the register-level command client.

pub mod client;
pub mod reading;
pub mod transport;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{DeviceClient, DeviceInfo};
pub use reading::Reading;
pub use transport::{HttpTransport, Transport};
