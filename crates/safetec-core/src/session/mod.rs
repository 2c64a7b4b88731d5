//! Session and composite operations.
//!
//! Multi-register reads built on [`DeviceClient`](crate::device::DeviceClient),
//! plus the admin-mode bracket that guards privileged registers.

pub mod admin;
pub mod alarm;
pub mod profile;
pub mod status;

pub use admin::AdminGuard;
pub use alarm::AlarmClearReport;
pub use profile::{ProfileAvailability, ProfileFieldValue, ProfileSnapshot, SelectOutcome};
pub use status::{AlarmState, StatusSnapshot};
