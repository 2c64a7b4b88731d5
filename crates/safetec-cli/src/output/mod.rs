//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use safetec_core::session::{
    AlarmClearReport, ProfileAvailability, ProfileSnapshot, SelectOutcome, StatusSnapshot,
};
use safetec_core::{DeviceInfo, Reading};

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the probe result
    fn format_device_info(&self, host: &str, info: &DeviceInfo) -> String;

    /// Format the full status dump
    fn format_status(&self, info: &DeviceInfo, status: &StatusSnapshot) -> String;

    /// Format the active profile number
    fn format_active_profile(&self, active: &Reading) -> String;

    /// Format one profile
    fn format_profile(&self, profile: &ProfileSnapshot) -> String;

    /// Format the availability of every profile and the settings of the
    /// available ones
    fn format_profile_list(&self, flags: &[ProfileAvailability], profiles: &[ProfileSnapshot])
        -> String;

    /// Format a profile selection
    fn format_select(&self, outcome: &SelectOutcome) -> String;

    /// Format an alarm clear
    fn format_alarm_clear(&self, report: &AlarmClearReport) -> String;

    /// Format a static code/description table
    fn format_code_table(&self, title: &str, rows: &[(&str, &str)]) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
