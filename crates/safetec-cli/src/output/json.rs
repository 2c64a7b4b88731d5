//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;

use safetec_core::session::{
    AlarmClearReport, ProfileAvailability, ProfileSnapshot, SelectOutcome, StatusSnapshot,
};
use safetec_core::{DeviceInfo, Reading};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_device_info(&self, host: &str, info: &DeviceInfo) -> String {
        let output = json!({
            "host": host,
            "firmware": info.firmware,
            "serial": info.serial,
        });
        Self::to_json(&output)
    }

    fn format_status(&self, info: &DeviceInfo, status: &StatusSnapshot) -> String {
        let output = json!({
            "device": info,
            "status": status,
        });
        Self::to_json(&output)
    }

    fn format_active_profile(&self, active: &Reading) -> String {
        Self::to_json(&json!({ "active_profile": active }))
    }

    fn format_profile(&self, profile: &ProfileSnapshot) -> String {
        Self::to_json(profile)
    }

    fn format_profile_list(
        &self,
        flags: &[ProfileAvailability],
        profiles: &[ProfileSnapshot],
    ) -> String {
        let available: Vec<_> = flags
            .iter()
            .filter(|f| f.is_available())
            .map(|f| f.index)
            .collect();
        let output = json!({
            "availability": flags,
            "available": available,
            "profiles": profiles,
        });
        Self::to_json(&output)
    }

    fn format_select(&self, outcome: &SelectOutcome) -> String {
        Self::to_json(outcome)
    }

    fn format_alarm_clear(&self, report: &AlarmClearReport) -> String {
        Self::to_json(report)
    }

    fn format_code_table(&self, title: &str, rows: &[(&str, &str)]) -> String {
        let entries: Vec<_> = rows
            .iter()
            .map(|(code, description)| json!({ "code": code, "description": description }))
            .collect();
        let output = json!({
            "title": title,
            "entries": entries,
        });
        Self::to_json(&output)
    }
}
