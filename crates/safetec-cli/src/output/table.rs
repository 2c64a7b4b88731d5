//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use safetec_core::session::{
    AlarmClearReport, ProfileAvailability, ProfileSnapshot, SelectOutcome, StatusSnapshot,
};
use safetec_core::{DeviceInfo, Reading};

use super::OutputFormatter;

/// Width labels are padded to in key/value listings.
const LABEL_WIDTH: usize = 32;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn line(label: &str, value: &str) -> String {
        let value = match value {
            "ERROR" => value.red().to_string(),
            "None" => value.dimmed().to_string(),
            _ => value.to_string(),
        };
        format!("{:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH)
    }

    fn profile_lines(profile: &ProfileSnapshot) -> Vec<String> {
        let mut lines = vec![format!("Profile {}", profile.index).bold().to_string()];
        if let Some(warning) = &profile.warning {
            lines.push(format!("  {}", warning.yellow()));
        }
        for f in &profile.fields {
            lines.push(Self::line(&format!("  {}", f.field.label()), f.value.as_str()));
        }
        lines
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_device_info(&self, host: &str, info: &DeviceInfo) -> String {
        [
            Self::line("Device", host),
            Self::line("Firmware", &info.firmware),
            Self::line("Serial", &info.serial),
        ]
        .join("\n")
    }

    fn format_status(&self, info: &DeviceInfo, status: &StatusSnapshot) -> String {
        let mut lines = vec![
            Self::line("Firmware", &info.firmware),
            Self::line("Serial", &info.serial),
            String::new(),
        ];
        if let Some(warning) = status
            .active_profile_detail
            .as_ref()
            .and_then(|p| p.warning.as_ref())
        {
            lines.push(warning.yellow().to_string());
        }
        for (label, value) in status.entries() {
            lines.push(Self::line(&label, &value));
        }
        lines.join("\n")
    }

    fn format_active_profile(&self, active: &Reading) -> String {
        Self::line("Active profile", active.as_str())
    }

    fn format_profile(&self, profile: &ProfileSnapshot) -> String {
        Self::profile_lines(profile).join("\n")
    }

    fn format_profile_list(
        &self,
        flags: &[ProfileAvailability],
        profiles: &[ProfileSnapshot],
    ) -> String {
        let mut lines: Vec<String> = flags
            .iter()
            .map(|f| {
                let status = if f.is_available() {
                    "available".green().to_string()
                } else if f.flag.is_failed() {
                    f.flag.as_str().red().to_string()
                } else {
                    "not available".to_string()
                };
                format!(
                    "{:<width$}{}",
                    format!("Profile {}:", f.index),
                    status,
                    width = LABEL_WIDTH
                )
            })
            .collect();

        if profiles.is_empty() {
            lines.push(String::new());
            lines.push("No profiles available.".to_string());
        }
        for profile in profiles {
            lines.push(String::new());
            lines.extend(Self::profile_lines(profile));
        }
        lines.join("\n")
    }

    fn format_select(&self, outcome: &SelectOutcome) -> String {
        match outcome {
            SelectOutcome::AlreadyActive { index } => {
                format!("Profile {} is already active", index)
            }
            SelectOutcome::Selected { index, response } => format!(
                "{} Profile {} selected\n{}",
                "[OK]".green(),
                index,
                Self::line("Device response", &response.to_string())
            ),
        }
    }

    fn format_alarm_clear(&self, report: &AlarmClearReport) -> String {
        [
            Self::line("Alarm before", &report.before.display()),
            Self::line("Clear response", report.response.as_str()),
            Self::line("Alarm after", &report.after.display()),
        ]
        .join("\n")
    }

    fn format_code_table(&self, title: &str, rows: &[(&str, &str)]) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Code", "Description"]);

        for (code, description) in rows {
            table.add_row(vec![Cell::new(code).fg(Color::Cyan), Cell::new(description)]);
        }

        format!("{}\n{}", title.bold(), table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safetec_core::session::{AlarmState, ProfileFieldValue};
    use safetec_core::{DeviceError, ProfileField, ProfileIndex};

    fn offline() -> DeviceError {
        DeviceError::Offline {
            host: "10.0.0.1".to_string(),
            message: "timed out".to_string(),
        }
    }

    #[test]
    fn test_line_pads_label() {
        let line = TableOutput::line("Buzzer", "1");
        assert_eq!(line.len(), LABEL_WIDTH + 1);
        assert!(line.starts_with("Buzzer:"));
        assert!(line.ends_with(" 1"));
    }

    #[test]
    fn test_profile_shows_warning_and_error_slots() {
        let profile = ProfileSnapshot {
            index: ProfileIndex::new(4).unwrap(),
            warning: Some("Profile 4 is not available".to_string()),
            fields: vec![
                ProfileFieldValue {
                    field: ProfileField::Name,
                    value: Reading::Value("Holiday".to_string()),
                },
                ProfileFieldValue {
                    field: ProfileField::Buzzer,
                    value: Reading::Failed(offline()),
                },
            ],
        };

        let out = TableOutput::new().format_profile(&profile);
        assert!(out.contains("Profile 4 is not available"));
        assert!(out.contains("Holiday"));
        assert!(out.contains("ERROR"));
    }

    #[test]
    fn test_alarm_clear_lines() {
        let report = AlarmClearReport {
            before: AlarmState::from_reading(Reading::Value("A5".to_string())),
            response: Reading::Value("OK".to_string()),
            after: AlarmState::from_reading(Reading::Value("FF".to_string())),
        };

        let out = TableOutput::new().format_alarm_clear(&report);
        assert!(out.contains("A5 (maximum flow leakage)"));
        assert!(out.contains("FF (no alarm)"));
    }

    fn flag(index: i64, flag: Reading) -> ProfileAvailability {
        ProfileAvailability {
            index: ProfileIndex::new(index).unwrap(),
            flag,
        }
    }

    #[test]
    fn test_profile_list_marks_failed_flags() {
        let flags = vec![
            flag(1, Reading::Value("1".to_string())),
            flag(2, Reading::Value("0".to_string())),
            flag(3, Reading::Failed(offline())),
        ];

        let out = TableOutput::new().format_profile_list(&flags, &[]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Profile 1:") && lines[0].contains("available"));
        assert!(lines[1].starts_with("Profile 2:") && lines[1].contains("not available"));
        assert!(lines[2].starts_with("Profile 3:") && lines[2].contains("ERROR"));
        assert!(!lines[2].contains("not available"));
        assert!(out.contains("No profiles available."));
    }

    #[test]
    fn test_code_table_contains_rows() {
        let out = TableOutput::new().format_code_table("Valve states", &[("20", "open")]);
        assert!(out.contains("Valve states"));
        assert!(out.contains("20"));
        assert!(out.contains("open"));
    }
}
