//! One sample of the polling loop and its two line formats.

use chrono::{DateTime, Local};

use crate::device::Reading;
use crate::model::lookup::{alarm_description, strip_units, valve_description};

/// `time.asctime()`-style timestamp, e.g. `Sat Feb 10 14:03:07 2024`.
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Registers sampled in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PollRecord {
    pub taken_at: DateTime<Local>,
    pub valve: Reading,
    pub pressure: Reading,
    pub flow: Reading,
    pub volume: Reading,
    pub last_volume: Reading,
    pub alarm: Reading,
    pub conductivity: Option<Reading>,
    pub temperature: Option<Reading>,
    pub profile: Option<Reading>,
}

impl PollRecord {
    /// Human timestamp.
    pub fn asctime(&self) -> String {
        self.taken_at.format(ASCTIME_FORMAT).to_string()
    }

    /// Machine timestamp: Unix seconds with millisecond precision.
    pub fn epoch(&self) -> String {
        let millis = self.taken_at.timestamp_millis();
        format!("{}.{:03}", millis.div_euclid(1000), millis.rem_euclid(1000))
    }

    fn optional(&self) -> impl Iterator<Item = &Reading> {
        [&self.conductivity, &self.temperature, &self.profile]
            .into_iter()
            .flatten()
    }

    /// Console line: mapped valve and alarm text, unit suffixes stripped
    /// unless `raw`.
    pub fn console_line(&self, raw: bool) -> String {
        let show = |r: &Reading| -> String {
            if raw {
                r.to_string()
            } else {
                strip_units(r.as_str()).trim().to_string()
            }
        };

        let mut fields = vec![
            self.asctime(),
            describe(&self.valve, valve_description),
            show(&self.pressure),
            show(&self.flow),
            show(&self.volume),
            show(&self.last_volume),
            describe(&self.alarm, alarm_description),
        ];
        fields.extend(self.optional().map(show));
        fields.join("; ")
    }

    /// File line: raw register values and raw codes, never mapped text.
    pub fn file_line(&self) -> String {
        let mut fields = vec![
            self.epoch(),
            self.valve.to_string(),
            self.pressure.to_string(),
            self.flow.to_string(),
            self.volume.to_string(),
            self.last_volume.to_string(),
            self.alarm.to_string(),
        ];
        fields.extend(self.optional().map(Reading::to_string));
        fields.join(";")
    }
}

fn describe(reading: &Reading, lookup: fn(&str) -> &'static str) -> String {
    match reading.value() {
        Some(code) => lookup(code).to_string(),
        None => reading.to_string(),
    }
}
