//! Full status dump.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::device::{DeviceClient, Reading, Transport};
use crate::error::DeviceError;
use crate::model::lookup::{alarm_description, strip_units};
use crate::model::registers::mnemonic;
use crate::model::ProfileIndex;

use super::profile::{ProfileAvailability, ProfileSnapshot};

/// Alarm register value together with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmState {
    pub code: Reading,
    pub description: Option<&'static str>,
}

impl AlarmState {
    pub fn from_reading(code: Reading) -> Self {
        let description = code.value().map(alarm_description);
        Self { code, description }
    }

    /// `A3 (volume leakage)`, or the bare token if the read failed.
    pub fn display(&self) -> String {
        match self.description {
            Some(desc) => format!("{} ({})", self.code, desc),
            None => self.code.to_string(),
        }
    }
}

/// Everything `status` shows, in read order.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub profile_count: Reading,
    pub profiles: Vec<ProfileAvailability>,
    pub active_profile: Reading,
    pub active_profile_detail: Option<ProfileSnapshot>,
    pub leak_disable_timer: Reading,
    pub buzzer: Reading,
    pub conductivity_limit: Reading,
    pub conductivity_factor: Reading,
    pub leak_warning: Reading,
    pub floor_sensor: Reading,
    pub maintenance_date: Reading,
    pub battery_voltage: Reading,
    pub supply_voltage: Reading,
    pub clock: Reading,
    pub alarm: AlarmState,
    pub alarm_history: Reading,
    pub last_volume: Reading,
    pub total_volume: Reading,
}

impl StatusSnapshot {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = vec![("Number of profiles".to_string(), self.profile_count.to_string())];

        for p in &self.profiles {
            out.push((format!("Profile {} available", p.index), p.flag.to_string()));
        }
        out.push(("Active profile".to_string(), self.active_profile.to_string()));
        if let Some(detail) = &self.active_profile_detail {
            for f in &detail.fields {
                out.push((format!("  {}", f.field.label()), f.value.to_string()));
            }
        }

        let rest = [
            ("Leak protection disabled for", self.leak_disable_timer.to_string()),
            ("Buzzer", self.buzzer.to_string()),
            ("Conductivity limit", self.conductivity_limit.to_string()),
            ("Conductivity factor", self.conductivity_factor.to_string()),
            ("Leakage warning (%)", self.leak_warning.to_string()),
            ("Floor sensor", self.floor_sensor.to_string()),
            ("Next maintenance", self.maintenance_date.to_string()),
            ("Battery voltage", self.battery_voltage.to_string()),
            ("Supply voltage", self.supply_voltage.to_string()),
            ("Device clock", self.clock.to_string()),
            ("Alarm", self.alarm.display()),
            ("Alarm history", self.alarm_history.to_string()),
            ("Last volume (L)", self.last_volume.to_string()),
            ("Total volume (L)", self.total_volume.to_string()),
        ];
        out.extend(rest.into_iter().map(|(label, value)| (label.to_string(), value)));
        out
    }
}

/// Render the device clock (epoch seconds) as local time.
///
/// Anything that is not a positive integer becomes a failed reading.
pub fn convert_clock(raw: &Reading, host: &str) -> Reading {
    let Some(value) = raw.value() else {
        return raw.clone();
    };

    let parsed = value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    match parsed {
        Some(utc) => Reading::Value(
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ),
        None => Reading::Failed(DeviceError::InvalidResponse {
            host: host.to_string(),
            message: format!("clock value '{}' is not a timestamp", value),
        }),
    }
}

impl<T: Transport> DeviceClient<T> {
    /// Read the full device status.
    ///
    /// A failed register shows up as `ERROR` in its slot; the remaining
    /// reads go ahead.
    pub async fn fetch_full_status(&self) -> StatusSnapshot {
        let profile_count = self.reading(mnemonic::PROFILE_COUNT).await;
        let profiles = self.profile_availability().await;

        let active_profile = self.reading(mnemonic::ACTIVE_PROFILE).await;
        let active_index = active_profile
            .value()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|i| ProfileIndex::new(i).ok());
        let active_profile_detail = match active_index {
            Some(index) => Some(self.fetch_profile(index, false).await),
            None => None,
        };

        let admin = self
            .with_admin_session(|| async {
                AdminPart {
                    leak_disable_timer: self.reading(mnemonic::LEAK_DISABLE_TIMER).await,
                    buzzer: self.reading(mnemonic::BUZZER).await,
                    conductivity_limit: self.reading(mnemonic::CONDUCTIVITY_LIMIT).await,
                    conductivity_factor: self.reading(mnemonic::CONDUCTIVITY_FACTOR).await,
                    leak_warning: self.reading(mnemonic::LEAK_WARNING).await,
                    floor_sensor: self.reading(mnemonic::FLOOR_SENSOR).await,
                    maintenance_date: self.reading(mnemonic::MAINTENANCE).await,
                    battery_voltage: self.reading(mnemonic::BATTERY).await,
                    supply_voltage: self.reading(mnemonic::SUPPLY).await,
                    clock: self.reading(mnemonic::CLOCK).await,
                    alarm: self.reading(mnemonic::ALARM).await,
                    alarm_history: self.reading(mnemonic::ALARM_HISTORY).await,
                    last_volume: self.reading(mnemonic::LAST_VOLUME).await,
                    total_volume: self.reading(mnemonic::TOTAL_VOLUME).await,
                }
            })
            .await;

        StatusSnapshot {
            profile_count,
            profiles,
            active_profile,
            active_profile_detail,
            leak_disable_timer: admin.leak_disable_timer,
            buzzer: admin.buzzer,
            conductivity_limit: admin.conductivity_limit,
            conductivity_factor: admin.conductivity_factor,
            leak_warning: admin.leak_warning,
            floor_sensor: admin.floor_sensor,
            maintenance_date: admin.maintenance_date,
            battery_voltage: admin.battery_voltage,
            supply_voltage: admin.supply_voltage,
            clock: convert_clock(&admin.clock, self.host()),
            alarm: AlarmState::from_reading(admin.alarm),
            alarm_history: admin.alarm_history,
            last_volume: admin.last_volume,
            total_volume: admin.total_volume.map_value(|v| strip_units(v).trim().to_string()),
        }
    }
}

struct AdminPart {
    leak_disable_timer: Reading,
    buzzer: Reading,
    conductivity_limit: Reading,
    conductivity_factor: Reading,
    leak_warning: Reading,
    floor_sensor: Reading,
    maintenance_date: Reading,
    battery_voltage: Reading,
    supply_voltage: Reading,
    clock: Reading,
    alarm: Reading,
    alarm_history: Reading,
    last_volume: Reading,
    total_volume: Reading,
}
