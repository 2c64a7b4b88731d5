//! Clearing the ongoing alarm.

use serde::Serialize;

use crate::device::{DeviceClient, Reading, Transport};
use crate::model::registers::mnemonic;

use super::status::AlarmState;

/// Alarm state before and after a clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmClearReport {
    pub before: AlarmState,
    /// Reply to the clear request
    pub response: Reading,
    pub after: AlarmState,
}

impl<T: Transport> DeviceClient<T> {
    /// Read the alarm register and describe it.
    pub async fn alarm_state(&self) -> AlarmState {
        AlarmState::from_reading(self.reading(mnemonic::ALARM).await)
    }

    /// Clear the ongoing alarm.
    ///
    /// The clear is sent even when no alarm is active. Success is not
    /// verified beyond reading the alarm register again.
    pub async fn clear_ongoing_alarm(&self) -> AlarmClearReport {
        let before = self.alarm_state().await;

        let response = self
            .with_admin_session(|| async {
                match self.clear(mnemonic::ALARM).await {
                    Ok(r) => Reading::Value(r.single_value().unwrap_or_else(|| r.to_string())),
                    Err(e) => Reading::Failed(e),
                }
            })
            .await;

        let after = self.alarm_state().await;
        tracing::info!(before = %before.code, after = %after.code, "alarm cleared");

        AlarmClearReport {
            before,
            response,
            after,
        }
    }
}
