//! Continuous polling and logging.
//!
//! Each cycle samples a fixed set of registers plus the optional ones the
//! config enables, builds a [`PollRecord`] and hands it to the enabled sinks.
//! A failed register appears as `ERROR` in that cycle's record; the loop
//! neither retries nor stops.

pub mod record;
pub mod sink;

use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::config::PollConfig;
use crate::device::{DeviceClient, DeviceInfo, Transport};
use crate::error::CoreError;
use crate::model::registers::mnemonic;

pub use record::PollRecord;
pub use sink::{log_file_name, ConsoleSink, FileSink, Sinks};

/// Drives the sampling loop for one client.
pub struct Poller<'a, T: Transport> {
    client: &'a DeviceClient<T>,
    config: &'a PollConfig,
}

impl<'a, T: Transport> Poller<'a, T> {
    pub fn new(client: &'a DeviceClient<T>, config: &'a PollConfig) -> Self {
        Self { client, config }
    }

    /// Take one sample.
    pub async fn sample(&self) -> PollRecord {
        let taken_at = Local::now();
        let client = self.client;

        let valve = client.reading(mnemonic::VALVE).await;
        let pressure = client.reading(mnemonic::PRESSURE).await;
        let flow = client.reading(mnemonic::FLOW).await;
        let volume = client.reading(mnemonic::VOLUME).await;
        let last_volume = client.reading(mnemonic::LAST_VOLUME).await;
        let alarm = client.reading(mnemonic::ALARM).await;

        let conductivity = if self.config.log_conductivity {
            Some(client.reading(mnemonic::CONDUCTIVITY).await)
        } else {
            None
        };
        let temperature = if self.config.log_temperature {
            Some(client.reading(mnemonic::TEMPERATURE).await)
        } else {
            None
        };
        let profile = if self.config.log_profile {
            Some(client.reading(mnemonic::ACTIVE_PROFILE).await)
        } else {
            None
        };

        PollRecord {
            taken_at,
            valve,
            pressure,
            flow,
            volume,
            last_volume,
            alarm,
            conductivity,
            temperature,
            profile,
        }
    }

    /// Run until the poll budget is used up. Without a budget this only
    /// returns on a sink error, so callers stop it by dropping the future.
    ///
    /// Returns the number of completed cycles.
    pub async fn run(&self, sinks: &mut Sinks) -> Result<u64, CoreError> {
        let delay = self.config.effective_delay();
        let mut remaining = self.config.budget;
        let mut cycles = 0u64;

        loop {
            let record = self.sample().await;
            sinks.emit(&record).await?;
            cycles += 1;
            tracing::debug!(cycle = cycles, "poll cycle done");

            if let Some(left) = remaining.as_mut() {
                *left = left.saturating_sub(1);
                if *left == 0 {
                    break;
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(cycles)
    }
}

/// Outcome of a finished logging run.
#[derive(Debug)]
pub struct LogSummary {
    pub info: DeviceInfo,
    pub cycles: u64,
}

/// Validate, probe the device, open the sinks and poll.
///
/// The log file is only created once the device has answered the probe.
pub async fn log_device<T: Transport>(
    client: &DeviceClient<T>,
    config: &PollConfig,
    log_dir: &Path,
    console_out: Box<dyn Write + Send>,
) -> Result<LogSummary, CoreError> {
    config.validate()?;
    let info = client.probe().await?;

    let mut sinks = Sinks::open(config, log_dir, console_out).await?;
    if let Some(console) = sinks.console.as_mut() {
        console.header(&info)?;
    }

    let cycles = Poller::new(client, config).run(&mut sinks).await?;
    sinks.close().await?;

    Ok(LogSummary { info, cycles })
}
