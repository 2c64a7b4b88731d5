//! Output sinks for poll records.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::PollConfig;
use crate::device::DeviceInfo;

use super::record::PollRecord;

/// `<YYYYMMDDHHMMSS>_<suffix>.log`
pub fn log_file_name(now: DateTime<Local>, suffix: &str) -> String {
    format!("{}_{}.log", now.format("%Y%m%d%H%M%S"), suffix)
}

/// Human-readable lines on a writer.
pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    raw: bool,
}

impl ConsoleSink {
    pub fn new(out: Box<dyn Write + Send>, raw: bool) -> Self {
        Self { out, raw }
    }

    pub fn header(&mut self, info: &DeviceInfo) -> io::Result<()> {
        writeln!(self.out, "Firmware: {}", info.firmware)?;
        writeln!(self.out, "Serial:   {}", info.serial)?;
        self.out.flush()
    }

    pub fn emit(&mut self, record: &PollRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.console_line(self.raw))?;
        self.out.flush()
    }
}

/// Machine-readable lines in a log file, flushed after every line.
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Create (or truncate) `<dir>/<timestamp>_<suffix>.log`.
    pub async fn create(dir: &Path, suffix: &str, now: DateTime<Local>) -> io::Result<Self> {
        let path = dir.join(log_file_name(now, suffix));
        let file = File::create(&path).await?;
        tracing::info!(path = %path.display(), "log file created");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn emit(&mut self, record: &PollRecord) -> io::Result<()> {
        let mut line = record.file_line();
        line.push('\n');
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await
    }

    /// Flush and close the file.
    pub async fn close(mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }
}

/// The sinks enabled for one run.
#[derive(Default)]
pub struct Sinks {
    pub console: Option<ConsoleSink>,
    pub file: Option<FileSink>,
}

impl Sinks {
    /// Open the sinks `config` asks for. The log file is created here.
    pub async fn open(
        config: &PollConfig,
        dir: &Path,
        console_out: Box<dyn Write + Send>,
    ) -> io::Result<Self> {
        let console = config
            .console
            .then(|| ConsoleSink::new(console_out, config.raw));
        let file = match &config.file_suffix {
            Some(suffix) => Some(FileSink::create(dir, suffix, Local::now()).await?),
            None => None,
        };
        Ok(Self { console, file })
    }

    pub async fn emit(&mut self, record: &PollRecord) -> io::Result<()> {
        if let Some(console) = &mut self.console {
            console.emit(record)?;
        }
        if let Some(file) = &mut self.file {
            file.emit(record).await?;
        }
        Ok(())
    }

    pub async fn close(self) -> io::Result<()> {
        match self.file {
            Some(file) => file.close().await,
            None => Ok(()),
        }
    }
}
