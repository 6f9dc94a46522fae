//! Logger initialization
//!
//! Records go to stderr through `env_logger`. When the logging configuration
//! names a directory, every record is also appended to
//! `<directory>/verification_<timestamp>.log`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use env_logger::{Builder, Env, Target};

use mp_shared::config::LoggingConfig;

/// Writer duplicating log output to stderr and a file
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Log file name for a process started at `started_at`
pub fn log_file_path(directory: &Path, started_at: DateTime<Utc>) -> PathBuf {
    directory.join(format!(
        "verification_{}.log",
        started_at.format("%d.%m.%Y_%H-%M-%S")
    ))
}

/// Create `directory` if needed and open this run's log file for appending
pub fn open_log_file(directory: &str) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(directory)?;
    let path = log_file_path(Path::new(directory), Utc::now());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Install the global logger
///
/// `RUST_LOG` overrides the configured level. Returns the log file path when
/// file output is enabled.
pub fn init(config: &LoggingConfig) -> io::Result<Option<PathBuf>> {
    let mut builder = Builder::from_env(Env::new().default_filter_or(config.level.as_str()));

    let path = match config.directory.as_deref() {
        Some(directory) => {
            let (path, file) = open_log_file(directory)?;
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
            Some(path)
        }
        None => None,
    };

    builder.init();
    Ok(path)
}
