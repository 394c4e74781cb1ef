use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::infra::constants::{LOG_ENV, LOG_FILE};

/// Route tracing output to `<dir>/turbine.log`. The terminal owns stdout.
pub fn init(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new().create(true).append(true).open(dir.join(LOG_FILE))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .map_err(io::Error::other)
}

/// Append a panic report to `<dir>/errors/panic.log`. Best effort.
pub fn write_panic_report(dir: &Path, report: &str) {
    let error_dir = dir.join("errors");
    let _ = fs::create_dir_all(&error_dir);
    let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let msg = format!("[{}] {}\n\n---\n", ts, report);
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_dir.join("panic.log"))
        .and_then(|mut f| f.write_all(msg.as_bytes()));
}
