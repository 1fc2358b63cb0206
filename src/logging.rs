use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::{
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const DEFAULT_LOG_FILTER: &str = "info";

struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Installs the global subscriber: stderr always, plus the desktop log file
/// when it can be opened. Safe to call more than once.
pub fn init(log_path: Option<&Path>) {
    let file_layer = log_path.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTimestamp)
                .with_writer(Mutex::new(file))
                .with_filter(env_filter()),
        ),
        Err(error) => {
            eprintln!("failed to open desktop log {}: {error}", path.display());
            None
        }
    });

    let stderr_layer = fmt::layer()
        .with_timer(LocalTimestamp)
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn append_desktop_log(message: &str) {
    tracing::info!(target: "desktop", "{message}");
}

pub fn append_startup_log(message: &str) {
    tracing::info!(target: "startup", "{message}");
}

pub fn append_shutdown_log(message: &str) {
    tracing::info!(target: "shutdown", "{message}");
}
