use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

lazy_static::lazy_static! {
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Initialize logging with default settings (WARN level)
pub fn init() -> Result<()> {
    init_with(None, None)
}

/// Default log location: `log_dir` if configured, else the working directory
pub fn log_path(log_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let dir = match log_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    Ok(dir.join(LOG_FILE.as_str()))
}

/// Initialize logging with custom path and/or level
pub fn init_with(custom_log_path: Option<PathBuf>, level: Option<tracing::Level>) -> Result<()> {
    let log_path = match custom_log_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path
        }
        None => log_path(None)?,
    };

    let env_filter = env_filter(level);

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}

/// An explicit level wins over RUST_LOG; otherwise RUST_LOG, defaulting to WARN
fn env_filter(level: Option<tracing::Level>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::builder()
            .with_default_directive(tracing::Level::WARN.into())
            .from_env_lossy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_explicit_level_ignores_rust_log() {
        let filter = env_filter(Some(tracing::Level::DEBUG));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_path_uses_configured_dir() {
        let dir = PathBuf::from("/var/log/profiletui");
        let path = log_path(Some(&dir)).unwrap();
        assert_eq!(path, dir.join("profiletui.log"));
    }
}
