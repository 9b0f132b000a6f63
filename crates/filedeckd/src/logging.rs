use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILTER_ENV: &str = "FILEDECK_LOG";
pub const DEBUG_ENV: &str = "FILEDECK_DEBUG";

static INIT: OnceLock<()> = OnceLock::new();

pub fn debug_enabled() -> bool {
    env::var(DEBUG_ENV).ok().as_deref() == Some("1")
}

pub fn debug_log_path() -> PathBuf {
    filedeck_config::app_data_dir().join("filedeck-debug.log")
}

/// Installs the global subscriber once. Later calls and a foreign subscriber are tolerated.
pub fn init() {
    INIT.get_or_init(|| {
        let debug_on = debug_enabled();
        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_on)));

        let file_layer = if debug_on {
            open_debug_log_file().map(|file| {
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
            })
        } else {
            None
        };

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(file_layer)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(debug_on, "logging initialized");
        }
    });
}

fn default_directive(debug_on: bool) -> &'static str {
    if debug_on {
        "debug"
    } else {
        "info"
    }
}

fn open_debug_log_file() -> Option<File> {
    let path = debug_log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_log_sits_next_to_settings() {
        let path = debug_log_path();
        assert!(path.ends_with("FileDeck/filedeck-debug.log"));
    }

    #[test]
    fn debug_flag_lowers_default_level() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "info");
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
