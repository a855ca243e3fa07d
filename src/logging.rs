//! Tracing setup for the plugin binary.
//!
//! Events go to stderr; stdout is reserved for the configuration summary, or
//! for the prompt itself under `--stdout`. Colour is off because CI log
//! viewers show escape codes verbatim.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::cli::Cli;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Full `EnvFilter` directive; beats every other level source.
pub const FILTER_ENV_VAR: &str = "REVIEW_PROMPT_LOG";

/// Plugin setting for the level, used when `--log-level` is absent.
pub const LEVEL_ENV_VAR: &str = "PLUGIN_LOG_LEVEL";

/// Where log output goes and how verbose it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// `--log-level` wins over `PLUGIN_LOG_LEVEL`. The log file is CLI-only.
    pub fn resolve<F>(cli: &Cli, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = cli
            .log_level
            .clone()
            .or_else(|| lookup(LEVEL_ENV_VAR).filter(|v| !v.is_empty()));
        LogSettings {
            level,
            file: cli.log_file.clone(),
        }
    }
}

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Only the first call does anything. The stderr layer is compact text; with
/// `settings.file` set, the same events are also appended to that file as
/// JSON lines. Both layers use one filter, resolved as `REVIEW_PROMPT_LOG` >
/// `settings.level` > `info`.
pub fn init(settings: &LogSettings) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| result = install(settings));
    result
}

fn install(settings: &LogSettings) -> anyhow::Result<()> {
    let level = settings.level.as_deref();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .compact()
        .with_filter(build_filter(level));

    let file_layer = match settings.file.as_deref() {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(open_log_file(path)?))
                .with_ansi(false)
                .json()
                .with_filter(build_filter(level)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

fn build_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LOG_LEVEL)))
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "failed to create log file directory {}: {e}",
                parent.display()
            )
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))
}
