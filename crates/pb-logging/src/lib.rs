// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging setup shared by the password bot binaries.
//!
//! Command-line flags and the `logging:` section of the config file are folded
//! into [`LogSettings`], which installs a global `tracing` subscriber. `RUST_LOG`
//! always wins over the configured level.

pub mod logging_config;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use logging_config::LoggingConfig;
pub use tracing::Level;

const REDACTED: &str = "[REDACTED]";

/// Output format for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plaintext,
    /// One JSON object per line, including the active span fields
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Plaintext => "plaintext",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LogFormat::Plaintext, LogFormat::Json]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown log format '{}', expected plaintext or json", s))
    }
}

/// Log verbosity accepted on the command line and in the config file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level: Level = (*self).into();
        f.write_str(&level.as_str().to_ascii_lowercase())
    }
}

/// Logging flags for `#[command(flatten)]` in a clap parser.
///
/// Unset flags fall back to the config file, then to info-level plaintext on
/// stdout.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Log verbosity (default: info)
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format (default: plaintext)
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Write logs into this directory instead of stdout
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Write logs to this file instead of stdout; relative to --log-dir when both are given
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Fill every option not given on the command line from the config file
    pub fn with_config(mut self, config: &LoggingConfig) -> Self {
        self.log_level = self.log_level.or(config.level);
        self.log_format = self.log_format.or(config.format);
        if self.log_file.is_none() {
            self.log_file = config.file.clone();
        }
        self
    }

    /// Resolve the flags into concrete settings for `component`
    pub fn settings(&self, component: &str) -> LogSettings {
        LogSettings {
            component: component.to_string(),
            level: self.log_level.unwrap_or_default().into(),
            format: self.log_format.unwrap_or_default(),
            target: self.target(component),
        }
    }

    /// Install the global subscriber
    pub fn init(self, component: &str) -> anyhow::Result<()> {
        self.settings(component).init()
    }

    pub fn logs_to_file(&self) -> bool {
        self.log_file.is_some() || self.log_dir.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.log_level.is_none()
            && self.log_format.is_none()
            && self.log_dir.is_none()
            && self.log_file.is_none()
    }

    fn target(&self, component: &str) -> LogTarget {
        let path = match (self.log_file.as_deref(), self.log_dir.as_deref()) {
            (None, None) => return LogTarget::Stdout,
            (Some(file), Some(dir)) if Path::new(file).is_relative() => Path::new(dir).join(file),
            (Some(file), _) => PathBuf::from(file),
            (None, Some(dir)) => Path::new(dir).join(format!("{}.log", component)),
        };
        LogTarget::File(path)
    }
}

/// Where log lines are written
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Appended to; parent directories are created on init
    File(PathBuf),
}

/// Fully resolved logging configuration for one process
#[derive(Clone, Debug, PartialEq)]
pub struct LogSettings {
    pub component: String,
    pub level: Level,
    pub format: LogFormat,
    pub target: LogTarget,
}

impl LogSettings {
    /// Plaintext logging to stdout at `level`
    pub fn console(component: &str, level: Level) -> Self {
        Self {
            component: component.to_string(),
            level,
            format: LogFormat::Plaintext,
            target: LogTarget::Stdout,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    ///
    /// Crate targets use underscores, so `pb-bot` becomes `pb_bot`.
    pub fn default_filter(&self) -> String {
        format!(
            "{level},{target}={level}",
            level = self.level,
            target = self.component.replace('-', "_")
        )
    }

    pub fn init(self) -> anyhow::Result<()> {
        match &self.target {
            LogTarget::Stdout => self.init_with_writer(std::io::stdout),
            LogTarget::File(path) => {
                let file = open_log_file(path)?;
                self.init_with_writer(file)
            }
        }
    }

    /// Install the global subscriber writing through `writer`
    pub fn init_with_writer<W>(&self, writer: W) -> anyhow::Result<()>
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_filter()));
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_file(cfg!(debug_assertions))
            .with_line_number(cfg!(debug_assertions));

        let registry = tracing_subscriber::registry().with(filter);
        match self.format {
            LogFormat::Json => registry
                .with(layer.json().with_current_span(true))
                .try_init()?,
            LogFormat::Plaintext => registry.with(layer).try_init()?,
        }
        Ok(())
    }
}

fn open_log_file(path: &Path) -> anyhow::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Placeholder to log in place of a secret value
///
/// ```rust
/// let password = "hunter2";
/// tracing::info!(password = pb_logging::redact(password), "credentials stored");
/// ```
pub fn redact<T: ?Sized>(_value: &T) -> &'static str {
    REDACTED
}

/// Process-unique id attached to the span of each handled request
pub fn correlation_id() -> String {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    format!(
        "{:x}-{:06}",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    )
}
