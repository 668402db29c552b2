//! Logging and tracing configuration
//!
//! Card lifecycle changes, registry mutations and access decisions are all emitted as
//! structured `tracing` events. This module installs the subscriber that renders them.

use std::io;
use tracing::{debug, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::types::CliArgs;

/// Error returned when the subscriber cannot be installed
pub type LoggingError = Box<dyn std::error::Error + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the crate
    pub level: Level,
    /// Whether to enable JSON formatting
    pub json_format: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file directory (if logging to file)
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: "facility-keycard".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when neither a custom filter nor `RUST_LOG` is set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::FULL
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    /// Fails on a malformed filter or when a global subscriber is already installed.
    pub fn init(self) -> Result<(), LoggingError> {
        let env_filter = match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive())),
        };

        let registry = Registry::default().with(env_filter);
        let span_events = self.span_events();

        if self.log_to_file {
            let log_dir = self.log_directory.as_deref().unwrap_or("logs");
            let file_appender = rolling::daily(log_dir, &self.log_file_prefix);
            let (file_writer, file_guard) = non_blocking(file_appender);
            let (console_writer, console_guard) = non_blocking(io::stderr());

            // Files are always JSON; the console follows `json_format`.
            let file_layer =
                fmt::layer().json().with_writer(file_writer).with_span_events(span_events.clone());

            if self.json_format {
                let console_layer =
                    fmt::layer().json().with_writer(console_writer).with_span_events(span_events);
                registry.with(file_layer).with(console_layer).try_init()?;
            } else {
                let console_layer = fmt::layer()
                    .pretty()
                    .with_writer(console_writer)
                    .with_ansi(self.enable_ansi)
                    .with_span_events(span_events);
                registry.with(file_layer).with(console_layer).try_init()?;
            }

            // The writers flush on drop; the process-wide subscriber needs them for its lifetime.
            std::mem::forget(file_guard);
            std::mem::forget(console_guard);
        } else if self.json_format {
            let layer = fmt::layer().json().with_writer(io::stderr).with_span_events(span_events);
            registry.with(layer).try_init()?;
        } else {
            let layer = fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(span_events);
            registry.with(layer).try_init()?;
        }

        debug!(config = ?self, "Logging initialized");
        Ok(())
    }

    /// Logging settings selected by command line flags
    ///
    /// `--debug` wins over `--verbose`; without either only warnings are shown.
    /// `--log-dir` adds daily rolling JSON files next to the console output.
    pub fn from_cli_args(args: &CliArgs) -> Self {
        let mut config = if args.debug {
            Self::new().with_level(Level::DEBUG).with_span_events()
        } else if args.verbose {
            Self::new().with_level(Level::INFO)
        } else {
            Self::new().with_level(Level::WARN)
        };

        if args.log_json {
            config = config.with_json_format().without_ansi();
        }
        if let Some(dir) = &args.log_dir {
            config = config.with_file_logging(dir.as_str());
        }
        config
    }
}

/// Emit a structured event tagged with the keycard component
#[macro_export]
macro_rules! card_event {
    ($level:ident, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(
            message = $message,
            component = "keycard",
            $($key = $value,)*
        );
    };
    ($level:ident, $message:expr) => {
        tracing::$level!(
            message = $message,
            component = "keycard",
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_creation() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json_format);
        assert!(!config.log_to_file);
        assert!(config.log_directory.is_none());
        assert_eq!(config.log_file_prefix, "facility-keycard");
        assert!(config.enable_ansi);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_logging_config_builder_pattern() {
        let config = LoggingConfig::new()
            .with_level(Level::DEBUG)
            .with_json_format()
            .with_file_logging("card_logs")
            .with_file_prefix("front-desk")
            .with_span_events()
            .without_ansi()
            .with_env_filter("facility_keycard=trace");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.json_format);
        assert_eq!(config.log_directory.as_deref(), Some("card_logs"));
        assert_eq!(config.log_file_prefix, "front-desk");
        assert!(config.enable_span_events);
        assert!(!config.enable_ansi);
        assert_eq!(config.env_filter.as_deref(), Some("facility_keycard=trace"));
    }

    #[test]
    fn test_default_directive_targets_crate() {
        let config = LoggingConfig::new().with_level(Level::WARN);
        assert_eq!(config.default_directive(), "facility_keycard=WARN");
    }

    #[test]
    fn test_malformed_filter_is_rejected() {
        let result = LoggingConfig::new().with_env_filter("facility_keycard=notalevel").init();
        assert!(result.is_err());
    }

    fn parse(args: &[&str]) -> CliArgs {
        use clap::Parser;
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_from_cli_args_levels() {
        let quiet = LoggingConfig::from_cli_args(&parse(&["test"]));
        assert_eq!(quiet.level, Level::WARN);
        assert!(!quiet.log_to_file);

        let verbose = LoggingConfig::from_cli_args(&parse(&["test", "--verbose"]));
        assert_eq!(verbose.level, Level::INFO);

        let debug = LoggingConfig::from_cli_args(&parse(&["test", "--verbose", "--debug"]));
        assert_eq!(debug.level, Level::DEBUG);
        assert!(debug.enable_span_events);
    }

    #[test]
    fn test_from_cli_args_file_logging() {
        let config =
            LoggingConfig::from_cli_args(&parse(&["test", "--log-dir", "card_logs", "--log-json"]));
        assert!(config.log_to_file);
        assert_eq!(config.log_directory.as_deref(), Some("card_logs"));
        assert!(config.json_format);
        assert!(!config.enable_ansi);
    }

    #[test]
    fn test_file_logging_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_str().unwrap().to_string();
        let args = parse(&["test", "--log-dir", dir_path.as_str()]);

        LoggingConfig::from_cli_args(&args).init().unwrap();
        card_event!(warn, "Keycard issued", card_number = "MEM00001");

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|name| name.starts_with("facility-keycard")));
    }

    #[test]
    fn test_card_event_macro_expands() {
        card_event!(info, "Keycard issued", card_number = "MEM00001");
        card_event!(debug, "Nothing to report");
    }
}
