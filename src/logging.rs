//! Structured logging for report runs
//!
//! Entries carry a level, the emitting component, optional structured fields
//! and the session id of the run. They are rendered either as one readable
//! line or, in debug mode, as one JSON object per line.
//!
//! Every entry is written to stderr; stdout is reserved for the report.

use crate::error::AppError;
use crate::models::Config;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Per-file progress
    Trace = 0,
    /// Parsing and timing detail
    Debug = 1,
    /// Run summary
    Info = 2,
    /// Files left out of the report
    Warn = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }

    fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::White,
            LogLevel::Debug => Color::Cyan,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
        }
    }

    /// Lowest level emitted for the given configuration
    pub fn for_config(config: &Config) -> Self {
        if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Emitting component, e.g. `APP` or `PERF`
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
    pub location: Option<LogLocation>,
}

/// Source code location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// One readable line per entry
    Console,
    /// One JSON object per entry
    Json,
}

/// Leveled logger writing to stderr
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    include_location: bool,
    format: LogFormat,
    name: String,
    session_id: Option<String>,
}

impl Logger {
    /// Create a logger for one component from the run configuration.
    ///
    /// Debug mode logs from `Debug` up as JSON with source locations,
    /// verbose mode from `Info`, otherwise only warnings.
    pub fn with_config(name: &str, config: &Config) -> Self {
        Self {
            min_level: LogLevel::for_config(config),
            use_color: config.enable_color,
            include_location: config.debug,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name: name.to_string(),
            session_id: None,
        }
    }

    /// Attach the run's session id to every entry
    pub fn set_session_id(&mut self, session_id: &str) {
        self.session_id = Some(session_id.to_string());
    }

    /// Start an entry at the given level
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn trace(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Render an entry, or `None` when its level is filtered out
    fn render_entry(&self, mut entry: LogEntry) -> Option<String> {
        if !self.would_log(entry.level) {
            return None;
        }

        if let Some(session_id) = &self.session_id {
            entry
                .fields
                .insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }

        Some(match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => format_json(&entry),
        })
    }

    fn write_entry(&self, entry: LogEntry) {
        if let Some(output) = self.render_entry(entry) {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let level = format!("{:>5}", entry.level.as_str());
        let level = if self.use_color {
            level.color(entry.level.color()).to_string()
        } else {
            level
        };

        let mut output = format!(
            "{} {} [{}] {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            level,
            entry.logger,
            entry.message
        );

        if let Some(correlation_id) = &entry.correlation_id {
            let short: String = correlation_id.chars().take(8).collect();
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        if self.include_location {
            if let Some(location) = &entry.location {
                output.push_str(&format!(" @ {}:{}", location.file, location.line));
            }
        }

        output
    }
}

fn format_json(entry: &LogEntry) -> String {
    serde_json::to_string(entry).unwrap_or_else(|e| {
        serde_json::json!({ "message": entry.message, "serialize_error": e.to_string() }).to_string()
    })
}

/// Builder for one log entry; nothing is written until [`LogEntryBuilder::log`]
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
                location: None,
            },
        }
    }

    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field; values that do not serialize are dropped
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    /// Category, exit code and skippability of an error
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_skippable", error.is_record_error())
            .field("error_exit_code", error.exit_code())
    }

    pub fn log(self) {
        self.logger.write_entry(self.entry);
    }
}

/// Per-file and whole-run durations
pub struct PerformanceLogger {
    logger: Logger,
    start_times: HashMap<String, DateTime<Utc>>,
}

impl PerformanceLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("PERF", config),
            start_times: HashMap::new(),
        }
    }

    pub fn start_timing(&mut self, operation: &str) {
        self.start_times.insert(operation.to_string(), Utc::now());

        self.logger
            .trace(&format!("Reading {}", operation))
            .field("operation", operation)
            .log();
    }

    /// Log and return the time since `start_timing` for the same operation
    pub fn end_timing(&mut self, operation: &str) -> Option<chrono::Duration> {
        let Some(start_time) = self.start_times.remove(operation) else {
            self.logger
                .warn(&format!("No timing started for {}", operation))
                .field("operation", operation)
                .log();
            return None;
        };

        let duration = Utc::now() - start_time;
        self.logger
            .debug(&format!("Finished {} in {}us", operation, duration.num_microseconds().unwrap_or(0)))
            .field("operation", operation)
            .field("duration_us", duration.num_microseconds())
            .log();

        Some(duration)
    }

    pub fn log_run_summary(&self, files: usize, rows: usize, skipped: usize, total: std::time::Duration) {
        let duration_ms = total.as_secs_f64() * 1000.0;
        self.logger
            .info(&format!(
                "Processed {} file(s): {} row(s), {} skipped in {:.3}ms",
                files, rows, skipped, duration_ms
            ))
            .field("files", files)
            .field("rows", rows)
            .field("skipped", skipped)
            .field("duration_ms", duration_ms)
            .log();
    }
}

/// Logs files dropped from the report under `--keep-going`
pub struct ErrorEventLogger {
    logger: Logger,
}

impl ErrorEventLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("ERR", config),
        }
    }

    pub fn log_skipped(&self, path: &str, error: &AppError, correlation_id: Option<&str>) {
        let mut builder = self
            .logger
            .warn(&format!("Skipping {}: {}", path, error.root_cause()))
            .error_info(error)
            .field("path", path);

        if let Some(id) = correlation_id {
            builder = builder.correlation_id(id);
        }

        builder.log();
    }
}

/// Creates the loggers of one run, all sharing a session id
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn create_logger(&self, name: &str) -> Logger {
        let mut logger = Logger::with_config(name, &self.config);
        logger.set_session_id(&self.session_id);
        logger
    }

    pub fn create_performance_logger(&self) -> PerformanceLogger {
        let mut perf = PerformanceLogger::new(&self.config);
        perf.logger.set_session_id(&self.session_id);
        perf
    }

    pub fn create_error_logger(&self) -> ErrorEventLogger {
        let mut errors = ErrorEventLogger::new(&self.config);
        errors.logger.set_session_id(&self.session_id);
        errors
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Log at debug level with the caller's source location
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
    };
}

/// Log at info level with the caller's source location
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(level: LogLevel) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            message: "Skipping nyc.json".to_string(),
            logger: "ERR".to_string(),
            correlation_id: Some("0123456789abcdef".to_string()),
            fields: HashMap::from([("path".to_string(), serde_json::json!("nyc.json"))]),
            location: Some(LogLocation {
                file: "src/app.rs".to_string(),
                line: 42,
                module: None,
            }),
        }
    }

    fn config(verbose: bool, debug: bool, enable_color: bool) -> Config {
        Config {
            verbose,
            debug,
            enable_color,
            ..Config::default()
        }
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn test_logger_with_config_levels() {
        let quiet = Logger::with_config("TEST", &config(false, false, false));
        assert_eq!(quiet.min_level, LogLevel::Warn);
        assert_eq!(quiet.format, LogFormat::Console);
        assert!(quiet.render_entry(sample_entry(LogLevel::Info)).is_none());
        assert!(quiet.render_entry(sample_entry(LogLevel::Warn)).is_some());

        let verbose = Logger::with_config("TEST", &config(true, false, false));
        assert_eq!(verbose.min_level, LogLevel::Info);
        assert!(!verbose.would_log(LogLevel::Debug));

        let debug = Logger::with_config("TEST", &config(false, true, false));
        assert_eq!(debug.min_level, LogLevel::Debug);
        assert_eq!(debug.format, LogFormat::Json);
        assert!(debug.include_location);
        assert!(!debug.would_log(LogLevel::Trace));
    }

    #[test]
    fn test_json_entry_carries_session() {
        let mut logger = Logger::with_config("ERR", &config(false, true, false));
        logger.set_session_id("session-1");

        let output = logger.render_entry(sample_entry(LogLevel::Warn)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["fields"]["session_id"], "session-1");
        assert_eq!(parsed["fields"]["path"], "nyc.json");
        assert_eq!(parsed["level"], "Warn");
        assert_eq!(parsed["location"]["line"], 42);
    }

    #[test]
    fn test_console_format() {
        let logger = Logger::with_config("ERR", &config(false, false, false));
        let output = logger.format_console(&sample_entry(LogLevel::Warn));

        assert!(output.contains(" WARN [ERR] Skipping nyc.json"));
        assert!(output.contains("[01234567]"));
        assert!(output.contains("path=\"nyc.json\""));
        assert!(!output.contains(" @ "));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_console_format_colored_level() {
        colored::control::set_override(true);
        let logger = Logger::with_config("ERR", &config(false, false, true));
        let output = logger.format_console(&sample_entry(LogLevel::Warn));

        assert!(output.contains("\x1b[33m WARN\x1b[0m"), "{:?}", output);
    }

    #[test]
    fn test_log_entry_builder() {
        let logger = Logger::with_config("TEST", &Config::default());
        let error = AppError::in_file("nyc.json", AppError::naming_convention("nyc.json"));

        let builder = logger
            .info("test message")
            .correlation_id("test-id")
            .field("path", "nyc.json")
            .error_info(&error)
            .location("test.rs", 123, Some("test::module"));

        assert_eq!(builder.entry.fields["error_category"], "NAMING");
        assert_eq!(builder.entry.fields["error_exit_code"], 2);
        assert_eq!(builder.entry.fields["error_skippable"], true);
        assert_eq!(builder.entry.correlation_id.as_deref(), Some("test-id"));
        builder.log();
    }

    #[test]
    fn test_performance_timing() {
        let mut perf_logger = PerformanceLogger::new(&Config::default());
        perf_logger.start_timing("nyc_fiber.json");

        let duration = perf_logger.end_timing("nyc_fiber.json");
        assert!(duration.unwrap().num_microseconds().unwrap() >= 0);

        assert!(perf_logger.end_timing("unknown_operation").is_none());
    }

    #[test]
    fn test_logger_factory_shares_session() {
        let factory = LoggerFactory::new(Config::default());
        let logger = factory.create_logger("APP");
        assert_eq!(logger.name, "APP");

        let session_id = factory.session_id();
        assert!(Uuid::parse_str(session_id).is_ok());
        assert_eq!(logger.session_id.as_deref(), Some(session_id));
        assert_eq!(factory.create_error_logger().logger.session_id.as_deref(), Some(session_id));
    }

    #[test]
    fn test_macros_log() {
        let logger = Logger::with_config("TEST", &config(true, false, false));
        crate::log_debug!(logger, "debug {}", 1);
        crate::log_info!(logger, "info {}", 2);
    }
}
