//! Speedtest Report
//!
//! Aggregates speed-test result files named `<location>_<network>.json` and
//! renders them as a table of download speed, upload speed and ping.

pub mod app;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod types;

// Re-export commonly used types
pub use app::App;
pub use discovery::{discover_inputs, Labels};
pub use error::{AppError, Result};
pub use models::{Client, Config, ReportOutcome, ReportRow, Server, SpeedTest};
pub use output::{ColoredFormatter, OutputCoordinator, OutputFormatter, OutputFormatterFactory, PlainFormatter};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    /// Input scanned when no paths are given
    pub const DEFAULT_INPUT: &str = ".";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
