//! Data models for speed-test records, report rows and configuration

pub mod config;
pub mod report;
pub mod speedtest;

// Re-export main model types
pub use config::Config;
pub use report::{ReportOutcome, ReportRow, RowOptions, SkippedFile, REPORT_HEADERS};
pub use speedtest::{speed_test_from_dict, speed_test_to_dict, Client, Server, SpeedTest};
