//! Display rows derived from parsed speed-test records

use crate::discovery::Labels;
use crate::error::AppError;
use crate::models::SpeedTest;
use crate::output::size::{format_ping, format_rate};
use crate::types::SizeUnits;
use serde::{Deserialize, Serialize};

/// Column headers of the report table, in display order
pub const REPORT_HEADERS: [&str; 5] = ["Location", "Network", "Download", "Upload", "Ping"];

/// Options controlling how record values are turned into display strings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowOptions {
    pub size_units: SizeUnits,
    pub ping_precision: Option<usize>,
}

/// One rendered line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub location: String,
    pub network: String,
    pub download: String,
    pub upload: String,
    pub ping: String,
}

impl ReportRow {
    /// Derive the display values for one record
    pub fn from_record(record: &SpeedTest, labels: Labels, options: &RowOptions) -> Self {
        Self {
            location: labels.location,
            network: labels.network,
            download: format_rate(record.download, options.size_units),
            upload: format_rate(record.upload, options.size_units),
            ping: format_ping(record.ping, options.ping_precision),
        }
    }

    /// Cells in header order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            self.network.clone(),
            self.download.clone(),
            self.upload.clone(),
            self.ping.clone(),
        ]
    }
}

/// A file left out of the report, with the reason it was rejected
#[derive(Debug)]
pub struct SkippedFile {
    pub path: String,
    pub error: AppError,
}

/// Result of processing every discovered input
#[derive(Debug, Default)]
pub struct ReportOutcome {
    /// Rows in input order
    pub rows: Vec<ReportRow>,
    /// Files rejected while running with per-file isolation
    pub skipped: Vec<SkippedFile>,
}

impl ReportOutcome {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Exit code of the first rejected file, if any
    pub fn failure_exit_code(&self) -> Option<i32> {
        self.skipped.first().map(|s| s.error.exit_code())
    }
}
