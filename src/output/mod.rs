//! Output formatting and display system
//!
//! This module turns collected report rows into the text written to the
//! terminal, supporting colored and plain tables as well as JSON.

mod colored;
mod formatter;
pub mod size;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{
    render_table, FormattingOptions, JsonFormatter, OutputFormatter, PlainFormatter, RowData, TableFormat,
};

use crate::{
    error::Result,
    models::{report::ReportOutcome, Config},
    types::OutputFormat,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on output format and color preference
    pub fn create_formatter(options: FormattingOptions) -> Box<dyn OutputFormatter> {
        match options.output_format {
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::Table if options.enable_color => Box::new(ColoredFormatter::new(options)),
            OutputFormat::Table => Box::new(PlainFormatter::new(options)),
        }
    }

    /// Create the formatter described by the application configuration
    pub fn from_config(config: &Config) -> Box<dyn OutputFormatter> {
        Self::create_formatter(FormattingOptions {
            enable_color: config.enable_color,
            table_style: config.table_style,
            output_format: config.output_format,
        })
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(FormattingOptions::default())
    }
}

/// Rendered text for both output streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// The table or JSON document for stdout
    pub stdout: String,
    /// Skipped-file summary for stderr, if any file was skipped
    pub stderr: Option<String>,
}

/// Main output coordinator that handles all result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Render the whole outcome at once
    pub fn render(&self, outcome: &ReportOutcome) -> Result<RenderedReport> {
        let stdout = self.formatter.format_report(&outcome.rows)?;
        let stderr = if outcome.skipped.is_empty() {
            None
        } else {
            Some(self.formatter.format_skipped(&outcome.skipped)?)
        };

        Ok(RenderedReport { stdout, stderr })
    }
}
