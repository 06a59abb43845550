//! Configuration data model and validation

use crate::models::report::RowOptions;
use crate::types::{AppError, OutputFormat, Result, SizeUnits, TableStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted `ping_precision`
pub const MAX_PING_PRECISION: usize = 15;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Result files or directories to report on
    #[serde(default = "default_inputs")]
    pub inputs: Vec<PathBuf>,

    /// Border layout of the report table
    #[serde(default)]
    pub table_style: TableStyle,

    /// Unit system for throughput values
    #[serde(default)]
    pub size_units: SizeUnits,

    /// Table or JSON output
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Fixed number of decimals for the ping column
    #[serde(default)]
    pub ping_precision: Option<usize>,

    /// Skip files that fail to parse instead of aborting
    #[serde(default)]
    pub keep_going: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            table_style: TableStyle::default(),
            size_units: SizeUnits::default(),
            output_format: OutputFormat::default(),
            ping_precision: None,
            keep_going: false,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used when deriving display rows
    pub fn row_options(&self) -> RowOptions {
        RowOptions {
            size_units: self.size_units,
            ping_precision: self.ping_precision,
        }
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(AppError::config("At least one input path is required"));
        }

        for input in &self.inputs {
            if input.as_os_str().is_empty() {
                return Err(AppError::config("Input path cannot be empty"));
            }
        }

        if let Some(precision) = self.ping_precision {
            if precision > MAX_PING_PRECISION {
                return Err(AppError::config(format!(
                    "Ping precision cannot exceed {} (got {})",
                    MAX_PING_PRECISION, precision
                )));
            }
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_vars(|name| std::env::var(name).ok())
    }

    /// Merge settings from a variable lookup such as the process environment
    pub fn merge_from_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(style) = lookup("REPORT_TABLE_STYLE") {
            self.table_style = style
                .parse()
                .map_err(|e| AppError::config(format!("Invalid REPORT_TABLE_STYLE value '{}': {}", style, e)))?;
        }

        if let Some(units) = lookup("REPORT_SIZE_UNITS") {
            self.size_units = units
                .parse()
                .map_err(|e| AppError::config(format!("Invalid REPORT_SIZE_UNITS value '{}': {}", units, e)))?;
        }

        if let Some(format) = lookup("REPORT_FORMAT") {
            self.output_format = format
                .parse()
                .map_err(|e| AppError::config(format!("Invalid REPORT_FORMAT value '{}': {}", format, e)))?;
        }

        if let Some(precision) = lookup("REPORT_PING_PRECISION") {
            self.ping_precision = Some(precision.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid REPORT_PING_PRECISION value '{}': {}", precision, e))
            })?);
        }

        if let Some(keep_going) = lookup("REPORT_KEEP_GOING") {
            self.keep_going = keep_going
                .trim()
                .parse()
                .map_err(|e| AppError::config(format!("Invalid REPORT_KEEP_GOING value '{}': {}", keep_going, e)))?;
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color
                .trim()
                .parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        // Any value of NO_COLOR, even empty, turns color off
        if lookup("NO_COLOR").is_some() {
            self.enable_color = false;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_inputs() -> Vec<PathBuf> {
    vec![PathBuf::from(crate::defaults::DEFAULT_INPUT)]
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
