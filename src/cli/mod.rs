//! Command-line interface module

use crate::config::EnvManager;
use crate::types::{OutputFormat, SizeUnits, TableStyle};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Speedtest Report - Summarize speed-test result files as a table
///
/// Each input file is named `<location>_<network>.json` and holds one
/// speed-test result. Directories are scanned for `*.json` files.
#[derive(Parser, Debug, Clone)]
#[command(name = "speedtest-report")]
#[command(version, about, long_about = None)]
#[command(after_help = EnvManager::display_env_help())]
pub struct Cli {
    /// Result files or directories to read [default: .]
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Table border style
    #[arg(short, long, value_enum)]
    pub style: Option<TableStyle>,

    /// Unit system for download and upload speeds
    #[arg(short, long, value_enum)]
    pub units: Option<SizeUnits>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Round ping values to this many decimals
    #[arg(short, long, value_name = "DIGITS", value_parser = parse_precision)]
    pub ping_precision: Option<usize>,

    /// Skip files that fail to parse and report them after the table
    #[arg(short, long)]
    pub keep_going: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err("Input paths cannot be empty".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        if self.paths.is_empty() {
            summary.push_str("  Inputs: . (default)\n");
        } else {
            let inputs: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
            summary.push_str(&format!("  Inputs: {}\n", inputs.join(", ")));
        }

        if let Some(style) = self.style {
            summary.push_str(&format!("  Table style: {}\n", style));
        }
        if let Some(units) = self.units {
            summary.push_str(&format!("  Size units: {}\n", units));
        }
        if let Some(format) = self.format {
            summary.push_str(&format!("  Output format: {}\n", format));
        }
        if let Some(precision) = self.ping_precision {
            summary.push_str(&format!("  Ping precision: {}\n", precision));
        }

        summary.push_str(&format!("  Keep going: {}\n", self.keep_going));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

/// Parse a ping precision, bounded to what float formatting can show
fn parse_precision(s: &str) -> Result<usize, String> {
    if s.starts_with('+') {
        return Err(format!("Invalid precision: {}", s));
    }

    s.parse::<usize>()
        .map_err(|_| format!("Invalid precision: {}", s))
        .and_then(|digits| {
            if digits > crate::models::config::MAX_PING_PRECISION {
                Err(format!(
                    "Precision cannot exceed {}",
                    crate::models::config::MAX_PING_PRECISION
                ))
            } else {
                Ok(digits)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Check for common environment variables that indicate color support
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Only color a report that lands on a terminal
    std::io::stdout().is_terminal()
}
