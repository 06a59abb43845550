//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::models::config::MAX_PING_PRECISION;
use crate::types::{OutputFormat, SizeUnits, TableStyle};
use std::path::Path;

/// Name of the optional environment file in the working directory
pub const ENV_FILE: &str = ".env";

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the working directory if it exists
    pub fn load_env_file(debug: bool) -> Result<bool> {
        Self::load_env_file_from(Path::new(ENV_FILE), debug)
    }

    /// Load an environment file if it exists.
    ///
    /// Variables already set in the process environment are not replaced.
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<bool> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {} file: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
            Ok(true)
        } else {
            if debug {
                eprintln!("No {} file found, using defaults and CLI arguments", path.display());
            }
            Ok(false)
        }
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "REPORT_TABLE_STYLE" => {
                value.parse::<TableStyle>()?;
            }
            "REPORT_SIZE_UNITS" => {
                value.parse::<SizeUnits>()?;
            }
            "REPORT_FORMAT" => {
                value.parse::<OutputFormat>()?;
            }
            "REPORT_PING_PRECISION" => {
                let precision: usize = value
                    .trim()
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid REPORT_PING_PRECISION value '{}': {}", value, e)))?;
                if precision > MAX_PING_PRECISION {
                    return Err(AppError::config(format!(
                        "REPORT_PING_PRECISION must be between 0 and {}, got: {}",
                        MAX_PING_PRECISION, precision
                    )));
                }
            }
            "REPORT_KEEP_GOING" | "ENABLE_COLOR" => {
                value
                    .trim()
                    .parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("REPORT_TABLE_STYLE", "Table border style (fancy_grid, grid, simple)", "grid"),
            ("REPORT_SIZE_UNITS", "Throughput units (decimal, binary, gnu)", "binary"),
            ("REPORT_FORMAT", "Output format (table, json)", "json"),
            ("REPORT_PING_PRECISION", "Decimals shown for ping (0-15)", "1"),
            ("REPORT_KEEP_GOING", "Skip unparseable files", "true"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
            ("NO_COLOR", "Disable colored output when set to any value", "1"),
        ]
    }

    /// Environment section appended to `--help`
    pub fn display_env_help() -> String {
        let mut help = String::from("Environment variables:\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<22} {} (e.g. {})\n", var, description, example));
        }

        help.push_str("\nSettings are read from command-line arguments, then environment variables,\n");
        help.push_str(&format!("then a {} file in the working directory, then built-in defaults.", ENV_FILE));

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        warnings
    }

    /// Check an environment file and collect warnings for invalid lines
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {} file: {}", path.display(), e)))?;

        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if let Err(e) = Self::validate_env_var(key, value) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        Ok(Some(warnings))
    }
}
