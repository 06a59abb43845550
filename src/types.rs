//! Type definitions and aliases

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Border layout used when rendering the report table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TableStyle {
    /// Box-drawing grid with a double rule under the header
    #[default]
    #[value(name = "fancy_grid", alias = "fancy-grid")]
    FancyGrid,
    /// ASCII grid using `+`, `-`, `=` and `|`
    Grid,
    /// No vertical borders, dashed rule under the header
    Simple,
}

impl TableStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FancyGrid => "fancy_grid",
            Self::Grid => "grid",
            Self::Simple => "simple",
        }
    }
}

/// Magnitude convention for human-readable sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnits {
    /// Powers of 1000 with SI suffixes (kB, MB, GB)
    #[default]
    Decimal,
    /// Powers of 1024 with IEC suffixes (KiB, MiB, GiB)
    Binary,
    /// Powers of 1024 with single-letter suffixes (K, M, G)
    Gnu,
}

impl SizeUnits {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Binary => "binary",
            Self::Gnu => "gnu",
        }
    }
}

/// How the collected rows are written to standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

macro_rules! impl_display_from_str {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self> {
                <$ty as ValueEnum>::from_str(s.trim(), true)
                    .map_err(|_| AppError::config(format!("Invalid {} '{}'", $what, s)))
            }
        }
    };
}

impl_display_from_str!(TableStyle, "table style");
impl_display_from_str!(SizeUnits, "size units");
impl_display_from_str!(OutputFormat, "output format");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_style_parsing() {
        assert_eq!("fancy_grid".parse::<TableStyle>().unwrap(), TableStyle::FancyGrid);
        assert_eq!("fancy-grid".parse::<TableStyle>().unwrap(), TableStyle::FancyGrid);
        assert_eq!("GRID".parse::<TableStyle>().unwrap(), TableStyle::Grid);
        assert_eq!(" simple ".parse::<TableStyle>().unwrap(), TableStyle::Simple);
        assert!("pipe".parse::<TableStyle>().is_err());
    }

    #[test]
    fn test_units_and_format_parsing() {
        assert_eq!("binary".parse::<SizeUnits>().unwrap(), SizeUnits::Binary);
        assert_eq!("gnu".parse::<SizeUnits>().unwrap(), SizeUnits::Gnu);
        assert!("metric".parse::<SizeUnits>().is_err());

        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for style in [TableStyle::FancyGrid, TableStyle::Grid, TableStyle::Simple] {
            assert_eq!(style.to_string().parse::<TableStyle>().unwrap(), style);
        }
        assert_eq!(SizeUnits::default().to_string(), "decimal");
        assert_eq!(OutputFormat::default().to_string(), "table");
    }
}
