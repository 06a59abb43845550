//! Colored formatter implementation with terminal color support
//!
//! Wraps the plain table layout and adds ANSI styling to the header row and
//! to the skipped-file summary. Column widths are computed before styling.

use super::formatter::{FormattingOptions, OutputFormatter, PlainFormatter};
use crate::{
    error::{AppError, Result},
    models::report::{ReportRow, SkippedFile},
};
use colored::*;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            warning: Color::Yellow,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self::with_color_scheme(options, ColorScheme::default())
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        let plain_formatter = PlainFormatter::new(options.clone());
        Self {
            plain_formatter,
            options,
            color_scheme,
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Style the text of one header cell
    fn header_cell(&self, cell: String) -> String {
        if self.options.enable_color {
            cell.color(self.color_scheme.header).bold().to_string()
        } else {
            cell
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_report(&self, rows: &[ReportRow]) -> Result<String> {
        Ok(self.plain_formatter.render_report(rows, &|cell: String| self.header_cell(cell)))
    }

    fn format_skipped(&self, skipped: &[SkippedFile]) -> Result<String> {
        let mut output = String::new();
        if skipped.is_empty() {
            return Ok(output);
        }

        let title = format!("Skipped {} file(s):", skipped.len());
        write!(output, "{}", self.colorize(&title, self.color_scheme.warning).bold())
            .map_err(|e| AppError::io(format!("Failed to format skipped files: {}", e)))?;

        for entry in skipped {
            write!(
                output,
                "\n  {} {}",
                self.colorize("-", self.color_scheme.muted),
                entry.error.format_for_console(self.options.enable_color)
            )
            .map_err(|e| AppError::io(format!("Failed to format skipped files: {}", e)))?;
        }

        Ok(output)
    }
}
