//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::{AppError, Result},
    models::report::{ReportRow, SkippedFile, REPORT_HEADERS},
    types::{OutputFormat, TableStyle},
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format the collected report rows
    fn format_report(&self, rows: &[ReportRow]) -> Result<String>;

    /// Format the list of files skipped under per-file isolation
    fn format_skipped(&self, skipped: &[SkippedFile]) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Border layout of the report table
    pub table_style: TableStyle,
    /// Table or JSON output
    pub output_format: OutputFormat,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: false,
            table_style: TableStyle::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Table formatting configuration
#[derive(Debug, Clone)]
pub struct TableFormat {
    /// Column headers, in display order
    pub headers: Vec<String>,
    /// Border layout
    pub style: TableStyle,
    /// Extra width reserved beyond each header's own length
    pub min_padding: usize,
}

impl TableFormat {
    /// Left-aligned columns with the given headers
    pub fn with_headers(headers: &[&str], style: TableStyle) -> Self {
        Self {
            headers: headers.iter().map(|header| header.to_string()).collect(),
            style,
            min_padding: 2,
        }
    }
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// A horizontal rule: left edge, fill, column junction, right edge
struct Rule {
    begin: &'static str,
    fill: &'static str,
    junction: &'static str,
    end: &'static str,
}

/// Vertical separators of a data or header row
struct RowBorders {
    begin: &'static str,
    separator: &'static str,
    end: &'static str,
}

struct Borders {
    above: Option<Rule>,
    below_header: Option<Rule>,
    between_rows: Option<Rule>,
    below: Option<Rule>,
    row: RowBorders,
    /// Spaces on each side of a cell
    padding: usize,
}

impl Borders {
    fn for_style(style: TableStyle) -> Self {
        match style {
            TableStyle::FancyGrid => Self {
                above: Some(Rule { begin: "╒", fill: "═", junction: "╤", end: "╕" }),
                below_header: Some(Rule { begin: "╞", fill: "═", junction: "╪", end: "╡" }),
                between_rows: Some(Rule { begin: "├", fill: "─", junction: "┼", end: "┤" }),
                below: Some(Rule { begin: "╘", fill: "═", junction: "╧", end: "╛" }),
                row: RowBorders { begin: "│", separator: "│", end: "│" },
                padding: 1,
            },
            TableStyle::Grid => Self {
                above: Some(Rule { begin: "+", fill: "-", junction: "+", end: "+" }),
                below_header: Some(Rule { begin: "+", fill: "=", junction: "+", end: "+" }),
                between_rows: Some(Rule { begin: "+", fill: "-", junction: "+", end: "+" }),
                below: Some(Rule { begin: "+", fill: "-", junction: "+", end: "+" }),
                row: RowBorders { begin: "|", separator: "|", end: "|" },
                padding: 1,
            },
            TableStyle::Simple => Self {
                above: None,
                below_header: Some(Rule { begin: "", fill: "-", junction: "  ", end: "" }),
                between_rows: None,
                below: None,
                row: RowBorders { begin: "", separator: "  ", end: "" },
                padding: 0,
            },
        }
    }
}

/// Display width of a cell
fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Spaces needed to left-align `text` in a column of `width`
fn fill_width(text: &str, width: usize) -> usize {
    width.saturating_sub(text_width(text))
}

/// Calculate column widths from headers and content
fn calculate_column_widths(format: &TableFormat, rows: &[RowData]) -> Vec<usize> {
    let num_columns = format.headers.len().max(rows.iter().map(|r| r.len()).max().unwrap_or(0));

    (0..num_columns)
        .map(|col_idx| {
            let header_width = format
                .headers
                .get(col_idx)
                .map(|header| text_width(header) + format.min_padding)
                .unwrap_or(0);

            rows.iter()
                .filter_map(|row| row.get(col_idx))
                .map(|cell| text_width(cell))
                .fold(header_width, usize::max)
        })
        .collect()
}

fn create_rule(rule: &Rule, widths: &[usize], padding: usize) -> String {
    let segments: Vec<String> = widths.iter().map(|w| rule.fill.repeat(w + 2 * padding)).collect();
    format!("{}{}{}", rule.begin, segments.join(rule.junction), rule.end)
}

fn create_row(
    cells: &[String],
    widths: &[usize],
    borders: &Borders,
    style_cell: &dyn Fn(String) -> String,
) -> String {
    let pad = " ".repeat(borders.padding);
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(idx, &width)| {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let fill = " ".repeat(fill_width(cell, width));
            format!("{}{}{}{}", pad, style_cell(cell.to_string()), fill, pad)
        })
        .collect();

    let row = format!("{}{}{}", borders.row.begin, padded.join(borders.row.separator), borders.row.end);
    row.trim_end().to_string()
}

/// Render a table with the given format and data.
///
/// `style_header` is applied to the text of each header cell before padding,
/// so it may add escape sequences without disturbing column widths.
pub fn render_table(format: &TableFormat, rows: &[RowData], style_header: &dyn Fn(String) -> String) -> String {
    let borders = Borders::for_style(format.style);
    let widths = calculate_column_widths(format, rows);
    let mut lines = Vec::new();

    if let Some(rule) = &borders.above {
        lines.push(create_rule(rule, &widths, borders.padding));
    }

    lines.push(create_row(&format.headers, &widths, &borders, style_header));
    if let Some(rule) = &borders.below_header {
        lines.push(create_rule(rule, &widths, borders.padding));
    }

    let plain = |cell: String| cell;
    for (idx, row) in rows.iter().enumerate() {
        if idx > 0 {
            if let Some(rule) = &borders.between_rows {
                lines.push(create_rule(rule, &widths, borders.padding));
            }
        }
        lines.push(create_row(row, &widths, &borders, &plain));
    }

    if let Some(rule) = &borders.below {
        lines.push(create_rule(rule, &widths, borders.padding));
    }

    lines.join("\n")
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Table layout used for the report
    pub fn report_format(&self) -> TableFormat {
        TableFormat::with_headers(&REPORT_HEADERS, self.options.table_style)
    }

    /// Render report rows, styling header cells with the given function
    pub(crate) fn render_report(&self, rows: &[ReportRow], style_header: &dyn Fn(String) -> String) -> String {
        let data: Vec<RowData> = rows.iter().map(ReportRow::cells).collect();
        render_table(&self.report_format(), &data, style_header)
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_report(&self, rows: &[ReportRow]) -> Result<String> {
        Ok(self.render_report(rows, &|cell: String| cell))
    }

    fn format_skipped(&self, skipped: &[SkippedFile]) -> Result<String> {
        let mut output = String::new();
        if skipped.is_empty() {
            return Ok(output);
        }

        write!(output, "Skipped {} file(s):", skipped.len())
            .map_err(|e| AppError::io(format!("Failed to format skipped files: {}", e)))?;
        for entry in skipped {
            write!(output, "\n  - {}", entry.error.format_for_console(false))
                .map_err(|e| AppError::io(format!("Failed to format skipped files: {}", e)))?;
        }

        Ok(output)
    }
}

/// JSON formatter emitting the rows as an array of objects
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, rows: &[ReportRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    fn format_skipped(&self, skipped: &[SkippedFile]) -> Result<String> {
        PlainFormatter::new(FormattingOptions::default()).format_skipped(skipped)
    }
}
