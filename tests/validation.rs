//! Output validation tests for speedtest-report
//!
//! These tests check the shape of the rendered table across styles and
//! option combinations rather than exact cell contents.

use assert_cmd::prelude::*;
use regex::Regex;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to create a test command
fn create_test_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("speedtest-report").unwrap();
    cmd.current_dir(dir)
        .env_remove("REPORT_TABLE_STYLE")
        .env_remove("REPORT_SIZE_UNITS")
        .env_remove("REPORT_FORMAT")
        .env_remove("REPORT_PING_PRECISION")
        .env_remove("REPORT_KEEP_GOING")
        .env_remove("ENABLE_COLOR")
        .env("NO_COLOR", "1");
    cmd
}

/// Validation patterns for the rendered report
struct OutputPatterns {
    /// Throughput cell (e.g., "13.1 MB/s", "512 Bytes/s")
    pub rate_pattern: Regex,
    /// Ping cell (e.g., "14.7 ms")
    pub ping_pattern: Regex,
    /// Any horizontal rule line of the fancy grid
    pub fancy_rule_pattern: Regex,
    /// ANSI escape sequence
    pub ansi_pattern: Regex,
}

impl Default for OutputPatterns {
    fn default() -> Self {
        Self {
            rate_pattern: Regex::new(r"\b\d+(\.\d)? (Bytes?|kB|MB|GB|TB)/s\b").unwrap(),
            ping_pattern: Regex::new(r"\b\d+(\.\d+)? ms\b").unwrap(),
            fancy_rule_pattern: Regex::new(r"^[╒╞├╘][═─]+([╤╪┼╧][═─]+)*[╕╡┤╛]$").unwrap(),
            ansi_pattern: Regex::new(r"\x1b\[[0-9;]*m").unwrap(),
        }
    }
}

fn record(download: f64, upload: f64, ping: f64) -> Value {
    json!({
        "download": download,
        "upload": upload,
        "ping": ping,
        "server": {
            "url": "http://speedtest.example.org/upload.php",
            "lat": "51.5074", "lon": "-0.1278",
            "name": "London", "country": "United Kingdom", "cc": "GB",
            "sponsor": "Example Networks", "id": "4242",
            "host": "speedtest.example.org:8080",
            "d": 5.0, "latency": ping
        },
        "timestamp": "2021-01-02 03:04:05",
        "bytes_sent": 1024,
        "bytes_received": 4096,
        "share": null,
        "client": {
            "ip": "198.51.100.4", "lat": "51.5", "lon": "-0.12",
            "isp": "Example ISP", "isprating": "3.7",
            "rating": "0", "ispdlavg": "0", "ispulavg": "0", "loggedin": "0",
            "country": "GB"
        }
    })
}

/// Three files with very different magnitudes
fn populated_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let files = [
        ("london_fiber.json", record(940_000_000.0, 480_000_000.0, 3.0)),
        ("paris_adsl.json", record(4096.0, 8.0, 48.25)),
        ("berlin_lte.json", record(52_428_800.0, 10_485_760.0, 31.123)),
    ];
    for (name, value) in files {
        fs::write(dir.path().join(name), value.to_string()).unwrap();
    }
    dir
}

fn run_stdout(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

/// Test that every line of every style has the same display width
#[test]
fn test_table_lines_are_aligned() {
    let dir = populated_dir();

    for style in ["fancy_grid", "grid", "simple"] {
        let stdout = run_stdout(create_test_cmd(dir.path()).args(["--style", style]));
        let widths: Vec<usize> = stdout
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.trim_end().chars().count())
            .collect();

        if style == "simple" {
            // Rows are right-trimmed; the rule under the header is the widest line
            assert!(widths.iter().all(|w| *w <= widths[1]), "{}: {:?}", style, widths);
        } else {
            assert!(widths.windows(2).all(|w| w[0] == w[1]), "{}: {:?}", style, widths);
        }
    }
}

/// Test the fancy grid structure: rules between every row
#[test]
fn test_fancy_grid_structure() {
    let patterns = OutputPatterns::default();
    let dir = populated_dir();
    let stdout = run_stdout(&mut create_test_cmd(dir.path()));
    let lines: Vec<&str> = stdout.lines().collect();

    // top, header, header rule, 3 rows, 2 separators, bottom
    assert_eq!(lines.len(), 9);
    for idx in [0, 2, 4, 6, 8] {
        assert!(patterns.fancy_rule_pattern.is_match(lines[idx]), "line {}: {}", idx, lines[idx]);
    }
    assert!(lines[2].starts_with('╞'));
    assert!(lines[4].starts_with('├'));
    assert!(lines[8].starts_with('╘'));
}

/// Test that data cells carry the expected units
#[test]
fn test_cell_formats() {
    let patterns = OutputPatterns::default();
    let dir = populated_dir();
    let stdout = run_stdout(&mut create_test_cmd(dir.path()));

    assert_eq!(patterns.rate_pattern.find_iter(&stdout).count(), 6);
    assert_eq!(patterns.ping_pattern.find_iter(&stdout).count(), 3);

    assert!(stdout.contains("117.5 MB/s"));
    assert!(stdout.contains("60.0 MB/s"));
    assert!(stdout.contains("512 Bytes/s"));
    assert!(stdout.contains("1 Byte/s"));
    assert!(stdout.contains("3.0 ms"));
    assert!(stdout.contains("48.25 ms"));
    assert!(stdout.contains("31.123 ms"));
}

/// Test that rows follow file name order
#[test]
fn test_row_order() {
    let dir = populated_dir();
    let stdout = run_stdout(&mut create_test_cmd(dir.path()));
    let locations: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.strip_prefix("│ "))
        .map(|l| l.split_whitespace().next().unwrap_or(""))
        .collect();

    assert_eq!(locations, vec!["Location", "berlin", "london", "paris"]);
}

/// Test that piped output carries no color codes unless forced
#[test]
fn test_plain_and_colored_output() {
    let patterns = OutputPatterns::default();
    let dir = populated_dir();

    let plain = run_stdout(&mut create_test_cmd(dir.path()));
    assert!(!patterns.ansi_pattern.is_match(&plain));

    let colored = run_stdout(create_test_cmd(dir.path()).arg("--color"));
    assert!(patterns.ansi_pattern.is_match(&colored));
    assert_eq!(patterns.ansi_pattern.replace_all(&colored, ""), plain);
}

/// Test that logging never reaches stdout
#[test]
fn test_debug_output_goes_to_stderr() {
    let dir = populated_dir();
    let output = create_test_cmd(dir.path()).arg("--debug").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stdout.starts_with('╒'));
    assert!(stderr.contains("Debug mode enabled"));

    // Structured log lines are JSON objects in debug mode
    let log_lines: Vec<Value> = stderr
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(!log_lines.is_empty());
    assert!(log_lines.iter().all(|entry| entry["fields"]["session_id"].is_string()));
}

/// Test JSON output with per-file isolation
#[test]
fn test_json_output_with_skipped_files() {
    let dir = populated_dir();
    fs::write(dir.path().join("rome_wifi.json"), "[]").unwrap();

    let output = create_test_cmd(dir.path())
        .args(["--format", "json", "--keep-going"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.as_object().unwrap().len() == 5));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(Regex::new(r"Skipped 1 file\(s\):\n\s+- \[FIELD_TYPE\] .*rome_wifi\.json").unwrap().is_match(&stderr));
}
