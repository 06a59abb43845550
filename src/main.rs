//! Speedtest Report - Main CLI Application
//!
//! Reads stored speed-test result files and prints a throughput and latency
//! table to standard output.

use clap::Parser;
use speedtest_report::{
    app::App,
    cli::Cli,
    config::{display_config_summary, env::ENV_FILE, load_config, EnvManager},
    error::{AppError, ErrorContext, ErrorReporter, Result},
    PKG_NAME, VERSION,
};
use std::io::{self, Write};
use std::path::Path;
use std::process;

fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    // Parse command line arguments
    let cli = Cli::parse();
    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    // Handle the actual application logic
    match run_application(cli) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            reporter.report_error(&e);

            // Verbose reports already explain the error
            if !reporter.verbose {
                print_error_suggestions(&e);
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic, returning the process exit code
fn run_application(cli: Cli) -> Result<i32> {
    cli.validate().map_err(AppError::config)?;

    // Show debug info if requested
    if cli.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        eprintln!("Debug mode enabled");
        eprint!("{}", cli.get_config_summary());
        eprintln!();
    }

    // Load and validate configuration
    let config = load_config(cli)?;

    if config.debug {
        eprintln!("Configuration loaded successfully:");
        eprintln!("{}", display_config_summary(&config));
        for warning in EnvManager::validate_current_env() {
            eprintln!("{}", warning);
        }
        if let Some(warnings) = EnvManager::check_env_file(Path::new(ENV_FILE))? {
            for warning in warnings {
                eprintln!("{}: {}", ENV_FILE, warning);
            }
        }
        eprintln!();
    }

    colored::control::set_override(config.enable_color);

    let app = App::new(config);
    let outcome = app.run()?;
    let rendered = app.render(&outcome)?;

    // The report is written in one piece after every file was processed
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.stdout).context("Failed to write report")?;
    stdout.flush().context("Failed to write report")?;

    if let Some(summary) = rendered.stderr {
        eprintln!("{}", summary);
    }

    Ok(outcome.failure_exit_code().unwrap_or(0))
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error.root_cause() {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Run with --help to list accepted values");
            eprintln!("  - --ping-precision must be between 0 and 15");
        }
        AppError::NamingConvention(_) => {
            eprintln!();
            eprintln!("Naming help:");
            eprintln!("  - Result files must be named <location>_<network>.json");
            eprintln!("  - Use --keep-going to skip files that do not follow the convention");
        }
        AppError::FieldType { .. }
        | AppError::FieldMissing(_)
        | AppError::DateParse(_)
        | AppError::Validation(_)
        | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Record help:");
            eprintln!("  - Check that the file is complete speed-test JSON output");
            eprintln!("  - Use --keep-going to report the remaining files");
        }
        _ => {}
    }
}
