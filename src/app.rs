//! Main application orchestration and execution
//!
//! Discovers the inputs, turns each file into a report row and renders the
//! collected rows once every file has been processed.

use crate::{
    discovery::{discover_inputs, Labels},
    error::{AppError, Result},
    log_debug, log_info,
    logging::{ErrorEventLogger, Logger, LoggerFactory},
    models::{Config, ReportOutcome, ReportRow, RowOptions, SkippedFile, SpeedTest},
    output::{OutputCoordinator, OutputFormatterFactory, RenderedReport},
};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
    logger: Logger,
    error_logger: ErrorEventLogger,
}

impl App {
    /// Create a new application instance from a validated configuration
    pub fn new(config: Config) -> Self {
        let loggers = LoggerFactory::new(config.clone());
        let logger = loggers.create_logger("APP");
        let error_logger = loggers.create_error_logger();

        Self {
            config,
            loggers,
            logger,
            error_logger,
        }
    }

    /// Process every input file.
    ///
    /// Fails on the first bad file unless `keep_going` is set, in which case
    /// record-level failures are collected in the outcome instead.
    pub fn run(&self) -> Result<ReportOutcome> {
        let started = Instant::now();
        let files = discover_inputs(&self.config.inputs)?;
        log_info!(self.logger, "Discovered {} result file(s)", files.len());

        let options = self.config.row_options();
        let mut perf = self.loggers.create_performance_logger();
        let mut outcome = ReportOutcome::default();

        for path in &files {
            let display = path.display().to_string();

            perf.start_timing(&display);
            let result = process_file(path, &options);
            perf.end_timing(&display);

            match result {
                Ok(row) => {
                    log_debug!(self.logger, "Parsed {} as {}/{}", display, row.location, row.network);
                    outcome.rows.push(row);
                }
                Err(error) => {
                    let error = AppError::in_file(display.clone(), error);
                    if !(self.config.keep_going && error.is_record_error()) {
                        log_debug!(self.logger, "Aborting on {}", display);
                        return Err(error);
                    }

                    self.error_logger
                        .log_skipped(&display, &error, Some(self.loggers.session_id()));
                    outcome.skipped.push(SkippedFile { path: display, error });
                }
            }
        }

        perf.log_run_summary(files.len(), outcome.rows.len(), outcome.skipped.len(), started.elapsed());
        Ok(outcome)
    }

    /// Render an outcome with the formatter chosen by the configuration
    pub fn render(&self, outcome: &ReportOutcome) -> Result<RenderedReport> {
        let coordinator = OutputCoordinator::new(OutputFormatterFactory::from_config(&self.config));
        coordinator.render(outcome)
    }
}

/// Read, parse and label a single result file
pub fn process_file(path: &Path, options: &RowOptions) -> Result<ReportRow> {
    let labels = Labels::from_path(path)?;
    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read {}: {}", path.display(), e)))?;
    let record = SpeedTest::from_json_str(&contents)?;

    Ok(ReportRow::from_record(&record, labels, options))
}
