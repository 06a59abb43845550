//! Error handling for the speed-test report generator

use thiserror::Error;

/// Custom error types for the speed-test report generator
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record field holds a value of the wrong JSON type
    #[error("Field type error: `{field}` expected {expected}, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// A required record field is absent or null
    #[error("Missing field: `{0}` is required")]
    FieldMissing(String),

    /// Input file name does not follow `<location>_<network>.json`
    #[error("Naming convention error: '{0}' must be named <location>_<network>.json")]
    NamingConvention(String),

    /// Timestamp string could not be parsed
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (JSON, numbers, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Failure while processing one input file
    #[error("Failed to process {path}")]
    File {
        path: String,
        #[source]
        source: Box<AppError>,
    },

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new field type error
    pub fn field_type<S: Into<String>, F: Into<String>>(field: S, expected: &'static str, found: F) -> Self {
        Self::FieldType {
            field: field.into(),
            expected,
            found: found.into(),
        }
    }

    /// Create a new missing field error
    pub fn field_missing<S: Into<String>>(field: S) -> Self {
        Self::FieldMissing(field.into())
    }

    /// Create a new naming convention error
    pub fn naming_convention<S: Into<String>>(file_name: S) -> Self {
        Self::NamingConvention(file_name.into())
    }

    /// Create a new date parse error
    pub fn date_parse<S: Into<String>>(message: S) -> Self {
        Self::DateParse(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Wrap an error with the input file it came from
    pub fn in_file<S: Into<String>>(path: S, source: AppError) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// The innermost error, looking through per-file wrappers
    pub fn root_cause(&self) -> &AppError {
        match self {
            Self::File { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::FieldType { .. } => "FIELD_TYPE",
            Self::FieldMissing(_) => "FIELD_MISSING",
            Self::NamingConvention(_) => "NAMING",
            Self::DateParse(_) => "DATE",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::File { source, .. } => source.category(),
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the error concerns a single input file and may be skipped
    /// when per-file isolation is enabled
    pub fn is_record_error(&self) -> bool {
        match self {
            Self::FieldType { .. }
            | Self::FieldMissing(_)
            | Self::NamingConvention(_)
            | Self::DateParse(_)
            | Self::Validation(_)
            | Self::Parse(_)
            | Self::Io(_) => true,
            Self::File { source, .. } => source.is_record_error(),
            Self::Config(_) | Self::Internal(_) => false,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::FieldType { field, expected, found } => {
                format!("Field `{}` has the wrong type (expected {}, found {}).\n\nSuggestion: The file does not match the speed-test result schema; re-export it from the speed-test tool.", field, expected, found)
            }
            Self::FieldMissing(field) => {
                format!("Field `{}` is missing.\n\nSuggestion: The file may be truncated or produced by an incompatible tool version.", field)
            }
            Self::NamingConvention(name) => {
                format!("File '{}' does not follow the naming convention.\n\nSuggestion: Rename it to <location>_<network>.json, e.g. nyc_fiber.json.", name)
            }
            Self::DateParse(msg) => {
                format!("Timestamp could not be parsed: {}\n\nSuggestion: Timestamps must be ISO-8601, e.g. 2020-05-20T18:24:51.123456Z.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the contents of the result file.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check that the path exists and is readable.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check that the file contains a single valid JSON object.", msg)
            }
            Self::File { path, source } => {
                format!("While processing {}:\n{}", path, source.user_friendly_message())
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,  // Invalid configuration/usage
            Self::NamingConvention(_) => 2,  // Caller broke the file naming contract
            Self::FieldType { .. } | Self::FieldMissing(_) | Self::DateParse(_) | Self::Validation(_) | Self::Parse(_) => 3,  // Malformed record
            Self::Io(_) => 5,  // I/O issues
            Self::File { source, .. } => source.exit_code(),
            Self::Internal(_) => 99,  // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = match self {
            Self::File { path, source } => format!("{}: {}", path, source.root_cause()),
            other => other.to_string(),
        };

        if use_color {
            use colored::Colorize;
            match self.root_cause() {
                Self::Config(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::FieldType { .. } | Self::FieldMissing(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::NamingConvention(_) | Self::DateParse(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) | Self::File { .. } => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(error: chrono::ParseError) -> Self {
        Self::date_parse(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}


/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let original_error = e.into();
            let context = f();
            AppError::internal(format!("{}: {}", context, original_error))
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

/// Writes the error that aborted a run to stderr
pub struct ErrorReporter {
    pub use_color: bool,
    /// Append the explanation and suggestion for the root cause
    pub verbose: bool,
}

impl ErrorReporter {
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Text reported for an error: the error, its cause and, when verbose,
    /// an explanation with a suggestion
    pub fn render(&self, error: &AppError) -> String {
        let label = if self.use_color {
            use colored::Colorize;
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };

        let mut output = format!("{} {}", label, error);
        if let Some(source) = std::error::Error::source(error) {
            output.push_str(&format!("\nCaused by: {}", source));
        }
        if self.verbose {
            output.push_str(&format!("\n\n{}", error.user_friendly_message()));
        }
        output
    }

    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}
