//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, config::env::EnvManager, error::Result, models::Config};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Load from environment file if it exists
        EnvManager::load_env_file(self.cli.debug)?;

        self.parse_with_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from defaults, the given variable lookup and the CLI
    pub fn parse_with_vars<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with default configuration
        let mut config = Config::default();

        config.merge_from_vars(lookup)?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config);

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if !self.cli.paths.is_empty() {
            config.inputs = self.cli.paths.clone();
        }

        if let Some(style) = self.cli.style {
            config.table_style = style;
        }

        if let Some(units) = self.cli.units {
            config.size_units = units;
        }

        if let Some(format) = self.cli.format {
            config.output_format = format;
        }

        if self.cli.ping_precision.is_some() {
            config.ping_precision = self.cli.ping_precision;
        }

        if self.cli.keep_going {
            config.keep_going = true;
        }

        // --color forces color, --no-color disables it, otherwise detect
        if self.cli.color || self.cli.no_color {
            config.enable_color = self.cli.use_colors();
        } else {
            config.enable_color = config.enable_color && self.cli.use_colors();
        }

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            eprintln!("Applied CLI overrides to configuration");
            eprintln!(
                "Final config: style={}, units={}, format={}, keep_going={}, enable_color={}",
                config.table_style, config.size_units, config.output_format, config.keep_going, config.enable_color
            );
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    let inputs: Vec<String> = config.inputs.iter().map(|p| p.display().to_string()).collect();
    summary.push(format!("Inputs: {}", inputs.join(", ")));
    summary.push(format!("Table Style: {}", config.table_style));
    summary.push(format!("Size Units: {}", config.size_units));
    summary.push(format!("Output Format: {}", config.output_format));
    summary.push(format!(
        "Ping Precision: {}",
        config
            .ping_precision
            .map(|p| p.to_string())
            .unwrap_or_else(|| "as recorded".to_string())
    ));
    summary.push(format!("Keep Going: {}", config.keep_going));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
