use std::path::PathBuf;

use common::logger::LogFormat;

use crate::cli::Cli;

/// How the result is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bare minimum price, one line.
    #[default]
    Plain,
    /// Full [`leveling::ScanReport`] as a JSON object.
    Json,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Input file; stdin when `None`.
    pub input: Option<PathBuf>,

    pub output: OutputFormat,

    /// JSON logs in production, human-readable otherwise.
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
        Self::for_environment(is_production)
    }

    fn for_environment(is_production: bool) -> Self {
        Self {
            input: None,
            output: OutputFormat::Plain,
            log_format: if is_production {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
        }
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.input {
            self.input = Some(path.clone());
        }
        if cli.json {
            self.output = OutputFormat::Json;
        }
        if cli.log_json {
            self.log_format = LogFormat::Json;
        }
        self
    }
}
