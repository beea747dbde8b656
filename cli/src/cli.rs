use std::path::PathBuf;

use clap::Parser;
use leveling::ScanReport;

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[clap(
    name = "leveling",
    version,
    about = "Minimum cost to level any window of a stream to a single value"
)]
pub struct Cli {
    /// Read `n W` and the stream from this file (stdin when omitted)
    #[clap(long, short)]
    pub input: Option<PathBuf>,

    /// Print the full report as JSON instead of the bare minimum
    #[clap(long)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[clap(long)]
    pub log_json: bool,
}

/// Render the scan result for stdout.
pub(crate) fn render_report(report: &ScanReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Plain => Ok(report.min_price.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn report() -> ScanReport {
        ScanReport {
            window_size: 3,
            windows: 3,
            min_price: 3,
            best_window_start: 1,
        }
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_read_stdin_and_print_plain() {
        let cli = Cli::parse_from(["leveling"]);

        assert!(cli.input.is_none());
        assert!(!cli.json);
        assert!(!cli.log_json);
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::parse_from(["leveling", "-i", "stream.txt", "--json", "--log-json"]);

        assert_eq!(cli.input, Some(PathBuf::from("stream.txt")));
        assert!(cli.json);
        assert!(cli.log_json);
    }

    #[test]
    fn plain_output_is_the_bare_minimum() {
        assert_eq!(render_report(&report(), OutputFormat::Plain).unwrap(), "3");
    }

    #[test]
    fn json_output_carries_the_whole_report() {
        let out = render_report(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["min_price"], 3);
        assert_eq!(value["best_window_start"], 1);
        assert_eq!(value["windows"], 3);
        assert_eq!(value["window_size"], 3);
    }
}
