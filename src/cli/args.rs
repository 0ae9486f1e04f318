// CLI argument definitions using Clap

use clap::Parser;
use std::path::PathBuf;

/// Replays recorded test-runner events and uploads the results
#[derive(Parser, Debug)]
#[command(name = "results-reporter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect test case results and upload them to a results service", long_about = None)]
pub struct Cli {
    /// Newline-delimited JSON runner events (reads stdin when omitted)
    #[arg(short = 'e', long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Print the payload instead of uploading it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Install shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,

    /// Reporter settings as key=value, e.g. results-target=TOKEN results-files=./files
    #[arg(value_name = "KEY=VALUE")]
    pub settings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_and_flags() {
        let cli = Cli::try_parse_from([
            "results-reporter",
            "--dry-run",
            "-e",
            "events.ndjson",
            "results-target=abc",
            "results-build-name=1.0",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.events, Some(PathBuf::from("events.ndjson")));
        assert_eq!(cli.settings, vec!["results-target=abc", "results-build-name=1.0"]);
    }

    #[test]
    fn test_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["results-reporter", "--completion", "tcsh"]).is_err());
    }
}
