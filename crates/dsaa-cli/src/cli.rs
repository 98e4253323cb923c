//! Command-line argument parsing for `dsaa`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Language detection, linting and remote debugging for source files
#[derive(Parser, Debug)]
#[command(name = "dsaa", version, about = "Code debugger toolkit")]
pub struct CliArgs {
    /// YAML configuration file
    #[arg(long, global = true, env = "DSAA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug/analysis service base URL (overrides the config file)
    #[arg(long, global = true, env = "DSAA_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the detected language label
    Classify {
        /// Source file
        file: PathBuf,
    },
    /// Run the heuristic line linter
    Lint {
        /// Source file
        file: PathBuf,
    },
    /// Overlay issues from a saved debug response onto a file
    Overlay {
        /// Source file
        file: PathBuf,
        /// JSON file shaped like a debug response (`{ "issues": [...] }`)
        #[arg(long, value_name = "JSON")]
        issues: PathBuf,
        /// Print decorations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send a file to the debug service and overlay the reported issues
    Debug {
        /// Source file
        file: PathBuf,
        /// Error output observed when running the code
        #[arg(long, default_value = "")]
        error_message: String,
    },
    /// Ask the analysis service for a complexity report
    Analyze {
        /// Source file
        file: PathBuf,
    },
    /// Check that the service is reachable and up
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_debug_command() {
        let args = CliArgs::try_parse_from([
            "dsaa",
            "--endpoint",
            "http://127.0.0.1:9000",
            "debug",
            "main.cpp",
            "--error-message",
            "segfault",
        ])
        .unwrap();

        assert_eq!(args.endpoint.as_deref(), Some("http://127.0.0.1:9000"));
        match args.command {
            Command::Debug {
                file,
                error_message,
            } => {
                assert_eq!(file, PathBuf::from("main.cpp"));
                assert_eq!(error_message, "segfault");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_health_command() {
        let args = CliArgs::try_parse_from(["dsaa", "health"]).unwrap();
        assert!(matches!(args.command, Command::Health));
    }

    #[test]
    fn test_overlay_requires_issues() {
        assert!(CliArgs::try_parse_from(["dsaa", "overlay", "a.py"]).is_err());
    }
}
