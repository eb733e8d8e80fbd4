use clap::{Parser, Subcommand, ValueEnum};
use pipemeta_core::Selection;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipemeta")]
#[command(about = "Query pipeline build metadata and progress", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (default: _targets, or PIPEMETA_STORE)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List targets last built before a threshold
    Older {
        /// Threshold instant (RFC 3339, "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD", UTC)
        threshold: String,

        /// Restrict to these names (a,b | starts_with:x | ends_with:x | contains:x | matches:re | everything)
        #[arg(long)]
        names: Option<Selection>,

        /// Also match targets built exactly at the threshold
        #[arg(long, value_name = "BOOL", num_args = 0..=1, default_value = "false", default_missing_value = "true")]
        inclusive: String,
    },

    /// List targets last built after a threshold
    Newer {
        /// Threshold instant (RFC 3339, "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD", UTC)
        threshold: String,

        /// Restrict to these names
        #[arg(long)]
        names: Option<Selection>,

        /// Also match targets built exactly at the threshold
        #[arg(long, value_name = "BOOL", num_args = 0..=1, default_value = "false", default_missing_value = "true")]
        inclusive: String,
    },

    /// List targets whose last run errored
    Errored {
        /// Restrict to these names
        #[arg(long)]
        names: Option<Selection>,
    },

    /// List targets whose last run ended in the given status
    Status {
        /// built, errored, canceled, running, skipped, dispatched, completed, queued
        status: String,

        /// Restrict to these names
        #[arg(long)]
        names: Option<Selection>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_flag_forms() {
        let cli = Cli::parse_from(["pipemeta", "older", "2024-01-01", "--inclusive"]);
        match cli.command {
            Commands::Older { inclusive, .. } => assert_eq!(inclusive, "true"),
            _ => panic!("expected older"),
        }

        let cli = Cli::parse_from(["pipemeta", "older", "2024-01-01"]);
        match cli.command {
            Commands::Older { inclusive, names, .. } => {
                assert_eq!(inclusive, "false");
                assert!(names.is_none());
            }
            _ => panic!("expected older"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "pipemeta",
            "errored",
            "--names",
            "starts_with:model",
            "--store",
            "/tmp/store",
            "--format",
            "json",
        ]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/store")));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Errored { names: Some(_) }));
    }

    #[test]
    fn test_bad_selector_is_rejected_by_parser() {
        let parsed = Cli::try_parse_from(["pipemeta", "errored", "--names", "matches:("]);
        assert!(parsed.is_err());
    }
}
