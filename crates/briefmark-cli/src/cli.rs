//! CLI argument definitions using clap.

use std::path::PathBuf;

use briefmark::{ReloadPolicy, ReviewConfig};
use clap::{Parser, Subcommand};

/// briefmark: score generated short descriptions on a 1-5 scale
#[derive(Parser)]
#[command(name = "briefmark")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the web UI for reviewing records
    Review {
        /// Records file to preload (JSON list of objects)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Directory for exports and session snapshots (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// What an upload does to a running session: keep, new-source, always
        #[arg(long, default_value = "new-source")]
        reload: ReloadPolicy,

        /// Ignore any saved snapshot and start from the first record
        #[arg(long)]
        fresh: bool,

        /// Don't save a snapshot after every change
        #[arg(long)]
        no_autosave: bool,
    },

    /// Review records in the terminal
    Label {
        /// Records file (JSON list of objects)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for exports and session snapshots (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Ignore any saved snapshot and start from the first record
        #[arg(long)]
        fresh: bool,

        /// Don't save a snapshot after every change
        #[arg(long)]
        no_autosave: bool,
    },

    /// Show progress of a saved session
    Status {
        /// Session snapshot, or the records file it was made from
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory holding session snapshots
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the review configuration from command-line options.
pub fn review_config(
    output_dir: Option<PathBuf>,
    reload: ReloadPolicy,
    no_autosave: bool,
) -> ReviewConfig {
    let config = ReviewConfig::new()
        .with_reload_policy(reload)
        .with_autosave(!no_autosave);

    match output_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_defaults() {
        let cli = Cli::parse_from(["briefmark", "review"]);
        match cli.command {
            Commands::Review {
                file,
                port,
                no_open,
                reload,
                fresh,
                ..
            } => {
                assert!(file.is_none());
                assert_eq!(port, 3141);
                assert!(!no_open);
                assert_eq!(reload, ReloadPolicy::ResetOnNewSource);
                assert!(!fresh);
            }
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn test_parse_reload_policy() {
        let cli = Cli::parse_from(["briefmark", "review", "--reload", "keep", "cases.json"]);
        match cli.command {
            Commands::Review { file, reload, .. } => {
                assert_eq!(file, Some(PathBuf::from("cases.json")));
                assert_eq!(reload, ReloadPolicy::KeepExisting);
            }
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn test_review_config() {
        let config = review_config(Some(PathBuf::from("out")), ReloadPolicy::AlwaysReset, true);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.reload_policy, ReloadPolicy::AlwaysReset);
        assert!(!config.autosave);
    }
}
