//! briefmark CLI - score generated short descriptions.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Review {
            file,
            port,
            no_open,
            output_dir,
            reload,
            fresh,
            no_autosave,
        } => commands::review::run(
            file,
            port,
            no_open,
            cli::review_config(output_dir, reload, no_autosave),
            fresh,
            cli.verbose,
        ),

        Commands::Label {
            file,
            output_dir,
            fresh,
            no_autosave,
        } => commands::label::run(
            file,
            cli::review_config(output_dir, Default::default(), no_autosave),
            fresh,
            cli.verbose,
        ),

        Commands::Status {
            file,
            output_dir,
            json,
        } => commands::status::run(file, output_dir, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
