// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! tcutils - path, configuration, and adapter utilities.
//!
//! This is the binary entry point.

mod adapters;
mod builtin;
mod config;
mod files;
mod paths;
mod settings;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::adapters::{run_adapters, AdaptersCommand};
use crate::config::{run_config, ConfigCommand};
use crate::files::{run_fs, FsCommand};
use crate::paths::{run_paths, PathsCommand};

/// tcutils - path, configuration, and adapter utilities.
#[derive(Parser, Debug)]
#[command(name = "tcutils", version, about, long_about = None)]
struct Cli {
    /// Settings file (YAML). `TCUTILS_*` variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize, join, and create paths.
    #[command(subcommand)]
    Paths(PathsCommand),
    /// File name and permission helpers.
    #[command(subcommand)]
    Fs(FsCommand),
    /// Read YAML configuration files.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Discover and run adapters.
    #[command(subcommand)]
    Adapters(AdaptersCommand),
}

fn main() {
    let cli = Cli::parse();

    let settings = match settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(errors) => {
            tcutils_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, &settings.log_level);
    let plain = cli.plain || !std::io::stderr().is_terminal();

    let result = match &cli.command {
        Commands::Paths(command) => run_paths(command).map(|paths| {
            paths
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }),
        Commands::Fs(command) => run_fs(command).map(|lines| lines.join("\n")),
        Commands::Config(command) => match run_config(command) {
            Ok(out) => Ok(out),
            Err(err) => {
                tcutils_config::render_errors(&[err]);
                std::process::exit(1);
            }
        },
        Commands::Adapters(command) => run_adapters(command, &settings),
    };

    match result {
        Ok(out) => {
            let out = out.trim_end();
            if !out.is_empty() {
                println!("{out}");
            }
        }
        Err(err) => {
            if plain {
                eprintln!("error: {err}");
            } else {
                eprintln!("{}: {err}", "error".red());
            }
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// `RUST_LOG` wins over both `--verbose` and the configured level.
fn init_tracing(verbose: u8, log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => log_level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tcutils={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_adapter_exec() {
        let cli = Cli::try_parse_from([
            "tcutils", "-vv", "adapters", "exec", "echo", "--method", "upper", "--set", "k=v",
            "a", "b",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Adapters(AdaptersCommand::Exec {
                name,
                method,
                named,
                args,
                ..
            }) => {
                assert_eq!(name, "echo");
                assert_eq!(method.as_deref(), Some("upper"));
                assert_eq!(named, vec![("k".to_string(), "v".to_string())]);
                assert_eq!(args, vec!["a", "b"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_permission_modes() {
        assert!(Cli::try_parse_from(["tcutils", "fs", "perms", "9x9"]).is_err());
        assert!(Cli::try_parse_from(["tcutils", "fs", "perms", "0755"]).is_ok());
    }
}
