// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tcutils paths` command implementation.

use std::path::PathBuf;

use clap::Subcommand;
use tcutils_core::TcutilsError;
use tcutils_fs::{check_path, create_dirs, join_paths, normalize_path, NormalizeOptions};

#[derive(Subcommand, Debug)]
pub enum PathsCommand {
    /// Print the absolute, normalized form of a path.
    Normalize {
        path: PathBuf,
        /// Fail when the path does not exist.
        #[arg(long)]
        check: bool,
    },
    /// Join path parts and normalize the result.
    Join {
        #[arg(required = true)]
        parts: Vec<PathBuf>,
    },
    /// Create directories below a parent directory.
    Mkdir {
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
        /// Parent directory (defaults to the current directory).
        #[arg(long)]
        parent: Option<PathBuf>,
        /// Create the parent directory when it is missing.
        #[arg(long)]
        create_parent: bool,
    },
}

/// Run a `tcutils paths` subcommand, returning the lines to print.
pub fn run_paths(command: &PathsCommand) -> Result<Vec<PathBuf>, TcutilsError> {
    let options = NormalizeOptions::default();
    match command {
        PathsCommand::Normalize { path, check: true } => Ok(vec![check_path(path, options)?]),
        PathsCommand::Normalize { path, check: false } => {
            Ok(vec![normalize_path(path, options)?])
        }
        PathsCommand::Join { parts } => Ok(vec![join_paths(parts, options)?]),
        PathsCommand::Mkdir {
            dirs,
            parent,
            create_parent,
        } => create_dirs(dirs, parent.as_deref(), *create_parent, options),
    }
}
