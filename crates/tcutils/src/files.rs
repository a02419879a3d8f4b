// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tcutils fs` command implementation.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tcutils_core::TcutilsError;
use tcutils_fs::{
    clean_filename_with, current_user_name, unique_path, PosixPermissions,
    DEFAULT_REPLACEMENT_CHAR, VALID_FILENAME_CHARS,
};

#[derive(Subcommand, Debug)]
pub enum FsCommand {
    /// Turn arbitrary text into a safe file name.
    Clean {
        name: String,
        /// Characters replaced before filtering.
        #[arg(long, default_value = " ")]
        replace: String,
        /// Replacement for each character in `--replace`.
        #[arg(long, default_value_t = DEFAULT_REPLACEMENT_CHAR)]
        replacement: char,
        /// Characters allowed in the result.
        #[arg(long, default_value = VALID_FILENAME_CHARS)]
        whitelist: String,
    },
    /// Show octal and symbolic forms of a permission mode.
    Perms {
        /// Three or four octal digits, e.g. `755` or `2775`.
        mode: PosixPermissions,
        /// Also apply the mode to this file (unix only).
        #[arg(long)]
        apply: Option<PathBuf>,
    },
    /// Print the first free variant of a path (`name_1.ext`, ...).
    Unique { path: PathBuf },
    /// Print the current login name.
    Whoami,
}

/// Run a `tcutils fs` subcommand, returning the lines to print.
pub fn run_fs(command: &FsCommand) -> Result<Vec<String>, TcutilsError> {
    match command {
        FsCommand::Clean {
            name,
            replace,
            replacement,
            whitelist,
        } => Ok(vec![clean_filename_with(name, whitelist, replace, *replacement)]),
        FsCommand::Perms { mode, apply } => {
            if let Some(path) = apply {
                apply_mode(*mode, path)?;
            }
            Ok(describe(*mode))
        }
        FsCommand::Unique { path } => Ok(vec![unique_path(path).display().to_string()]),
        FsCommand::Whoami => {
            let name = current_user_name().ok_or_else(|| {
                TcutilsError::Internal("no login name in the environment".to_string())
            })?;
            Ok(vec![name])
        }
    }
}

#[cfg(unix)]
fn apply_mode(mode: PosixPermissions, path: &Path) -> Result<(), TcutilsError> {
    mode.apply(path)
}

#[cfg(not(unix))]
fn apply_mode(mode: PosixPermissions, _path: &Path) -> Result<(), TcutilsError> {
    Err(TcutilsError::InvalidPermissions(format!(
        "{mode}: modes can only be applied on unix"
    )))
}

fn describe(mode: PosixPermissions) -> Vec<String> {
    vec![
        format!("octal:    {}", mode.to_octal_str()),
        format!("symbolic: {}", mode.symbolic()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_uses_given_replacement() {
        let lines = run_fs(&FsCommand::Clean {
            name: "my report.pdf".to_string(),
            replace: " ".to_string(),
            replacement: '-',
            whitelist: VALID_FILENAME_CHARS.to_string(),
        })
        .unwrap();
        assert_eq!(lines, vec!["my-report.pdf"]);
    }

    #[test]
    fn perms_describes_mode() {
        let lines = run_fs(&FsCommand::Perms {
            mode: "750".parse().unwrap(),
            apply: None,
        })
        .unwrap();
        assert_eq!(lines, vec!["octal:    0750", "symbolic: rwxr-x---"]);
    }

    #[test]
    fn unique_skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let taken = dir.path().join("notes.txt");
        std::fs::write(&taken, "x").unwrap();
        let lines = run_fs(&FsCommand::Unique { path: taken }).unwrap();
        assert_eq!(
            lines,
            vec![dir.path().join("notes_1.txt").display().to_string()]
        );
    }
}
