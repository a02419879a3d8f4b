// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tcutils config` command implementation.

use std::path::PathBuf;

use clap::Subcommand;
use tcutils_config::{ConfigError, Configuration};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print a value from a YAML file, with `!include` resolved.
    Get {
        file: PathBuf,
        /// Dotted key (`section.nested.key`). Prints the whole file if omitted.
        key: Option<String>,
    },
    /// Print the resolved file as a single line.
    Show { file: PathBuf },
}

/// Run a `tcutils config` subcommand, returning the text to print.
pub fn run_config(command: &ConfigCommand) -> Result<String, ConfigError> {
    match command {
        ConfigCommand::Get { file, key } => {
            let config = Configuration::load(file)?;
            let yaml = match key {
                Some(key) => serde_yaml::to_string(config.get(key)?),
                None => serde_yaml::to_string(config.as_mapping()),
            };
            yaml.map_err(|err| ConfigError::Other(err.to_string()))
        }
        ConfigCommand::Show { file } => Ok(Configuration::load(file)?.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app.yaml"),
            "service:\n  name: svc\n  limits: !include limits.yaml\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("limits.yaml"), "workers: 4\n").unwrap();
        dir
    }

    #[test]
    fn get_prints_nested_value() {
        let dir = fixture();
        let out = run_config(&ConfigCommand::Get {
            file: dir.path().join("app.yaml"),
            key: Some("service.limits.workers".to_string()),
        })
        .unwrap();
        assert_eq!(out.trim(), "4");
    }

    #[test]
    fn get_missing_key_names_segment() {
        let dir = fixture();
        let err = run_config(&ConfigCommand::Get {
            file: dir.path().join("app.yaml"),
            key: Some("service.absent".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoSuchAttribute { ref segment, .. } if segment == "absent"));
    }

    #[test]
    fn show_renders_one_line() {
        let dir = fixture();
        let out = run_config(&ConfigCommand::Show {
            file: dir.path().join("app.yaml"),
        })
        .unwrap();
        assert_eq!(
            out,
            "Configuration({'service': {'name': 'svc', 'limits': {'workers': 4}}})"
        );
    }
}
