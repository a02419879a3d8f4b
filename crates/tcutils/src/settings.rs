// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings for the `tcutils` binary.
//!
//! Read from an optional YAML file given with `--config`, then overridden by
//! `TCUTILS_*` environment variables (`TCUTILS_ADAPTERS__NAMESPACES`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tcutils_config::{ConfigError, ConfigSchema, Configuration};

use crate::builtin::BUILTIN_NAMESPACE;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "TCUTILS_";

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default log level for tcutils crates. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub adapters: AdapterSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            adapters: AdapterSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSettings {
    /// Namespaces scanned when none are given on the command line.
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_namespaces() -> Vec<String> {
    vec![BUILTIN_NAMESPACE.to_string()]
}

impl ConfigSchema for Settings {
    fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            errors.push(ConfigError::validation(format!(
                "log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        if self.adapters.namespaces.iter().any(|ns| ns.trim().is_empty()) {
            errors.push(ConfigError::validation(
                "adapters.namespaces must not contain empty names",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Load settings from `path`, or from defaults and the environment alone.
pub fn load(path: Option<&Path>) -> Result<Settings, Vec<ConfigError>> {
    match path {
        Some(path) => tcutils_config::load_and_validate(path, Some(ENV_PREFIX)),
        None => Configuration::default().extract(Some(ENV_PREFIX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_without_a_file() {
        let settings = load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.adapters.namespaces, vec!["tcutils.builtin"]);
    }

    #[test]
    #[serial]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tcutils.yaml");
        std::fs::write(
            &path,
            "log_level: debug\nadapters:\n  namespaces: [tcutils.builtin.fs]\n",
        )
        .unwrap();

        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.adapters.namespaces, vec!["tcutils.builtin.fs"]);
    }

    #[test]
    #[serial]
    fn unknown_log_level_is_rejected() {
        let errors = tcutils_config::load_and_validate_str::<Settings>("log_level: loud\n", None)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("log_level must be one of"));
    }

    #[test]
    #[serial]
    fn environment_overrides_log_level() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe {
            std::env::set_var("TCUTILS_LOG_LEVEL", "trace");
        }
        let settings = load(None);
        unsafe {
            std::env::remove_var("TCUTILS_LOG_LEVEL");
        }
        assert_eq!(settings.unwrap().log_level, "trace");
    }
}
