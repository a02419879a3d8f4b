// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema validation through Figment.
//!
//! Merge order (later overrides earlier):
//! 1. `S::default()`
//! 2. the loaded YAML mapping
//! 3. `PREFIX_*` environment variables, when a prefix is given

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::configuration::Configuration;
use crate::diagnostic::{figment_to_config_errors, ConfigError};

/// A typed view a configuration can be validated against.
///
/// Implementors should use `#[serde(deny_unknown_fields)]` so typos are
/// reported with suggestions, and `#[serde(default)]` on optional fields.
pub trait ConfigSchema: Serialize + DeserializeOwned + Default {
    /// Semantic checks that serde attributes cannot express.
    ///
    /// Should collect every problem rather than stopping at the first.
    fn validate(&self) -> Result<(), Vec<ConfigError>> {
        Ok(())
    }
}

/// Build the Figment used for extraction (exposed for diagnostic use).
pub fn build_figment<S: ConfigSchema>(config: &Configuration, env_prefix: Option<&str>) -> Figment {
    let figment = Figment::new()
        .merge(Serialized::defaults(S::default()))
        .merge(Serialized::defaults(config.as_mapping()));
    match env_prefix {
        Some(prefix) => figment.merge(env_provider(prefix)),
        None => figment,
    }
}

/// Environment provider nesting on double underscores.
///
/// `APP_LOGGING__LEVEL` maps to `logging.level`, leaving single
/// underscores inside key names intact.
fn env_provider(prefix: &str) -> Env {
    Env::prefixed(prefix).split("__")
}

pub(crate) fn extract<S: ConfigSchema>(
    config: &Configuration,
    env_prefix: Option<&str>,
) -> Result<S, Vec<ConfigError>> {
    let schema: S = build_figment::<S>(config, env_prefix)
        .extract()
        .map_err(|err| figment_to_config_errors(err, config.source()))?;
    schema.validate()?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serial_test::serial;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Logging {
        #[serde(default)]
        level: String,
        #[serde(default)]
        file_name: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct AppSchema {
        #[serde(default)]
        name: String,
        #[serde(default)]
        workers: u32,
        #[serde(default)]
        logging: Logging,
    }

    impl ConfigSchema for AppSchema {
        fn validate(&self) -> Result<(), Vec<ConfigError>> {
            let mut errors = Vec::new();
            if self.name.trim().is_empty() {
                errors.push(ConfigError::validation("name must not be empty"));
            }
            if self.workers > 64 {
                errors.push(ConfigError::validation(format!(
                    "workers must be at most 64, got {}",
                    self.workers
                )));
            }
            if errors.is_empty() { Ok(()) } else { Err(errors) }
        }
    }

    fn config(yaml: &str) -> Configuration {
        Configuration::from_value(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn extracts_with_defaults() {
        let schema: AppSchema = config("name: svc\nlogging:\n  level: debug\n")
            .extract(None)
            .unwrap();
        assert_eq!(schema.name, "svc");
        assert_eq!(schema.workers, 0);
        assert_eq!(schema.logging.level, "debug");
    }

    #[test]
    fn unknown_key_gets_a_suggestion_and_span() {
        let yaml = "name: svc\nlogging:\n  levle: debug\n";
        let config = Configuration::from_yaml_str(yaml).unwrap();
        let errors = config.extract::<AppSchema>(None).unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ConfigError::UnknownKey {
                key,
                suggestion,
                span,
                ..
            } => {
                assert_eq!(key, "levle");
                assert_eq!(suggestion.as_deref(), Some("level"));
                let span = span.expect("span into the yaml source");
                assert_eq!(&yaml[span.offset()..span.offset() + span.len()], "levle");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_type_is_reported() {
        let errors = config("name: svc\nworkers: many\n")
            .extract::<AppSchema>(None)
            .unwrap_err();
        assert!(matches!(
            &errors[0],
            ConfigError::InvalidType { key, .. } if key == "workers"
        ));
    }

    #[test]
    fn validation_collects_all_errors() {
        let errors = config("name: ''\nworkers: 100\n")
            .extract::<AppSchema>(None)
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. })));
    }

    #[test]
    #[serial]
    fn environment_overrides_file_values() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe {
            std::env::set_var("TCTEST_WORKERS", "8");
            std::env::set_var("TCTEST_LOGGING__FILE_NAME", "out.log");
        }

        let schema: AppSchema = config("name: svc\nworkers: 2\n")
            .extract(Some("TCTEST_"))
            .unwrap();

        unsafe {
            std::env::remove_var("TCTEST_WORKERS");
            std::env::remove_var("TCTEST_LOGGING__FILE_NAME");
        }

        assert_eq!(schema.workers, 8);
        assert_eq!(schema.logging.file_name.as_deref(), Some("out.log"));
    }
}
