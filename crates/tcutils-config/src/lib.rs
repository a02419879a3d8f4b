// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for tcutils.
//!
//! Provides YAML loading with `!include` directives, a [`Configuration`]
//! wrapper with dotted-path access (`config.get("nested.inception.full")`),
//! and Figment-backed schema validation with miette diagnostics.
//!
//! # Usage
//!
//! ```no_run
//! use tcutils_config::Configuration;
//!
//! let config = Configuration::load("app.yaml").expect("config errors");
//! println!("name: {:?}", config.get("service.name"));
//! ```

pub mod configuration;
pub mod diagnostic;
pub mod schema;
pub mod yaml;

use std::path::Path;

pub use configuration::{Configuration, ConfigurationAttribute};
pub use diagnostic::{render_errors, ConfigError};
pub use schema::ConfigSchema;

/// Load a YAML file and validate it against `S`.
///
/// This is the high-level entry point that:
/// 1. Loads the file, resolving includes
/// 2. Extracts `S` through Figment, with optional `PREFIX_` env overrides
/// 3. Runs `S::validate`
///
/// Returns either the schema value or every diagnostic collected.
pub fn load_and_validate<S: ConfigSchema>(
    path: impl AsRef<Path>,
    env_prefix: Option<&str>,
) -> Result<S, Vec<ConfigError>> {
    let config = Configuration::load(path).map_err(|err| vec![err])?;
    config.extract(env_prefix)
}

/// Validate YAML text against `S`. Useful for testing.
pub fn load_and_validate_str<S: ConfigSchema>(
    yaml: &str,
    env_prefix: Option<&str>,
) -> Result<S, Vec<ConfigError>> {
    let config = Configuration::from_yaml_str(yaml).map_err(|err| vec![err])?;
    config.extract(env_prefix)
}
