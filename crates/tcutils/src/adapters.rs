// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tcutils adapters` command implementation.
//!
//! Builds a registry over the built-in modules, scans the requested
//! namespaces, then lists or dispatches to the registered adapters.

use clap::Subcommand;
use serde::Serialize;
use tcutils_adapters::{Registry, ScanOptions};
use tcutils_core::{Arguments, Capability, TcutilsError, Value};
use tracing::info;

use crate::builtin::builtin_modules;
use crate::settings::Settings;

#[derive(Subcommand, Debug)]
pub enum AdaptersCommand {
    /// List adapters discovered in the scanned namespaces.
    List {
        /// Namespace to scan (repeatable). Defaults to the configured ones.
        #[arg(long = "namespace", short = 'n')]
        namespaces: Vec<String>,
        /// Only list adapters satisfying this capability.
        #[arg(long)]
        capability: Option<String>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run an adapter operation.
    Exec {
        name: String,
        /// Operation to run instead of the default one.
        #[arg(long, short = 'm')]
        method: Option<String>,
        /// Named argument as `key=value` (repeatable).
        #[arg(long = "set", value_parser = parse_named)]
        named: Vec<(String, String)>,
        /// Namespace to scan (repeatable). Defaults to the configured ones.
        #[arg(long = "namespace", short = 'n')]
        namespaces: Vec<String>,
        /// Positional arguments. JSON literals are decoded, anything else
        /// is passed as a string.
        args: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct AdapterListing<'a> {
    registry: &'a str,
    adapters: Vec<&'a str>,
}

fn parse_named(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

fn decode(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

/// Registry populated from the built-in modules.
fn scanned_registry(
    settings: &Settings,
    namespaces: &[String],
    capability: Option<&str>,
) -> Result<Registry, TcutilsError> {
    let mut registry = Registry::new(
        "tcutils",
        settings.adapters.namespaces.iter().cloned(),
        Capability::ADAPTER,
    );
    let mut options = ScanOptions::new();
    if !namespaces.is_empty() {
        options = options.namespaces(namespaces.iter().cloned());
    }
    if let Some(capability) = capability {
        // Capabilities are compile-time names; only built-in ones can match.
        let known = [Capability::ADAPTER, crate::builtin::FS_COMMAND];
        let capability = known
            .into_iter()
            .find(|known| known.as_str() == capability)
            .ok_or_else(|| TcutilsError::Internal(format!("unknown capability `{capability}`")))?;
        options = options.adapter_types([capability]);
    }

    let registered = registry.scan(&builtin_modules(), options)?;
    info!(registered, "adapters scanned");
    Ok(registry)
}

/// Run a `tcutils adapters` subcommand, returning the text to print.
pub fn run_adapters(command: &AdaptersCommand, settings: &Settings) -> Result<String, TcutilsError> {
    match command {
        AdaptersCommand::List {
            namespaces,
            capability,
            json,
        } => {
            let registry = scanned_registry(settings, namespaces, capability.as_deref())?;
            if *json {
                let listing = AdapterListing {
                    registry: registry.name(),
                    adapters: registry.list(),
                };
                serde_json::to_string_pretty(&listing)
                    .map_err(|err| TcutilsError::Internal(err.to_string()))
            } else {
                Ok(registry.list().join("\n"))
            }
        }
        AdaptersCommand::Exec {
            name,
            method,
            named,
            namespaces,
            args,
        } => {
            let registry = scanned_registry(settings, namespaces, None)?;
            let mut arguments: Arguments = args.iter().map(|raw| decode(raw)).collect();
            for (key, value) in named {
                arguments = arguments.named(key.clone(), decode(value));
            }
            let result = registry.execute(name.as_str(), method.as_deref(), &arguments)?;
            Ok(match result {
                Value::String(text) => text,
                other => serde_json::to_string_pretty(&other)
                    .map_err(|err| TcutilsError::Internal(err.to_string()))?,
            })
        }
    }
}
