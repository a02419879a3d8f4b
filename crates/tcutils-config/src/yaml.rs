// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML loading with `!include` support.
//!
//! A scalar tagged `!include` is replaced by the parsed contents of the
//! named file. Relative names resolve against the directory of the file
//! containing the directive, and included files may include further files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::value::{Mapping, TaggedValue};
use serde_yaml::Value;
use tcutils_core::TcutilsError;
use tracing::{debug, error};

use crate::diagnostic::{parse_error, ConfigError};

/// Tag that triggers file inclusion.
pub const INCLUDE_TAG: &str = "!include";

/// Load the YAML file at `path`, resolving includes.
pub fn load(path: impl AsRef<Path>) -> Result<Value, ConfigError> {
    let mut stack = Vec::new();
    load_file(path.as_ref(), None, &mut stack)
}

/// Parse YAML text, resolving includes against `base_dir`.
pub fn load_str(content: &str, base_dir: &Path) -> Result<Value, ConfigError> {
    let doc: Value =
        serde_yaml::from_str(content).map_err(|e| parse_error("<inline>", content, e))?;
    let mut stack = Vec::new();
    resolve_includes(doc, base_dir, &base_dir.join("<inline>"), &mut stack)
}

fn load_file(
    path: &Path,
    included_from: Option<&Path>,
    stack: &mut Vec<PathBuf>,
) -> Result<Value, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(match included_from {
                Some(parent) => {
                    error!(
                        path = %path.display(),
                        included_from = %parent.display(),
                        "configuration !include error"
                    );
                    ConfigError::IncludeNotFound {
                        path: path.to_path_buf(),
                        included_from: parent.to_path_buf(),
                    }
                }
                None => TcutilsError::NotFound {
                    path: path.to_path_buf(),
                }
                .into(),
            });
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if stack.contains(&identity) {
        return Err(ConfigError::IncludeCycle {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), depth = stack.len(), "loading yaml");
    let doc: Value = serde_yaml::from_str(&content)
        .map_err(|e| parse_error(&path.display().to_string(), &content, e))?;

    stack.push(identity);
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let resolved = resolve_includes(doc, base, path, stack);
    stack.pop();
    resolved
}

fn resolve_includes(
    value: Value,
    base: &Path,
    current: &Path,
    stack: &mut Vec<PathBuf>,
) -> Result<Value, ConfigError> {
    match value {
        Value::Tagged(tagged) if tagged.tag == INCLUDE_TAG => {
            let TaggedValue { value, .. } = *tagged;
            let Value::String(name) = value else {
                return Err(ConfigError::IncludeTarget {
                    path: current.to_path_buf(),
                });
            };
            load_file(&base.join(name), Some(current), stack)
        }
        Value::Tagged(mut tagged) => {
            let inner = std::mem::take(&mut tagged.value);
            tagged.value = resolve_includes(inner, base, current, stack)?;
            Ok(Value::Tagged(tagged))
        }
        Value::Sequence(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for item in items {
                resolved.push(resolve_includes(item, base, current, stack)?);
            }
            Ok(Value::Sequence(resolved))
        }
        Value::Mapping(entries) => {
            let mut resolved = Mapping::with_capacity(entries.len());
            for (key, item) in entries {
                resolved.insert(key, resolve_includes(item, base, current, stack)?);
            }
            Ok(Value::Mapping(resolved))
        }
        other => Ok(other),
    }
}
