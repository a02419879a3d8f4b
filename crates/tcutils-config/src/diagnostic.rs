// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration errors as miette diagnostics.
//!
//! Schema extraction errors from Figment are converted into [`ConfigError`]
//! values with source spans into the YAML text, valid key listings, and
//! "did you mean?" suggestions using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use tcutils_core::TcutilsError;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration file itself could not be located.
    #[error(transparent)]
    #[diagnostic(code(tcutils::config::not_found))]
    Path(#[from] TcutilsError),

    /// Reading a configuration file failed.
    #[error("failed to read `{}`: {source}", path.display())]
    #[diagnostic(code(tcutils::config::io))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The YAML text is malformed.
    #[error("invalid YAML in `{path}`: {message}")]
    #[diagnostic(code(tcutils::config::parse))]
    Parse {
        path: String,
        message: String,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// An `!include` directive names a file that does not exist.
    #[error("included file `{}` not found", path.display())]
    #[diagnostic(
        code(tcutils::config::include_not_found),
        help("includes are resolved relative to `{}`", included_from.display())
    )]
    IncludeNotFound {
        path: PathBuf,
        included_from: PathBuf,
    },

    /// A file includes itself, directly or transitively.
    #[error("include cycle through `{}`", path.display())]
    #[diagnostic(code(tcutils::config::include_cycle))]
    IncludeCycle { path: PathBuf },

    /// `!include` applied to something other than a file name.
    #[error("`!include` in `{}` expects a file name", path.display())]
    #[diagnostic(code(tcutils::config::include_target))]
    IncludeTarget { path: PathBuf },

    /// Dotted access reached a key that does not exist.
    #[error("no such attribute: {segment} (in `{key}`)")]
    #[diagnostic(code(tcutils::config::no_such_attribute))]
    NoSuchAttribute {
        /// The full dotted key requested.
        key: String,
        /// The segment that could not be resolved.
        segment: String,
    },

    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(tcutils::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(tcutils::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(tcutils::config::missing_key),
        help("add `{key}: <value>` to the configuration file")
    )]
    MissingKey { key: String },

    /// A semantic validation error.
    #[error("validation error: {message}")]
    #[diagnostic(code(tcutils::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(tcutils::config::other))]
    Other(String),
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Named YAML text used to attach source spans to errors.
#[derive(Debug, Clone)]
pub struct YamlSource {
    pub name: String,
    pub content: String,
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may carry several errors; each becomes one diagnostic.
pub fn figment_to_config_errors(
    err: figment::Error,
    source: Option<&YamlSource>,
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let section: Vec<String> = error.path.clone();
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(source, &section, field);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: dotted(&section, field),
            },
            Kind::InvalidType(actual, expected) => {
                let (span, src) = match section.split_last() {
                    Some((field, parents)) => find_source_span(source, parents, field),
                    None => (None, None),
                };
                ConfigError::InvalidType {
                    key: section.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

fn dotted(section: &[String], field: &str) -> String {
    if section.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", section.join("."))
    }
}

fn find_source_span(
    source: Option<&YamlSource>,
    section: &[String],
    field: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(source) = source else {
        return (None, None);
    };

    match find_key_offset(&source.content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(&source.name, source.content.clone())),
        ),
        None => (None, None),
    }
}

/// Find the byte offset of the YAML key `field` nested under `path`.
///
/// Each section key is searched for in turn, starting after the previous
/// one, so `["nested", "inception"]` + `"full"` finds the `full:` that
/// follows `nested:` and then `inception:`.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let mut start = 0;
    for section in path {
        start = find_key_line(content, start, section)? + section.len();
    }
    find_key_line(content, start, field)
}

fn find_key_line(content: &str, from: usize, key: &str) -> Option<usize> {
    let mut offset = from;
    for line in content.get(from..)?.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(key) {
            if after.starts_with(':') {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }
    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None`.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Byte offset of a serde_yaml error, for span reporting.
pub(crate) fn parse_error(path: &str, content: &str, err: serde_yaml::Error) -> ConfigError {
    let span = err
        .location()
        .map(|loc| SourceSpan::new(loc.index().min(content.len()).into(), 1));
    ConfigError::Parse {
        path: path.to_string(),
        message: err.to_string(),
        src: span.map(|_| NamedSource::new(path, content.to_string())),
        span,
    }
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
