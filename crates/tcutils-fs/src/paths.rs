// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-platform path normalization.
//!
//! A path is normalized by expanding environment variables, expanding a
//! leading `~`, anchoring it at the current directory when relative, and
//! collapsing `.` and `..` components lexically. Symlinks are not resolved,
//! so the result is the same whether or not the path exists.

use std::env;
use std::fs;
use std::io;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use tcutils_core::TcutilsError;
use tracing::debug;

/// Environment variable expander signature.
pub type Expander = fn(&str) -> String;

/// Knobs for [`normalize_path`] and friends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Always use the platform expander, ignoring `expander`.
    pub use_default_expansion: bool,
    /// Custom expander. Falls back to [`default_expandvars`] when unset.
    pub expander: Option<Expander>,
}

impl NormalizeOptions {
    /// Options using a custom variable expander.
    pub fn with_expander(expander: Expander) -> Self {
        Self {
            use_default_expansion: false,
            expander: Some(expander),
        }
    }

    fn expand(&self, input: &str) -> String {
        match self.expander {
            Some(expander) if !self.use_default_expansion => expander(input),
            _ => default_expandvars(input),
        }
    }
}

/// Expand variables using the conventions of the host platform.
///
/// POSIX hosts understand `$NAME` and `${NAME}`; Windows additionally
/// understands `%NAME%`. References to unset variables are left as-is.
pub fn default_expandvars(input: &str) -> String {
    if cfg!(windows) {
        nt_expandvars(input)
    } else {
        posix_expandvars(input)
    }
}

/// `$NAME` / `${NAME}` expansion.
pub fn posix_expandvars(input: &str) -> String {
    expand_vars(input, false, |name| env::var(name).ok())
}

/// `$NAME` / `${NAME}` / `%NAME%` expansion.
pub fn nt_expandvars(input: &str) -> String {
    expand_vars(input, true, |name| env::var(name).ok())
}

fn expand_vars(input: &str, percent: bool, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(|c: char| c == '$' || (percent && c == '%')) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (value, consumed) = expand_reference(tail, &lookup);
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&tail[..consumed]),
        }
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// Expands the variable reference at the start of `tail`.
///
/// Returns the substituted value (`None` keeps the reference verbatim) and
/// the byte length of the reference.
fn expand_reference(
    tail: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> (Option<String>, usize) {
    let body = &tail[1..];
    if tail.starts_with('%') {
        return match body.find('%') {
            Some(0) => (Some("%".to_string()), 2),
            Some(end) => (lookup(&body[..end]), end + 2),
            None => (None, tail.len()),
        };
    }

    if let Some(braced) = body.strip_prefix('{') {
        return match braced.find('}') {
            Some(end) if end > 0 => (lookup(&braced[..end]), end + 3),
            Some(end) => (None, end + 3),
            None => (None, tail.len()),
        };
    }

    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if name_len == 0 {
        (None, 1)
    } else {
        (lookup(&body[..name_len]), name_len + 1)
    }
}

/// Expand a leading `~` to the home directory. `~user` is left alone.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with(['/', MAIN_SEPARATOR]) {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches(['/', MAIN_SEPARATOR]));
            }
        }
    }
    PathBuf::from(path)
}

/// Collapse `.` and `..` without touching the filesystem.
///
/// `..` never climbs above the root.
pub(crate) fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normalize `path` into an absolute, `..`-free path.
pub fn normalize_path(
    path: impl AsRef<Path>,
    options: NormalizeOptions,
) -> Result<PathBuf, TcutilsError> {
    let raw = path.as_ref().to_string_lossy();
    let expanded = expand_home(&options.expand(&raw));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()?.join(expanded)
    };
    Ok(lexical_clean(&absolute))
}

/// Alias for [`normalize_path`].
pub fn get_path(path: impl AsRef<Path>, options: NormalizeOptions) -> Result<PathBuf, TcutilsError> {
    normalize_path(path, options)
}

/// Normalize `path` and require that it exists.
pub fn check_path(
    path: impl AsRef<Path>,
    options: NormalizeOptions,
) -> Result<PathBuf, TcutilsError> {
    let normalized = normalize_path(path, options)?;
    if !normalized.exists() {
        return Err(TcutilsError::NotFound { path: normalized });
    }
    Ok(normalized)
}

/// Join path parts in order and normalize the result.
///
/// An absolute part discards everything joined before it.
pub fn join_paths<I, P>(parts: I, options: NormalizeOptions) -> Result<PathBuf, TcutilsError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut parts = parts.into_iter();
    let first = parts.next().ok_or_else(|| {
        TcutilsError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "join_paths needs at least one path",
        ))
    })?;

    let mut joined = normalize_path(first, options)?;
    for part in parts {
        joined.push(part);
    }
    normalize_path(joined, options)
}

/// The normalized current working directory.
pub fn current_dir(options: NormalizeOptions) -> Result<PathBuf, TcutilsError> {
    normalize_path(env::current_dir()?, options)
}

/// Create `dirs` below `parent` (the current directory by default).
///
/// A missing parent is an error unless `create_parent` is set, in which
/// case it is created and returned as the first element. Targets that
/// already exist are returned without error.
pub fn create_dirs<I, P>(
    dirs: I,
    parent: Option<&Path>,
    create_parent: bool,
    options: NormalizeOptions,
) -> Result<Vec<PathBuf>, TcutilsError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let parent_path = match parent {
        Some(parent) => normalize_path(parent, options)?,
        None => current_dir(options)?,
    };

    if !parent_path.exists() {
        if !create_parent {
            return Err(TcutilsError::NotFound { path: parent_path });
        }
        fs::create_dir_all(&parent_path)?;
        debug!(path = %parent_path.display(), "created parent directory");
    }

    let mut created = Vec::new();
    if create_parent {
        created.push(parent_path.clone());
    }

    for dir in dirs {
        let target = lexical_clean(&parent_path.join(dir.as_ref()));
        if !target.exists() {
            fs::create_dir_all(&target)?;
            debug!(path = %target.display(), "created directory");
        }
        created.push(target);
    }

    Ok(created)
}
