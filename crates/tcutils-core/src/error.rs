// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the tcutils crates.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used by adapters, the registry, and filesystem helpers.
#[derive(Debug, Error)]
pub enum TcutilsError {
    /// A path that was required to exist does not.
    #[error("path `{}` does not exist", path.display())]
    NotFound { path: PathBuf },

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup of an adapter name that has no slot in the registry.
    #[error("adapter `{name}` is not registered")]
    NotRegistered { name: String },

    /// Registration collided with an existing slot and neither
    /// substitution nor multiplicity was requested.
    #[error("adapter `{name}` is already registered")]
    AlreadyRegistered { name: String },

    /// A descriptor or name that cannot be used as an adapter reference.
    #[error("invalid adapter reference `{name}`: {reason}")]
    InvalidAdapterReference { name: String, reason: String },

    /// `execute` was asked for a member the adapter does not have.
    #[error("`{adapter}.{method}` does not exist")]
    UnknownMethod { adapter: String, method: String },

    /// `execute` was asked for a member that is not an operation.
    #[error("`{adapter}.{method}` is not callable")]
    NotCallable { adapter: String, method: String },

    /// An operation declared by the adapter contract was not provided.
    #[error("`{adapter}.{operation}` is not implemented")]
    NotImplemented { adapter: String, operation: String },

    /// Dispatch against a slot holding more than one instance.
    #[error("adapter `{name}` has {count} registered instances; dispatch is ambiguous")]
    MultipleRegistered { name: String, count: usize },

    /// `scan` was given a namespace that is not loaded.
    #[error("unknown namespace `{0}` to scan")]
    UnknownNamespace(String),

    /// Malformed POSIX permission octal.
    #[error("invalid permissions: {0}")]
    InvalidPermissions(String),

    /// An adapter operation failed.
    #[error("adapter `{adapter}` failed: {source}")]
    Operation {
        adapter: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TcutilsError {
    /// Wrap an arbitrary failure raised inside an adapter operation.
    pub fn operation(
        adapter: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Operation {
            adapter: adapter.into(),
            source: source.into(),
        }
    }
}
