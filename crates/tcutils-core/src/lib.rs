// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for tcutils.
//!
//! This crate provides the shared error type, the [`Adapter`] capability
//! contract, and the value types exchanged with adapters. The registry in
//! `tcutils-adapters` and the filesystem helpers in `tcutils-fs` build on it.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TcutilsError;
pub use traits::{Adapter, AsAny, DEFAULT_ADAPTER_METHOD};
pub use types::{Arguments, Capability, Member, Value};
