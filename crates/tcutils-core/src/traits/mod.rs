// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable adapters.

pub mod adapter;

pub use adapter::{Adapter, AsAny, DEFAULT_ADAPTER_METHOD};
