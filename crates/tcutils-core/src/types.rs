// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types passed across the adapter boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dynamically typed value exchanged with adapter operations.
pub type Value = serde_json::Value;

/// Positional and named arguments for construction and dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    /// Positional arguments, in call order.
    #[serde(default)]
    pub positional: Vec<Value>,
    /// Keyword arguments.
    #[serde(default)]
    pub named: BTreeMap<String, Value>,
}

impl Arguments {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a named argument, replacing any previous value.
    pub fn named(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument `key`.
    pub fn get_named(&self, key: &str) -> Option<&Value> {
        self.named.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl<V: Into<Value>> FromIterator<V> for Arguments {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            positional: iter.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }
}

/// A named member exposed by an adapter besides its default operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// An invocable operation, dispatched through `Adapter::invoke`.
    Operation,
    /// A plain data attribute. Not invocable.
    Attribute(Value),
}

/// Identifies a capability contract an adapter type can satisfy.
///
/// Contracts form the "is-a" relation used by registries and namespace
/// scans: a descriptor satisfies every capability it lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(pub &'static str);

impl Capability {
    /// The base contract every adapter satisfies.
    pub const ADAPTER: Capability = Capability("adapter");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
