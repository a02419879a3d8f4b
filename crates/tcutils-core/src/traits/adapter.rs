// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every registrable adapter implements.

use std::any::Any;

use crate::error::TcutilsError;
use crate::types::{Arguments, Member, Value};

/// Name of the operation dispatched when no method is given.
pub const DEFAULT_ADAPTER_METHOD: &str = "execute";

/// Downcasting support for trait objects.
///
/// Implemented for every `'static` type, so adapters get it for free.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The capability contract for a named, pluggable unit of behavior.
///
/// Only `name` is required. Types that leave `execute` at its default are
/// incomplete: dispatching to them fails with `NotImplemented`.
pub trait Adapter: AsAny + Send + Sync + 'static {
    /// Identity of the adapter type, used as the registry key.
    fn name(&self) -> &str;

    /// The default dispatch target.
    fn execute(&self, _args: &Arguments) -> Result<Value, TcutilsError> {
        Err(TcutilsError::NotImplemented {
            adapter: self.name().to_string(),
            operation: DEFAULT_ADAPTER_METHOD.to_string(),
        })
    }

    /// Describes the additional member called `name`, if any.
    fn member(&self, _name: &str) -> Option<Member> {
        None
    }

    /// Invokes the named operation `method`.
    ///
    /// Only called for members reported as [`Member::Operation`].
    fn invoke(&self, method: &str, _args: &Arguments) -> Result<Value, TcutilsError> {
        Err(TcutilsError::UnknownMethod {
            adapter: self.name().to_string(),
            method: method.to_string(),
        })
    }
}

impl std::fmt::Debug for dyn Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter").field("name", &self.name()).finish()
    }
}

impl dyn Adapter {
    /// Downcast to the concrete adapter type.
    pub fn downcast_ref<T: Adapter>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns true if the adapter is a `T`.
    pub fn is<T: Adapter>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
