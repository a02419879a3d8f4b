// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter registry, descriptors, and the module directory scanned for them.
//!
//! Adapter types are described by an [`AdapterDescriptor`] (name,
//! capabilities, factory). Modules contribute their descriptors to a
//! [`ModuleDirectory`] at startup, and a [`Registry`] either registers
//! descriptors directly or discovers them with [`Registry::scan`].

pub mod descriptor;
pub mod module;
pub mod registry;

pub use descriptor::{default_factory, AdapterDescriptor, AdapterFactory, AdapterRef};
pub use module::{Module, ModuleDirectory};
pub use registry::{RegisterOptions, Registry, ScanOptions, Slot};
