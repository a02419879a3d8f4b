// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static descriptions of adapter types.
//!
//! A descriptor stands in for the adapter type itself: it carries the
//! type's registry name, the capability contracts it satisfies, and a
//! factory that constructs instances. Incomplete types have no factory.

use std::fmt;

use tcutils_core::{Adapter, Arguments, Capability, TcutilsError};

/// Constructs an adapter instance from construction arguments.
pub type AdapterFactory = fn(&Arguments) -> Result<Box<dyn Adapter>, TcutilsError>;

/// Factory for adapters that need no construction arguments.
///
/// `AdapterDescriptor::concrete("echo", &[], default_factory::<Echo>)`
pub fn default_factory<T: Adapter + Default>(
    _args: &Arguments,
) -> Result<Box<dyn Adapter>, TcutilsError> {
    Ok(Box::new(T::default()))
}

/// Describes an adapter type.
#[derive(Clone, Copy)]
pub struct AdapterDescriptor {
    /// Registry key shared by every instance of the type.
    pub name: &'static str,
    /// Contracts satisfied in addition to [`Capability::ADAPTER`].
    pub capabilities: &'static [Capability],
    /// `None` marks an incomplete (abstract) type that cannot be constructed.
    pub factory: Option<AdapterFactory>,
}

impl AdapterDescriptor {
    /// A constructible adapter type.
    pub const fn concrete(
        name: &'static str,
        capabilities: &'static [Capability],
        factory: AdapterFactory,
    ) -> Self {
        Self {
            name,
            capabilities,
            factory: Some(factory),
        }
    }

    /// A contract-only type. Scans skip it and registration rejects it.
    pub const fn incomplete(name: &'static str, capabilities: &'static [Capability]) -> Self {
        Self {
            name,
            capabilities,
            factory: None,
        }
    }

    /// Whether the type satisfies `capability`.
    ///
    /// Every descriptor satisfies the base adapter contract.
    pub fn satisfies(&self, capability: Capability) -> bool {
        capability == Capability::ADAPTER || self.capabilities.contains(&capability)
    }

    pub fn is_abstract(&self) -> bool {
        self.factory.is_none()
    }

    /// Whether both descriptors describe the same adapter type.
    ///
    /// Sharing a name is not enough: the factory and contracts must match
    /// too.
    pub fn same_type(&self, other: &AdapterDescriptor) -> bool {
        let same_factory = match (self.factory, other.factory) {
            (Some(ours), Some(theirs)) => std::ptr::fn_addr_eq(ours, theirs),
            (None, None) => true,
            _ => false,
        };
        self.name == other.name && self.capabilities == other.capabilities && same_factory
    }

    /// Build a fresh instance.
    pub fn construct(&self, args: &Arguments) -> Result<Box<dyn Adapter>, TcutilsError> {
        let factory = self.factory.ok_or_else(|| TcutilsError::InvalidAdapterReference {
            name: self.name.to_string(),
            reason: "type is abstract and cannot be constructed".to_string(),
        })?;
        factory(args)
    }
}

impl fmt::Debug for AdapterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterDescriptor")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

/// An adapter given either by name or by type.
#[derive(Debug, Clone, Copy)]
pub enum AdapterRef<'a> {
    Name(&'a str),
    Descriptor(&'a AdapterDescriptor),
}

impl AdapterRef<'_> {
    /// The registry name this reference resolves to.
    pub fn name(&self) -> &str {
        match self {
            AdapterRef::Name(name) => name,
            AdapterRef::Descriptor(descriptor) => descriptor.name,
        }
    }
}

impl fmt::Display for AdapterRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> From<&'a str> for AdapterRef<'a> {
    fn from(name: &'a str) -> Self {
        AdapterRef::Name(name)
    }
}

impl<'a> From<&'a String> for AdapterRef<'a> {
    fn from(name: &'a String) -> Self {
        AdapterRef::Name(name)
    }
}

impl<'a> From<&'a AdapterDescriptor> for AdapterRef<'a> {
    fn from(descriptor: &'a AdapterDescriptor) -> Self {
        AdapterRef::Descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcutils_core::Value;

    #[derive(Debug, Default)]
    struct Probe;

    impl Adapter for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn execute(&self, _args: &Arguments) -> Result<Value, TcutilsError> {
            Ok(Value::Null)
        }
    }

    const COMMAND: Capability = Capability("command");
    const PROBE: AdapterDescriptor =
        AdapterDescriptor::concrete("probe", &[COMMAND], default_factory::<Probe>);
    const CONTRACT: AdapterDescriptor = AdapterDescriptor::incomplete("contract", &[COMMAND]);

    #[test]
    fn satisfies_base_and_listed_capabilities() {
        assert!(PROBE.satisfies(Capability::ADAPTER));
        assert!(PROBE.satisfies(COMMAND));
        assert!(!PROBE.satisfies(Capability("storage")));
    }

    #[test]
    fn construct_uses_factory() {
        let adapter = PROBE.construct(&Arguments::new()).unwrap();
        assert!(adapter.as_ref().is::<Probe>());
        assert!(!PROBE.is_abstract());
    }

    #[test]
    fn incomplete_types_cannot_be_constructed() {
        assert!(CONTRACT.is_abstract());
        let err = CONTRACT.construct(&Arguments::new()).unwrap_err();
        assert!(matches!(err, TcutilsError::InvalidAdapterReference { .. }));
    }

    #[test]
    fn same_type_needs_more_than_a_name() {
        #[derive(Debug, Default)]
        struct Impostor;

        impl Adapter for Impostor {
            fn name(&self) -> &str {
                "probe"
            }
        }

        const IMPOSTOR: AdapterDescriptor =
            AdapterDescriptor::concrete("probe", &[COMMAND], default_factory::<Impostor>);
        let copy = PROBE;
        assert!(PROBE.same_type(&copy));
        assert!(!PROBE.same_type(&IMPOSTOR));
        assert!(!PROBE.same_type(&AdapterDescriptor::incomplete("probe", &[COMMAND])));
        assert!(CONTRACT.same_type(&AdapterDescriptor::incomplete("contract", &[COMMAND])));
    }

    #[test]
    fn refs_resolve_to_names() {
        assert_eq!(AdapterRef::from("probe").name(), "probe");
        assert_eq!(AdapterRef::from(&PROBE).name(), "probe");
        let owned = String::from("other");
        assert_eq!(AdapterRef::from(&owned).to_string(), "other");
    }

    #[test]
    fn debug_hides_factory_pointer() {
        let rendered = format!("{PROBE:?}");
        assert!(rendered.contains("\"probe\""));
        assert!(rendered.contains("abstract: false"));
    }
}
