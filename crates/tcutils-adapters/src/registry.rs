// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter registry.
//!
//! A `Registry` maps adapter names to slots. A slot is a non-empty,
//! ordered sequence of constructed instances: one for a plain registration,
//! several when registrations asked for `allow_multiple`. Names are kept in
//! lexicographic order.
//!
//! Writers (`register`, `remove`, `scan`) take `&mut self`. Share a
//! registry across threads behind a lock.

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::iter::Map;

use tcutils_core::{
    Adapter, Arguments, Capability, Member, TcutilsError, Value, DEFAULT_ADAPTER_METHOD,
};
use tracing::debug;

use crate::descriptor::{AdapterDescriptor, AdapterRef};
use crate::module::{Module, ModuleDirectory};

/// Name of the data member every adapter exposes.
const NAME_MEMBER: &str = "name";

/// Collision policy and construction arguments for [`Registry::register`].
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Append to an existing slot instead of failing.
    pub allow_multiple: bool,
    /// Replace an existing slot with a single fresh instance.
    pub allow_substitute: bool,
    /// Passed to the adapter factory.
    pub args: Arguments,
}

impl RegisterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    pub fn substitute(mut self) -> Self {
        self.allow_substitute = true;
        self
    }

    pub fn with_args(mut self, args: Arguments) -> Self {
        self.args = args;
        self
    }
}

/// Parameters of [`Registry::scan`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Namespaces to scan. `None` scans the registry's own namespaces.
    pub namespaces: Option<Vec<String>>,
    /// Capabilities to look for. `None` (or empty) means the registry's
    /// base capability.
    pub adapter_types: Option<Vec<Capability>>,
    /// Quietly ignore namespaces that resolve to no loaded module.
    pub skip_unknown_namespaces: bool,
    /// Include modules nested under each namespace.
    pub recursive_search: bool,
    /// Forwarded to every registration.
    pub register: RegisterOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            namespaces: None,
            adapter_types: None,
            skip_unknown_namespaces: true,
            recursive_search: true,
            register: RegisterOptions::default(),
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = Some(namespaces.into_iter().map(Into::into).collect());
        self
    }

    pub fn adapter_types(mut self, types: impl IntoIterator<Item = Capability>) -> Self {
        self.adapter_types = Some(types.into_iter().collect());
        self
    }

    pub fn skip_unknown_namespaces(mut self, skip: bool) -> Self {
        self.skip_unknown_namespaces = skip;
        self
    }

    pub fn recursive_search(mut self, recursive: bool) -> Self {
        self.recursive_search = recursive;
        self
    }

    pub fn register(mut self, options: RegisterOptions) -> Self {
        self.register = options;
        self
    }
}

/// Borrowed view of the instances registered under one name.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    name: &'a str,
    instances: &'a [Box<dyn Adapter>],
}

impl<'a> Slot<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The instance of a single-instance slot; `None` when several are
    /// registered.
    pub fn single(&self) -> Option<&'a dyn Adapter> {
        match self.instances {
            [only] => Some(&**only),
            _ => None,
        }
    }

    /// Every instance, in registration order.
    pub fn instances(&self) -> impl Iterator<Item = &'a dyn Adapter> + use<'a> {
        self.instances.iter().map(|instance| &**instance)
    }

    /// Downcast the single instance to its concrete type.
    pub fn downcast_ref<T: Adapter>(&self) -> Option<&'a T> {
        self.single()?.downcast_ref::<T>()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether more than one instance is registered under this name.
    pub fn is_multiple(&self) -> bool {
        self.instances.len() > 1
    }
}

/// Named registry of adapter instances.
#[derive(Debug)]
pub struct Registry {
    name: String,
    namespaces: Vec<String>,
    adapter_base: Capability,
    slots: BTreeMap<String, Vec<Box<dyn Adapter>>>,
}

impl Registry {
    /// Create an empty registry.
    ///
    /// `namespaces` are the defaults for [`scan`](Self::scan), and
    /// `adapter_base` is the contract every registered type must satisfy.
    pub fn new<I, S>(name: impl Into<String>, namespaces: I, adapter_base: Capability) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            namespaces: namespaces.into_iter().map(Into::into).collect(),
            adapter_base,
            slots: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn adapter_base(&self) -> Capability {
        self.adapter_base
    }

    /// Canonical name for `adapter`.
    fn resolve<'a>(&self, adapter: AdapterRef<'a>) -> Result<&'a str, TcutilsError> {
        let name = match adapter {
            AdapterRef::Name(name) => name,
            AdapterRef::Descriptor(descriptor) => {
                if !descriptor.satisfies(self.adapter_base) {
                    return Err(TcutilsError::InvalidAdapterReference {
                        name: descriptor.name.to_string(),
                        reason: format!("does not satisfy the `{}` contract", self.adapter_base),
                    });
                }
                descriptor.name
            }
        };
        if name.is_empty() {
            return Err(TcutilsError::InvalidAdapterReference {
                name: String::new(),
                reason: "adapter name is empty".to_string(),
            });
        }
        Ok(name)
    }

    /// Look up the slot registered under `adapter`.
    pub fn get<'a>(&self, adapter: impl Into<AdapterRef<'a>>) -> Result<Slot<'_>, TcutilsError> {
        let name = self.resolve(adapter.into())?;
        let (name, instances) =
            self.slots
                .get_key_value(name)
                .ok_or_else(|| TcutilsError::NotRegistered {
                    name: name.to_string(),
                })?;
        Ok(Slot { name, instances })
    }

    /// Construct `descriptor` and store the instance under its name.
    ///
    /// On an existing name, `allow_multiple` appends and `allow_substitute`
    /// replaces the slot with the new instance; otherwise the call fails
    /// with `AlreadyRegistered`. A failed construction leaves the registry
    /// unchanged.
    pub fn register(
        &mut self,
        descriptor: &AdapterDescriptor,
        options: RegisterOptions,
    ) -> Result<(), TcutilsError> {
        self.register_with(descriptor, &options)
    }

    fn register_with(
        &mut self,
        descriptor: &AdapterDescriptor,
        options: &RegisterOptions,
    ) -> Result<(), TcutilsError> {
        let name = self.resolve(AdapterRef::Descriptor(descriptor))?;
        if descriptor.is_abstract() {
            return Err(TcutilsError::InvalidAdapterReference {
                name: name.to_string(),
                reason: "type is abstract and cannot be registered".to_string(),
            });
        }

        match self.slots.get_mut(name) {
            Some(slot) if options.allow_multiple => {
                slot.push(descriptor.construct(&options.args)?);
                debug!(
                    registry = %self.name,
                    adapter = name,
                    instances = slot.len(),
                    "adapter appended"
                );
            }
            Some(_) if !options.allow_substitute => {
                return Err(TcutilsError::AlreadyRegistered {
                    name: name.to_string(),
                });
            }
            existing => {
                let substituted = existing.is_some();
                let instance = descriptor.construct(&options.args)?;
                self.slots.insert(name.to_string(), vec![instance]);
                debug!(registry = %self.name, adapter = name, substituted, "adapter registered");
            }
        }
        Ok(())
    }

    /// Delete the whole slot for `adapter`.
    ///
    /// Removing a name that is not registered is a no-op. Returns whether
    /// a slot was removed.
    pub fn remove<'a>(&mut self, adapter: impl Into<AdapterRef<'a>>) -> Result<bool, TcutilsError> {
        let name = self.resolve(adapter.into())?;
        let removed = self.slots.remove(name).is_some();
        if removed {
            debug!(registry = %self.name, adapter = name, "adapter removed");
        }
        Ok(removed)
    }

    /// Registered names, in order.
    pub fn list(&self) -> Vec<&str> {
        self.names().collect()
    }

    /// Every registered instance: slots in name order, each slot in
    /// registration order.
    pub fn list_objects(&self) -> Vec<&dyn Adapter> {
        self.slots
            .values()
            .flat_map(|slot| slot.iter().map(|instance| &**instance))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Dispatch to an operation of the adapter registered under `adapter`.
    ///
    /// `None` (or `"execute"`) runs the default operation. Any other method
    /// must be a member the adapter reports as an operation. Errors from the
    /// operation are returned as-is.
    pub fn execute<'a>(
        &self,
        adapter: impl Into<AdapterRef<'a>>,
        method: Option<&str>,
        args: &Arguments,
    ) -> Result<Value, TcutilsError> {
        let slot = self.get(adapter)?;
        let instance = slot
            .single()
            .ok_or_else(|| TcutilsError::MultipleRegistered {
                name: slot.name().to_string(),
                count: slot.len(),
            })?;

        let method = match method {
            None | Some(DEFAULT_ADAPTER_METHOD) => {
                debug!(registry = %self.name, adapter = slot.name(), "executing adapter");
                return instance.execute(args);
            }
            Some(method) => method,
        };

        let member = instance.member(method).or_else(|| {
            (method == NAME_MEMBER).then(|| Member::Attribute(Value::from(instance.name())))
        });
        match member {
            Some(Member::Operation) => {
                debug!(registry = %self.name, adapter = slot.name(), method, "invoking adapter");
                instance.invoke(method, args)
            }
            Some(Member::Attribute(_)) => Err(TcutilsError::NotCallable {
                adapter: slot.name().to_string(),
                method: method.to_string(),
            }),
            None => Err(TcutilsError::UnknownMethod {
                adapter: slot.name().to_string(),
                method: method.to_string(),
            }),
        }
    }

    /// Discover adapter types in `modules` and register them.
    ///
    /// Each namespace resolves to the loaded module of that name plus, with
    /// `recursive_search`, every module nested under it. A namespace with no
    /// loaded module of its own still yields its nested modules when
    /// searching recursively. Otherwise it is skipped, or rejected with
    /// `UnknownNamespace` when `skip_unknown_namespaces` is off.
    ///
    /// An empty or missing namespace list means the registry's own
    /// namespaces. The empty namespace `""` covers every loaded module.
    ///
    /// Every concrete type in the resolved modules that satisfies one of the
    /// requested capabilities and the registry's base contract is
    /// registered once, with `options.register`. Distinct types sharing a
    /// name are each registered. Returns how many types were registered.
    ///
    /// Namespaces are resolved before anything is registered. A registration
    /// that fails midway stops the scan, and the types registered before it
    /// stay registered.
    pub fn scan(
        &mut self,
        modules: &ModuleDirectory,
        options: ScanOptions,
    ) -> Result<usize, TcutilsError> {
        let adapter_types = match options.adapter_types {
            Some(types) if !types.is_empty() => types,
            _ => vec![self.adapter_base],
        };
        let namespaces = match options.namespaces {
            Some(namespaces) if !namespaces.is_empty() => namespaces,
            _ => self.namespaces.clone(),
        };

        let searched = resolve_namespaces(
            modules,
            &namespaces,
            options.recursive_search,
            options.skip_unknown_namespaces,
        )?;

        let mut found: Vec<&AdapterDescriptor> = Vec::new();
        for module in &searched {
            for capability in &adapter_types {
                for descriptor in module.adapters() {
                    let wanted = descriptor.satisfies(*capability)
                        && descriptor.satisfies(self.adapter_base);
                    if !wanted {
                        continue;
                    }
                    if descriptor.is_abstract() {
                        debug!(
                            adapter = descriptor.name,
                            module = module.id(),
                            "skipping abstract adapter"
                        );
                        continue;
                    }
                    if !found.iter().any(|known| known.same_type(descriptor)) {
                        found.push(descriptor);
                    }
                }
            }
        }

        debug!(
            registry = %self.name,
            modules = searched.len(),
            adapters = found.len(),
            "namespace scan complete"
        );
        for descriptor in &found {
            self.register_with(descriptor, &options.register)?;
        }
        Ok(found.len())
    }
}

/// Modules reached from `namespaces`, each at most once, in first-seen order.
fn resolve_namespaces<'m>(
    modules: &'m ModuleDirectory,
    namespaces: &[String],
    recursive: bool,
    skip_unknown: bool,
) -> Result<Vec<&'m Module>, TcutilsError> {
    let mut seen = BTreeSet::new();
    let mut searched = Vec::new();

    for namespace in namespaces {
        let namespace = namespace.strip_suffix('.').unwrap_or(namespace);
        let own = modules.get(namespace);
        if own.is_none() && !recursive {
            if skip_unknown {
                debug!(namespace, "skipping unknown namespace");
                continue;
            }
            return Err(TcutilsError::UnknownNamespace(namespace.to_string()));
        }

        let mut reached: Vec<&Module> = own.into_iter().collect();
        if recursive {
            reached.extend(modules.descendants(namespace, false));
        }
        if reached.is_empty() {
            debug!(namespace, "no loaded modules under namespace");
        }
        for module in reached {
            if seen.insert(module.id()) {
                searched.push(module);
            }
        }
    }
    Ok(searched)
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a str;
    type IntoIter = Map<btree_map::Keys<'a, String, Vec<Box<dyn Adapter>>>, fn(&String) -> &str>;

    /// Iterates over registered names.
    fn into_iter(self) -> Self::IntoIter {
        self.slots.keys().map(String::as_str as fn(&String) -> &str)
    }
}
