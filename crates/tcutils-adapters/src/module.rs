// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory of loaded modules and the adapter types they expose.
//!
//! Module identifiers are dot-separated hierarchical paths
//! (`pkg.tests.adapters`). Each adapter module hands a [`Module`] to the
//! directory at startup; registries then discover adapter types by
//! scanning namespaces of the directory.

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::debug;

use crate::descriptor::AdapterDescriptor;

/// A loaded code unit and the adapter types it defines.
#[derive(Debug, Clone)]
pub struct Module {
    id: String,
    adapters: Vec<AdapterDescriptor>,
}

impl Module {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            adapters: Vec::new(),
        }
    }

    /// Add an adapter type, builder style.
    pub fn with_adapter(mut self, descriptor: AdapterDescriptor) -> Self {
        self.adapters.push(descriptor);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adapter types in definition order.
    pub fn adapters(&self) -> &[AdapterDescriptor] {
        &self.adapters
    }
}

/// Loaded modules keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct ModuleDirectory {
    modules: BTreeMap<String, Module>,
}

impl ModuleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a module. A module already loaded under the same id is replaced.
    pub fn load(&mut self, module: Module) {
        debug!(module = %module.id, adapters = module.adapters.len(), "module loaded");
        self.modules.insert(module.id.clone(), module);
    }

    /// Builder-style [`load`](Self::load).
    pub fn with(mut self, module: Module) -> Self {
        self.load(module);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    /// Modules whose identifier lies under `prefix`, in identifier order.
    ///
    /// Matching respects segments: `a.b` covers `a.b.c` but not `a.bc`.
    /// The module named exactly `prefix` is yielded only when `include_self`
    /// is set. One trailing dot is ignored (`a.` behaves like `a`), and the
    /// empty prefix covers every module.
    pub fn descendants<'a>(
        &'a self,
        prefix: &str,
        include_self: bool,
    ) -> impl Iterator<Item = &'a Module> {
        let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
        self.modules
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(id, _)| id.starts_with(prefix))
            .filter(move |(id, _)| match id[prefix.len()..].chars().next() {
                None => include_self,
                Some(next) => prefix.is_empty() || next == '.',
            })
            .map(|(_, module)| module)
    }

    /// Loaded identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<Module> for ModuleDirectory {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        let mut directory = Self::new();
        for module in iter {
            directory.load(module);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(ids: &[&str]) -> ModuleDirectory {
        ids.iter().map(|id| Module::new(*id)).collect()
    }

    fn ids<'a>(modules: impl Iterator<Item = &'a Module>) -> Vec<&'a str> {
        modules.map(Module::id).collect()
    }

    #[test]
    fn descendants_respect_segments() {
        let dir = directory(&["a", "a.b", "a.b.c", "a.bc", "a.b.d.e", "b"]);
        assert_eq!(ids(dir.descendants("a.b", true)), vec!["a.b", "a.b.c", "a.b.d.e"]);
        assert_eq!(ids(dir.descendants("a.b", false)), vec!["a.b.c", "a.b.d.e"]);
    }

    #[test]
    fn descendants_of_unloaded_parent() {
        let dir = directory(&["pkg.tests.adapters", "pkg.tests.adapters.extra", "other"]);
        assert!(!dir.contains("pkg.tests"));
        assert_eq!(
            ids(dir.descendants("pkg.tests", true)),
            vec!["pkg.tests.adapters", "pkg.tests.adapters.extra"]
        );
        assert_eq!(ids(dir.descendants("pkg.unknown", true)), Vec::<&str>::new());
    }

    #[test]
    fn descendants_of_root_and_trailing_dot() {
        let dir = directory(&["a", "a.b", "ab", "b.c"]);
        assert_eq!(ids(dir.descendants("", false)), vec!["a", "a.b", "ab", "b.c"]);
        assert_eq!(ids(dir.descendants("a.", true)), vec!["a", "a.b"]);
        assert_eq!(ids(dir.descendants("a.", false)), vec!["a.b"]);
    }

    #[test]
    fn load_replaces_same_id() {
        let mut dir = ModuleDirectory::new();
        dir.load(Module::new("m"));
        dir.load(Module::new("m"));
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.ids().collect::<Vec<_>>(), vec!["m"]);
    }
}
