//! In-memory registry used by tests

use super::{RegistryRoot, RegistryView};
use std::collections::{BTreeMap, BTreeSet};
use std::io;

#[derive(Default)]
pub(crate) struct MemoryRegistry {
    keys: BTreeMap<(RegistryRoot, String), BTreeMap<String, String>>,
    denied: BTreeSet<(RegistryRoot, String)>,
}

impl MemoryRegistry {
    pub(crate) fn insert(&mut self, root: &RegistryRoot, subkey: &str, values: &[(&str, &str)]) {
        let entry = self.keys.entry((*root, subkey.to_string())).or_default();
        for (name, value) in values {
            entry.insert(name.to_string(), value.to_string());
        }
    }

    /// Make every read of `subkey` fail with access denied
    pub(crate) fn deny(&mut self, root: &RegistryRoot, subkey: &str) {
        self.denied.insert((*root, subkey.to_string()));
    }
}

impl RegistryView for MemoryRegistry {
    fn subkeys(&self, root: &RegistryRoot) -> io::Result<Vec<String>> {
        let names: Vec<String> = self
            .keys
            .keys()
            .filter(|(r, _)| r == root)
            .map(|(_, name)| name.clone())
            .collect();
        if names.is_empty() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such key"));
        }
        Ok(names)
    }

    fn value(&self, root: &RegistryRoot, subkey: &str, name: &str) -> io::Result<Option<String>> {
        let key = (*root, subkey.to_string());
        if self.denied.contains(&key) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        }
        match self.keys.get(&key) {
            Some(values) => Ok(values.get(name).cloned()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such key")),
        }
    }
}
