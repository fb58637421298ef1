//! Live registry access through winreg

use super::{expand_env, Hive, RegistryRoot, RegistryView, Wow};
use std::io;
use winreg::enums::{
    HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY,
};
use winreg::RegKey;

pub struct WindowsRegistry;

impl WindowsRegistry {
    pub fn new() -> Self {
        Self
    }

    fn open(root: &RegistryRoot, subkey: Option<&str>) -> io::Result<RegKey> {
        let hive = RegKey::predef(match root.hive {
            Hive::LocalMachine => HKEY_LOCAL_MACHINE,
            Hive::CurrentUser => HKEY_CURRENT_USER,
        });
        let flags = KEY_READ
            | match root.view {
                Wow::Native => KEY_WOW64_64KEY,
                Wow::Compat32 => KEY_WOW64_32KEY,
            };
        let path = match subkey {
            Some(subkey) => format!(r"{}\{}", root.path, subkey),
            None => root.path.to_string(),
        };
        hive.open_subkey_with_flags(path, flags)
    }
}

impl Default for WindowsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryView for WindowsRegistry {
    fn subkeys(&self, root: &RegistryRoot) -> io::Result<Vec<String>> {
        let key = Self::open(root, None)?;
        Ok(key
            .enum_keys()
            .filter_map(|name| match name {
                Ok(name) => Some(name),
                Err(e) => {
                    log::debug!("Cannot enumerate a subkey of {}: {}", root.path, e);
                    None
                }
            })
            .collect())
    }

    fn value(&self, root: &RegistryRoot, subkey: &str, name: &str) -> io::Result<Option<String>> {
        let key = Self::open(root, Some(subkey))?;
        match key.get_value::<String, _>(name) {
            Ok(value) if value.contains('%') => Ok(Some(expand_env(&value))),
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            // REG_DWORD and binary values are not paths or names
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(None),
            Err(e) => Err(e),
        }
    }
}
