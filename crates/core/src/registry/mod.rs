//! Registry sources: the App Paths and Uninstall subtrees
//!
//! Both readers go through [`RegistryView`] so the same code runs against
//! the live Windows registry or an in-memory table. A subkey that cannot
//! be read is skipped on its own; no partial record is ever produced.

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(test)]
pub(crate) mod memory;

use crate::candidate::{CandidateApp, Source};
use crate::heuristic::LauncherPolicy;
use crate::resolve::{resolve_in_folder, resolve_target};
use std::io;
use std::path::{Path, PathBuf};

pub const APP_PATHS_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths";
pub const UNINSTALL_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hive {
    LocalMachine,
    CurrentUser,
}

/// Registry view on 64-bit Windows: native or the 32-bit compatibility tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wow {
    Native,
    Compat32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistryRoot {
    pub hive: Hive,
    pub view: Wow,
    pub path: &'static str,
}

impl RegistryRoot {
    pub const fn new(hive: Hive, view: Wow, path: &'static str) -> Self {
        Self { hive, view, path }
    }
}

pub const APP_PATHS_ROOTS: &[RegistryRoot] = &[
    RegistryRoot::new(Hive::LocalMachine, Wow::Native, APP_PATHS_KEY),
    RegistryRoot::new(Hive::LocalMachine, Wow::Compat32, APP_PATHS_KEY),
    RegistryRoot::new(Hive::CurrentUser, Wow::Native, APP_PATHS_KEY),
];

pub const UNINSTALL_ROOTS: &[RegistryRoot] = &[
    RegistryRoot::new(Hive::LocalMachine, Wow::Native, UNINSTALL_KEY),
    RegistryRoot::new(Hive::LocalMachine, Wow::Compat32, UNINSTALL_KEY),
    RegistryRoot::new(Hive::CurrentUser, Wow::Native, UNINSTALL_KEY),
];

/// Read-only access to registry subtrees
pub trait RegistryView {
    /// Names of the direct subkeys of `root`
    fn subkeys(&self, root: &RegistryRoot) -> io::Result<Vec<String>>;

    /// String value `name` of `root\subkey`. An empty name is the default value.
    fn value(&self, root: &RegistryRoot, subkey: &str, name: &str) -> io::Result<Option<String>>;
}

/// Registry of a platform without one
pub struct EmptyRegistry;

impl RegistryView for EmptyRegistry {
    fn subkeys(&self, _root: &RegistryRoot) -> io::Result<Vec<String>> {
        Ok(vec![])
    }

    fn value(
        &self,
        _root: &RegistryRoot,
        _subkey: &str,
        _name: &str,
    ) -> io::Result<Option<String>> {
        Ok(None)
    }
}

/// Candidates from the App Paths subtree, named after the executable
pub struct AppPathsReader<'a> {
    registry: &'a dyn RegistryView,
}

impl<'a> AppPathsReader<'a> {
    pub fn new(registry: &'a dyn RegistryView) -> Self {
        Self { registry }
    }

    pub fn read(&self) -> Vec<CandidateApp> {
        read_roots(self.registry, APP_PATHS_ROOTS, |root, subkey| {
            self.read_entry(root, subkey)
        })
    }

    fn read_entry(&self, root: &RegistryRoot, subkey: &str) -> io::Result<Option<CandidateApp>> {
        let default = self.registry.value(root, subkey, "")?;
        let path = self.registry.value(root, subkey, "Path")?;

        let target = non_empty(default)
            .and_then(|raw| resolve_target(&raw))
            .or_else(|| non_empty(path).and_then(|raw| resolve_path_value(&raw, subkey)));

        Ok(target.and_then(|target| CandidateApp::from_executable(target, Source::AppPaths)))
    }
}

/// `Path` normally names the folder holding the executable the subkey is named after
fn resolve_path_value(raw: &str, subkey: &str) -> Option<PathBuf> {
    let raw = raw.trim().trim_matches('"');
    if let Some(target) = resolve_target(raw) {
        return Some(target);
    }

    let dir = raw.trim_end_matches(&['\\', '/'][..]);
    let dir = if dir.is_empty() || dir.ends_with(':') {
        Path::new(raw)
    } else {
        Path::new(dir)
    };
    if !dir.is_dir() {
        return None;
    }
    resolve_target(&dir.join(subkey).to_string_lossy())
}

/// Candidates from the Uninstall subtree, named by `DisplayName`
pub struct UninstallReader<'a> {
    registry: &'a dyn RegistryView,
    policy: &'a LauncherPolicy,
    fallback_budget: usize,
}

impl<'a> UninstallReader<'a> {
    pub fn new(
        registry: &'a dyn RegistryView,
        policy: &'a LauncherPolicy,
        fallback_budget: usize,
    ) -> Self {
        Self {
            registry,
            policy,
            fallback_budget,
        }
    }

    pub fn read(&self) -> Vec<CandidateApp> {
        read_roots(self.registry, UNINSTALL_ROOTS, |root, subkey| {
            self.read_entry(root, subkey)
        })
    }

    fn read_entry(&self, root: &RegistryRoot, subkey: &str) -> io::Result<Option<CandidateApp>> {
        let Some(name) = non_empty(self.registry.value(root, subkey, "DisplayName")?) else {
            return Ok(None);
        };
        let icon = non_empty(self.registry.value(root, subkey, "DisplayIcon")?);
        let location = non_empty(self.registry.value(root, subkey, "InstallLocation")?);

        // Some installers point the icon at their own uninstaller
        let from_icon = icon.and_then(|raw| resolve_target(&raw)).filter(|target| {
            match self.policy.denied_token(target) {
                Some(token) => {
                    log::debug!("{}: icon target {:?} denied by {:?}", name, target, token);
                    false
                }
                None => true,
            }
        });

        let target = from_icon.or_else(|| {
            location.and_then(|loc| {
                let dir = loc.trim().trim_matches('"');
                resolve_in_folder(
                    Path::new(dir),
                    Some(name.as_str()),
                    self.policy,
                    self.fallback_budget,
                )
            })
        });

        Ok(target.map(|target| CandidateApp::new(name, target, Source::Uninstall)))
    }
}

fn read_roots<F>(
    registry: &dyn RegistryView,
    roots: &[RegistryRoot],
    mut read_entry: F,
) -> Vec<CandidateApp>
where
    F: FnMut(&RegistryRoot, &str) -> io::Result<Option<CandidateApp>>,
{
    let mut candidates = Vec::new();

    for root in roots {
        let subkeys = match registry.subkeys(root) {
            Ok(subkeys) => subkeys,
            Err(e) => {
                log::debug!(
                    "Cannot open {:?}\\{} ({:?}): {}",
                    root.hive,
                    root.path,
                    root.view,
                    e
                );
                continue;
            }
        };

        let before = candidates.len();
        for subkey in &subkeys {
            match read_entry(root, subkey) {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => log::trace!("No executable for {}", subkey),
                Err(e) => log::debug!("Skipping unreadable subkey {}: {}", subkey, e),
            }
        }
        log::info!(
            "{:?}\\{} ({:?}): {} of {} entries resolved",
            root.hive,
            root.path,
            root.view,
            candidates.len() - before,
            subkeys.len()
        );
    }

    candidates
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Expand `%NAME%` references against the process environment.
/// Unknown variables are left as written.
pub fn expand_env(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match std::env::var(name) {
                    Ok(expanded) => out.push_str(&expanded),
                    Err(_) => {
                        out.push('%');
                        out.push_str(name);
                        out.push('%');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
