//! Platform-specific roots, registry access and launcher format

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(not(target_os = "windows"))]
pub mod wine;

use crate::link::LinkWriter;
use crate::recover::Scope;
use crate::registry::RegistryView;
use std::path::PathBuf;

/// Everything the core needs from the host
pub trait Platform {
    /// Start-menu Programs root for `scope`
    fn programs_root(&self, scope: Scope) -> Option<PathBuf>;

    /// Folders walked by the scanner unless overridden
    fn default_scan_roots(&self) -> Vec<PathBuf>;

    fn registry(&self) -> &dyn RegistryView;

    fn link_writer(&self) -> &dyn LinkWriter;

    /// Whether the process may write the all-users Programs root
    fn is_elevated(&self) -> bool;
}

/// Get the platform of the running host
#[cfg(target_os = "windows")]
pub fn current() -> impl Platform {
    windows::WindowsPlatform::new()
}

#[cfg(not(target_os = "windows"))]
pub fn current() -> impl Platform {
    wine::WinePlatform::new()
}
