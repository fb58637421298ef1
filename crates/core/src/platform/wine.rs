//! Non-Windows hosts: Windows programs inside a Wine prefix
//!
//! There is no registry to read, so only the folder scan contributes.
//! Launchers are freedesktop entries that start the target through `wine`.
//!
//! Roots:
//! - $XDG_DATA_HOME/applications (current user)
//! - /usr/local/share/applications (all users)
//! - $WINEPREFIX/drive_c/Program Files, Program Files (x86) (scan)

use crate::link::desktop::DesktopEntryWriter;
use crate::link::LinkWriter;
use crate::platform::Platform;
use crate::recover::Scope;
use crate::registry::{EmptyRegistry, RegistryView};
use std::path::PathBuf;

pub struct WinePlatform {
    registry: EmptyRegistry,
    writer: DesktopEntryWriter,
}

impl WinePlatform {
    pub fn new() -> Self {
        Self {
            registry: EmptyRegistry,
            writer: DesktopEntryWriter::with_runner("wine"),
        }
    }

    fn prefix(&self) -> Option<PathBuf> {
        std::env::var_os("WINEPREFIX")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".wine")))
    }
}

impl Default for WinePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WinePlatform {
    fn programs_root(&self, scope: Scope) -> Option<PathBuf> {
        match scope {
            Scope::CurrentUser => {
                directories::BaseDirs::new().map(|dirs| dirs.data_dir().join("applications"))
            }
            Scope::AllUsers => Some(PathBuf::from("/usr/local/share/applications")),
        }
    }

    fn default_scan_roots(&self) -> Vec<PathBuf> {
        match self.prefix() {
            Some(prefix) => {
                let drive_c = prefix.join("drive_c");
                vec![
                    drive_c.join("Program Files"),
                    drive_c.join("Program Files (x86)"),
                ]
            }
            None => vec![],
        }
    }

    fn registry(&self) -> &dyn RegistryView {
        &self.registry
    }

    fn link_writer(&self) -> &dyn LinkWriter {
        &self.writer
    }

    fn is_elevated(&self) -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() == 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wine_platform_shape() {
        let platform = WinePlatform::new();
        assert_eq!(platform.link_writer().extension(), "desktop");
        assert_eq!(
            platform.programs_root(Scope::AllUsers),
            Some(PathBuf::from("/usr/local/share/applications"))
        );
        assert!(platform
            .default_scan_roots()
            .iter()
            .all(|root| root.ends_with("Program Files") || root.ends_with("Program Files (x86)")));
    }
}
