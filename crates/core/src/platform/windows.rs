//! Windows: live registry, `.lnk` shell links, Start-menu folders
//!
//! Roots:
//! - %APPDATA%\Microsoft\Windows\Start Menu\Programs (current user)
//! - %ProgramData%\Microsoft\Windows\Start Menu\Programs (all users)
//! - %ProgramFiles%, %ProgramFiles(x86)%, %LOCALAPPDATA%\Programs (scan)

use crate::link::shell::ShellLinkWriter;
use crate::link::LinkWriter;
use crate::platform::Platform;
use crate::recover::Scope;
use crate::registry::windows::WindowsRegistry;
use crate::registry::RegistryView;
use std::path::PathBuf;

const START_MENU_PROGRAMS: &str = r"Microsoft\Windows\Start Menu\Programs";

pub struct WindowsPlatform {
    registry: WindowsRegistry,
    writer: ShellLinkWriter,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            registry: WindowsRegistry::new(),
            writer: ShellLinkWriter::new(),
        }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl Platform for WindowsPlatform {
    fn programs_root(&self, scope: Scope) -> Option<PathBuf> {
        let base = match scope {
            Scope::CurrentUser => env_dir("APPDATA"),
            Scope::AllUsers => env_dir("ProgramData"),
        };
        base.map(|dir| dir.join(START_MENU_PROGRAMS))
    }

    fn default_scan_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();
        let candidates = [
            env_dir("ProgramFiles"),
            env_dir("ProgramFiles(x86)"),
            env_dir("LOCALAPPDATA").map(|dir| dir.join("Programs")),
        ];
        for root in candidates.into_iter().flatten() {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    fn registry(&self) -> &dyn RegistryView {
        &self.registry
    }

    fn link_writer(&self) -> &dyn LinkWriter {
        &self.writer
    }

    fn is_elevated(&self) -> bool {
        // SAFETY: IsUserAnAdmin takes no arguments and only inspects the process token
        unsafe { ::windows::Win32::UI::Shell::IsUserAnAdmin().as_bool() }
    }
}
