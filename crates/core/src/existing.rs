//! Index of launchers already present in the Start-menu tree

use crate::candidate::file_stem;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Lower-cased base names of every launcher file below a Programs root
#[derive(Debug, Default, Clone)]
pub struct LauncherIndex {
    names: HashSet<String>,
}

impl LauncherIndex {
    /// Walk `root` recursively for files with `extension`. A missing root gives an empty index.
    pub fn build(root: &Path, extension: &str) -> Self {
        let mut names = HashSet::new();
        if !root.is_dir() {
            log::debug!(
                "Programs root {:?} does not exist, no existing launchers",
                root
            );
            return Self { names };
        }

        let entries = WalkDir::new(root).into_iter().filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry under {:?}: {}", root, e);
                None
            }
        });

        for entry in entries {
            let is_launcher = entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
            if !is_launcher {
                continue;
            }
            if let Some(stem) = file_stem(entry.path()) {
                names.insert(stem.to_lowercase());
            }
        }

        log::info!("Found {} existing launchers under {:?}", names.len(), root);
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
