//! The candidate record shared by every discovery source

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a candidate was discovered. Declaration order is the dedup rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    AppPaths,
    Uninstall,
    Scan,
}

impl Source {
    /// Lower wins when several sources point at the same executable
    pub fn rank(self) -> u8 {
        match self {
            Source::AppPaths => 0,
            Source::Uninstall => 1,
            Source::Scan => 2,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::AppPaths => "AppPaths",
            Source::Uninstall => "Uninstall",
            Source::Scan => "Scan",
        })
    }
}

/// An installed executable that may deserve a launcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateApp {
    /// Display name, editable by the selection step
    pub name: String,
    /// Canonical absolute path of the executable
    pub target_path: PathBuf,
    pub source: Source,
}

impl CandidateApp {
    pub fn new(name: impl Into<String>, target_path: PathBuf, source: Source) -> Self {
        Self {
            name: name.into(),
            target_path,
            source,
        }
    }

    /// Build a candidate named after the executable's file stem
    pub fn from_executable(target_path: PathBuf, source: Source) -> Option<Self> {
        let name = file_stem(&target_path)?;
        Some(Self::new(name, target_path, source))
    }
}

pub(crate) fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_declaration_order() {
        assert!(Source::AppPaths.rank() < Source::Uninstall.rank());
        assert!(Source::Uninstall.rank() < Source::Scan.rank());
        assert!(Source::AppPaths < Source::Scan);
    }

    #[test]
    fn test_from_executable_uses_stem() {
        let app = CandidateApp::from_executable(PathBuf::from("/opt/Foo/foo.exe"), Source::Scan)
            .unwrap();
        assert_eq!(app.name, "foo");
        assert_eq!(app.source, Source::Scan);
    }
}
