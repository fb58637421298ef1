//! Launcher writer: turns a chosen candidate into a launcher file
//!
//! The file format is behind [`LinkWriter`]: `.lnk` shell links on Windows,
//! freedesktop entries elsewhere. Every write in a batch stands alone.

pub mod desktop;
#[cfg(target_os = "windows")]
pub mod shell;

use crate::candidate::{file_stem, CandidateApp};
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a file name
const ILLEGAL_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Suffix attempts before a name collision is reported as a failure
const MAX_NAME_SUFFIX: usize = 99;

/// What a launcher record points at
#[derive(Debug, Clone, Copy)]
pub struct LinkSpec<'a> {
    pub name: &'a str,
    pub target: &'a Path,
    pub working_dir: &'a Path,
    pub icon: &'a Path,
    pub icon_index: i32,
}

/// A platform launcher format
pub trait LinkWriter {
    /// File extension of written launchers, without the dot
    fn extension(&self) -> &str;

    /// Write one launcher record at `path`
    fn write_link(&self, spec: &LinkSpec<'_>, path: &Path) -> io::Result<()>;
}

/// Outcome of one write attempt
#[derive(Debug)]
pub struct LauncherWriteResult {
    pub name: String,
    pub target: PathBuf,
    pub outcome: Result<PathBuf>,
}

impl LauncherWriteResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Replace characters illegal in file names with spaces and trim the result
pub fn sanitize_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_NAME_CHARS.contains(&c) || c.is_control() {
                ' '
            } else {
                c
            }
        })
        .collect();
    replaced.trim().trim_end_matches('.').trim_end().to_owned()
}

/// Write one launcher for `target` into `destination`.
pub fn write_launcher(
    writer: &dyn LinkWriter,
    name: &str,
    target: &Path,
    destination: &Path,
) -> Result<PathBuf> {
    if !target.is_file() {
        return Err(Error::TargetMissing(target.to_path_buf()));
    }

    fs::create_dir_all(destination).map_err(|source| Error::CreateDestination {
        path: destination.to_path_buf(),
        source,
    })?;

    let mut base = sanitize_name(name);
    if base.is_empty() {
        base = file_stem(target).unwrap_or_else(|| "Program".to_string());
    }
    let path = free_path(destination, &base, writer.extension())?;

    let working_dir = target.parent().unwrap_or(destination);
    let spec = LinkSpec {
        name: &base,
        target,
        working_dir,
        icon: target,
        icon_index: 0,
    };

    writer
        .write_link(&spec, &path)
        .map_err(|source| Error::WriteLink {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Write every selected candidate; one failure never stops the rest.
pub fn write_launchers(
    writer: &dyn LinkWriter,
    selection: &[CandidateApp],
    destination: &Path,
) -> Vec<LauncherWriteResult> {
    selection
        .iter()
        .map(|app| {
            let outcome = write_launcher(writer, &app.name, &app.target_path, destination);
            match &outcome {
                Ok(path) => log::info!("Created {:?} -> {:?}", path, app.target_path),
                Err(e) => log::warn!("Failed to create launcher for {}: {}", app.name, e),
            }
            LauncherWriteResult {
                name: app.name.clone(),
                target: app.target_path.clone(),
                outcome,
            }
        })
        .collect()
}

/// First `base.ext`, `base (2).ext`, ... that does not exist yet
fn free_path(destination: &Path, base: &str, extension: &str) -> Result<PathBuf> {
    let first = destination.join(format!("{}.{}", base, extension));
    if !first.exists() {
        return Ok(first);
    }

    (2..=MAX_NAME_SUFFIX)
        .map(|n| destination.join(format!("{} ({}).{}", base, n, extension)))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::WriteLink {
            path: first,
            source: io::Error::new(io::ErrorKind::AlreadyExists, "no free launcher name"),
        })
}

#[cfg(test)]
mod tests {
    use super::desktop::DesktopEntryWriter;
    use super::*;
    use crate::candidate::Source;
    use std::fs::File;
    use tempfile::TempDir;

    fn launchers_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_name(r#"A/B\C:D*E?F"G<H>I|J"#), "A B C D E F G H I J");
        assert_eq!(sanitize_name("  Foo: "), "Foo");
        assert_eq!(sanitize_name("Tool v1.2."), "Tool v1.2");
        assert_eq!(sanitize_name("???"), "");
    }

    #[test]
    fn test_write_creates_destination() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("Foo").join("foo.exe");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        File::create(&target).unwrap();

        let dest = tmp.path().join("Programs").join("Recovered");
        let writer = DesktopEntryWriter::new();
        let path = write_launcher(&writer, "Foo: Pro", &target, &dest).unwrap();

        assert_eq!(path, dest.join("Foo  Pro.desktop"));
        assert!(path.is_file());
    }

    #[test]
    fn test_missing_target_fails() {
        let tmp = TempDir::new().unwrap();
        let writer = DesktopEntryWriter::new();
        let result = write_launcher(&writer, "Gone", &tmp.path().join("gone.exe"), tmp.path());
        assert!(matches!(result, Err(Error::TargetMissing(_))));
    }

    #[test]
    fn test_name_collision_gets_suffix() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("app.exe");
        File::create(&target).unwrap();
        let dest = tmp.path().join("out");

        let writer = DesktopEntryWriter::new();
        write_launcher(&writer, "App", &target, &dest).unwrap();
        let second = write_launcher(&writer, "App", &target, &dest).unwrap();

        assert_eq!(second, dest.join("App (2).desktop"));
    }

    #[test]
    fn test_empty_name_uses_target_stem() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("viewer.exe");
        File::create(&target).unwrap();
        let dest = tmp.path().join("out");

        let writer = DesktopEntryWriter::new();
        let path = write_launcher(&writer, "<>", &target, &dest).unwrap();
        assert_eq!(path, dest.join("viewer.desktop"));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("present.exe");
        File::create(&present).unwrap();
        let dest = tmp.path().join("Recovered");

        let selection = vec![
            CandidateApp::new("Vanished", tmp.path().join("vanished.exe"), Source::Scan),
            CandidateApp::new("Present", present.clone(), Source::Uninstall),
        ];
        let writer = DesktopEntryWriter::new();
        let results = write_launchers(&writer, &selection, &dest);

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0].outcome, Err(Error::TargetMissing(_))));
        assert!(results[1].is_success());
        assert_eq!(launchers_in(&dest), vec!["Present.desktop".to_string()]);
    }

    #[test]
    fn test_uncreatable_destination_fails_per_item() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("app.exe");
        File::create(&target).unwrap();
        let blocker = tmp.path().join("blocker");
        File::create(&blocker).unwrap();

        let writer = DesktopEntryWriter::new();
        let result = write_launcher(&writer, "App", &target, &blocker.join("sub"));
        assert!(matches!(result, Err(Error::CreateDestination { .. })));
    }
}
