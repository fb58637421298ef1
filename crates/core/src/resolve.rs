//! Turns raw registry strings and install folders into executable paths
//!
//! Registry data is noisy: quoted paths, `,index` icon suffixes, arguments
//! appended after the binary, and `.ico` files shipped next to the real
//! executable. Everything here answers "nothing" rather than failing.

use crate::candidate::file_stem;
use crate::heuristic::{has_executable_extension, LauncherPolicy};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Derive a best-guess executable path from a raw value, without touching disk.
pub fn executable_hint(raw: &str) -> Option<String> {
    let value = strip_icon_index(trim_quotes(raw));
    let lower = value.to_ascii_lowercase();

    if let Some(end) = exe_end(&lower) {
        return Some(value[..end].to_string());
    }

    if lower.ends_with(".ico") {
        return Some(format!("{}.exe", &value[..value.len() - ".ico".len()]));
    }

    None
}

/// Resolve a raw value to the canonical path of an existing executable.
pub fn resolve_target(raw: &str) -> Option<PathBuf> {
    let hint = executable_hint(raw)?;
    let path = Path::new(&hint);
    if !path.is_absolute() {
        return None;
    }

    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => canonical(path).ok(),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Hint {:?} from {:?} does not resolve: {}", hint, raw, e);
            None
        }
    }
}

/// Pick the main executable inside an install folder.
///
/// Survivors of the launcher policy whose stem contains `hint` win, largest
/// first; without a hint match the largest survivor is taken. At most
/// `budget` executables are inspected.
pub fn resolve_in_folder(
    dir: &Path,
    hint: Option<&str>,
    policy: &LauncherPolicy,
    budget: usize,
) -> Option<PathBuf> {
    if !dir.is_absolute() || !dir.is_dir() {
        return None;
    }

    let hint = hint
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty());

    let mut best_match: Option<(u64, PathBuf)> = None;
    let mut best_any: Option<(u64, PathBuf)> = None;
    let mut inspected = 0usize;

    let entries = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry under {:?}: {}", dir, e);
                None
            }
        });

    for entry in entries {
        if !entry.file_type().is_file() || !has_executable_extension(entry.path()) {
            continue;
        }
        if inspected >= budget {
            log::debug!("Fallback budget of {} reached in {:?}", budget, dir);
            break;
        }
        inspected += 1;

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                log::debug!("Cannot stat {:?}: {}", entry.path(), e);
                continue;
            }
        };
        if !policy.classify(entry.path(), size).is_accept() {
            continue;
        }

        let stem = file_stem(entry.path()).unwrap_or_default().to_lowercase();
        if let Some(hint) = &hint {
            if stem.contains(hint.as_str()) && is_larger(&best_match, size) {
                best_match = Some((size, entry.path().to_path_buf()));
            }
        }
        if is_larger(&best_any, size) {
            best_any = Some((size, entry.path().to_path_buf()));
        }
    }

    best_match
        .or(best_any)
        .and_then(|(_, path)| canonical(&path).ok())
}

fn is_larger(best: &Option<(u64, PathBuf)>, size: u64) -> bool {
    best.as_ref().map_or(true, |(best, _)| size > *best)
}

/// Absolute, link-resolved form of an existing path
pub fn canonical(path: &Path) -> io::Result<PathBuf> {
    fs::canonicalize(path).map(strip_verbatim)
}

/// Drop the `\\?\` prefix Windows adds on canonicalization
#[cfg(target_os = "windows")]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy().into_owned();
    match text.strip_prefix(r"\\?\") {
        Some(rest) if rest.starts_with(r"UNC\") => PathBuf::from(format!(r"\\{}", &rest[4..])),
        Some(rest) => PathBuf::from(rest),
        None => path,
    }
}

#[cfg(not(target_os = "windows"))]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    path
}

fn trim_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

fn strip_icon_index(value: &str) -> &str {
    match value.rsplit_once(',') {
        Some((head, index))
            if !index.trim().is_empty() && index.trim().chars().all(|c| c.is_ascii_digit()) =>
        {
            trim_quotes(head)
        }
        _ => value,
    }
}

/// End offset of the first `.exe` that is not part of a longer word
fn exe_end(lower: &str) -> Option<usize> {
    lower.match_indices(".exe").map(|(i, _)| i + 4).find(|&end| {
        lower[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}
