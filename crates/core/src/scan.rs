//! Bounded filesystem scan for executables nobody registered

use crate::candidate::{CandidateApp, Source};
use crate::heuristic::{has_executable_extension, LauncherPolicy};
use crate::resolve::canonical;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default number of executables inspected across all roots
pub const DEFAULT_INSPECTION_BUDGET: usize = 5000;

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub candidates: Vec<CandidateApp>,
    /// Executables looked at, accepted or not
    pub inspected: usize,
    /// An executable past the budget was left uninspected
    pub truncated: bool,
}

pub struct FolderScanner<'a> {
    policy: &'a LauncherPolicy,
    budget: usize,
}

impl<'a> FolderScanner<'a> {
    pub fn new(policy: &'a LauncherPolicy, budget: usize) -> Self {
        Self { policy, budget }
    }

    /// Walk every root in order, sharing one inspection budget.
    ///
    /// Missing roots and unreadable directories are skipped.
    pub fn scan(&self, roots: &[PathBuf]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for root in roots {
            if !root.is_dir() {
                log::debug!("Scan root {:?} does not exist, skipping", root);
                continue;
            }

            let before = outcome.candidates.len();
            self.scan_root(root, &mut outcome);
            log::info!(
                "Scanned {:?}: {} candidates",
                root,
                outcome.candidates.len() - before
            );
            if outcome.truncated {
                break;
            }
        }

        if outcome.truncated {
            log::warn!(
                "Inspection budget of {} executables exhausted, scan results are partial",
                self.budget
            );
        }
        outcome
    }

    fn scan_root(&self, root: &Path, outcome: &mut ScanOutcome) {
        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("Skipping unreadable entry under {:?}: {}", root, e);
                    None
                }
            });

        for entry in entries {
            if !entry.file_type().is_file() || !has_executable_extension(entry.path()) {
                continue;
            }
            if outcome.inspected >= self.budget {
                outcome.truncated = true;
                return;
            }
            outcome.inspected += 1;

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    log::debug!("Cannot stat {:?}: {}", entry.path(), e);
                    continue;
                }
            };

            let verdict = self.policy.classify(entry.path(), size);
            if !verdict.is_accept() {
                log::trace!("Rejected {:?}: {:?}", entry.path(), verdict);
                continue;
            }

            let candidate = canonical(entry.path())
                .ok()
                .and_then(|path| CandidateApp::from_executable(path, Source::Scan));
            if let Some(candidate) = candidate {
                outcome.candidates.push(candidate);
            }
        }
    }
}
