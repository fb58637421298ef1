//! Orchestration of one recovery run
//!
//! Index existing launchers, read both registry sources, scan folders,
//! merge, drop names that already have a launcher, ask the selector,
//! then write whatever was chosen. Selection is the only point where the
//! run waits on anything outside the machine.

use crate::aggregate::aggregate;
use crate::candidate::CandidateApp;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::existing::LauncherIndex;
use crate::heuristic::LauncherPolicy;
use crate::link::{sanitize_name, write_launchers, LauncherWriteResult, LinkWriter};
use crate::platform::Platform;
use crate::registry::{AppPathsReader, RegistryView, UninstallReader};
use crate::report::{ReportEntry, RunReport, SourceCounts};
use crate::scan::FolderScanner;
use crate::select::{Selection, Selector};
use chrono::Utc;
use std::fmt;
use std::path::PathBuf;

/// Whose Start menu is indexed and written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    CurrentUser,
    AllUsers,
}

impl Scope {
    pub fn label(self) -> &'static str {
        match self {
            Scope::CurrentUser => "the current user",
            Scope::AllUsers => "all users",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Effective parameters of a run, after config and flags are merged
#[derive(Debug, Clone)]
pub struct RecoveryOptions {
    pub scope: Scope,
    pub inspection_budget: usize,
    pub fallback_budget: usize,
    pub extra_roots: Vec<PathBuf>,
    pub subfolder: String,
    /// Compute and report, never write
    pub preview: bool,
    pub policy: LauncherPolicy,
}

impl RecoveryOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            scope: Scope::default(),
            inspection_budget: config.inspection_budget,
            fallback_budget: config.fallback_budget,
            extra_roots: config.extra_roots.clone(),
            subfolder: config.subfolder.clone(),
            preview: false,
            policy: config.launcher_policy(),
        }
    }
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Candidates still lacking a launcher, plus bookkeeping
#[derive(Debug, Clone)]
pub struct Discovery {
    pub candidates: Vec<CandidateApp>,
    pub counts: SourceCounts,
    pub existing_launchers: usize,
    pub already_present: usize,
}

pub struct Recovery<'a> {
    registry: &'a dyn RegistryView,
    writer: &'a dyn LinkWriter,
    programs_root: PathBuf,
    scan_roots: Vec<PathBuf>,
    options: RecoveryOptions,
}

impl<'a> Recovery<'a> {
    /// Scan roots default to `options.extra_roots`
    pub fn new(
        registry: &'a dyn RegistryView,
        writer: &'a dyn LinkWriter,
        programs_root: PathBuf,
        options: RecoveryOptions,
    ) -> Self {
        Self {
            registry,
            writer,
            programs_root,
            scan_roots: options.extra_roots.clone(),
            options,
        }
    }

    /// Wire a run to the platform's registry, launcher format and roots
    pub fn for_platform(platform: &'a dyn Platform, options: RecoveryOptions) -> Result<Self> {
        let programs_root = platform
            .programs_root(options.scope)
            .ok_or(Error::NoProgramsRoot(options.scope.label()))?;

        let mut scan_roots = platform.default_scan_roots();
        for root in &options.extra_roots {
            if !scan_roots.contains(root) {
                scan_roots.push(root.clone());
            }
        }

        Ok(Self::new(
            platform.registry(),
            platform.link_writer(),
            programs_root,
            options,
        )
        .with_scan_roots(scan_roots))
    }

    pub fn with_scan_roots(mut self, scan_roots: Vec<PathBuf>) -> Self {
        self.scan_roots = scan_roots;
        self
    }

    pub fn scan_roots(&self) -> &[PathBuf] {
        &self.scan_roots
    }

    pub fn programs_root(&self) -> &PathBuf {
        &self.programs_root
    }

    /// Folder receiving new launchers
    pub fn destination(&self) -> PathBuf {
        self.programs_root.join(&self.options.subfolder)
    }

    pub fn discover(&self) -> Discovery {
        let existing = LauncherIndex::build(&self.programs_root, self.writer.extension());

        let app_paths = AppPathsReader::new(self.registry).read();
        let uninstall = UninstallReader::new(
            self.registry,
            &self.options.policy,
            self.options.fallback_budget,
        )
        .read();
        let scan = FolderScanner::new(&self.options.policy, self.options.inspection_budget)
            .scan(&self.scan_roots);

        let mut counts = SourceCounts {
            app_paths: app_paths.len(),
            uninstall: uninstall.len(),
            scan: scan.candidates.len(),
            merged: 0,
            inspected: scan.inspected,
            scan_truncated: scan.truncated,
        };

        let sources = app_paths.into_iter().chain(uninstall);
        let merged = aggregate(sources.chain(scan.candidates));
        counts.merged = merged.len();

        let (present, candidates): (Vec<_>, Vec<_>) = merged
            .into_iter()
            .partition(|app| has_launcher(&existing, &app.name));
        for app in &present {
            log::debug!("{} already has a launcher", app.name);
        }

        log::info!(
            "Discovered {} candidates ({} App Paths, {} Uninstall, {} scanned; {} merged, {} already present)",
            candidates.len(),
            counts.app_paths,
            counts.uninstall,
            counts.scan,
            counts.merged,
            present.len()
        );

        Discovery {
            candidates,
            counts,
            existing_launchers: existing.len(),
            already_present: present.len(),
        }
    }

    /// Write the chosen launchers. Cancel, empty choice and preview write nothing.
    pub fn apply(&self, selection: Selection) -> Vec<LauncherWriteResult> {
        if self.options.preview {
            log::info!("Preview mode, nothing written");
            return vec![];
        }

        let chosen = selection.into_chosen();
        if chosen.is_empty() {
            log::info!("Nothing selected");
            return vec![];
        }

        write_launchers(self.writer, &chosen, &self.destination())
    }

    pub fn run(&self, selector: &mut dyn Selector) -> RunReport {
        let discovery = self.discover();

        let mut cancelled = false;
        let results = if self.options.preview || discovery.candidates.is_empty() {
            vec![]
        } else {
            let selection = selector.select(discovery.candidates.clone());
            cancelled = selection == Selection::Cancelled;
            self.apply(selection)
        };

        let report = RunReport {
            generated_at: Utc::now(),
            preview: self.options.preview,
            cancelled,
            destination: self.destination(),
            counts: discovery.counts,
            existing_launchers: discovery.existing_launchers,
            already_present: discovery.already_present,
            candidates: discovery.candidates,
            results: results.iter().map(ReportEntry::from).collect(),
        };

        if !report.results.is_empty() {
            log::info!(
                "Created {} launchers, {} failed",
                report.succeeded(),
                report.failed()
            );
        }
        report
    }
}

fn has_launcher(existing: &LauncherIndex, name: &str) -> bool {
    existing.contains(name) || existing.contains(&sanitize_name(name))
}
