//! relink
//!
//! Finds installed programs that have no Start-menu launcher and recreates
//! the missing shortcuts.

mod picker;

use anyhow::{Context, Result};
use clap::Parser;
use picker::ConsolePicker;
use relink_core::report::WriteStatus;
use relink_core::{
    platform, Config, Platform, Recovery, RecoveryOptions, RunReport, Scope, SelectAll, Selector,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relink", version)]
#[command(about = "Recreate missing Start-menu launchers for installed programs")]
struct Args {
    /// Use the all-users Start menu instead of the current user's
    #[arg(long)]
    all_users: bool,

    /// Maximum number of executables inspected by the folder scan
    #[arg(long, value_name = "N")]
    budget: Option<usize>,

    /// Additional folder to scan, may be repeated
    #[arg(long = "root", value_name = "PATH")]
    roots: Vec<PathBuf>,

    /// Folder under the Programs root that receives new launchers
    #[arg(long, value_name = "NAME")]
    subfolder: Option<String>,

    /// List candidates without creating anything
    #[arg(long)]
    preview: bool,

    /// Create launchers for every candidate without asking
    #[arg(long)]
    auto: bool,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flags win over the config file
    fn options(&self, config: &Config) -> RecoveryOptions {
        let mut options = RecoveryOptions::from_config(config);
        if self.all_users {
            options.scope = Scope::AllUsers;
        }
        if let Some(budget) = self.budget {
            options.inspection_budget = budget;
        }
        if let Some(subfolder) = &self.subfolder {
            options.subfolder = subfolder.clone();
        }
        for root in &self.roots {
            if !options.extra_roots.contains(root) {
                options.extra_roots.push(root.clone());
            }
        }
        options.preview = self.preview;
        options
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    let options = args.options(&config);

    let platform = platform::current();
    if options.scope == Scope::AllUsers && !platform.is_elevated() {
        log::warn!("Not running elevated; writing to the all-users Start menu will likely fail");
    }

    let recovery = Recovery::for_platform(&platform, options)
        .context("Failed to locate the Start-menu Programs folder")?;
    log::info!(
        "Programs root {:?}, scanning {} folders",
        recovery.programs_root(),
        recovery.scan_roots().len()
    );

    let mut selector: Box<dyn Selector> = if args.auto {
        Box::new(SelectAll)
    } else {
        Box::new(ConsolePicker::stdin())
    };
    let report = recovery.run(selector.as_mut());

    print_summary(&report);

    if let Some(path) = &args.report {
        let json = report.to_json().context("Failed to serialize report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report to {:?}", path))?;
        log::info!("Report written to {:?}", path);
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    if report.preview {
        println!("{} programs without a launcher:", report.candidates.len());
        for app in &report.candidates {
            println!(
                "  {:<40} [{}] {}",
                app.name,
                app.source,
                app.target_path.display()
            );
        }
        return;
    }

    if report.candidates.is_empty() {
        println!("Every discovered program already has a launcher.");
        return;
    }
    if report.cancelled || report.results.is_empty() {
        println!("Nothing selected, no launchers created.");
        return;
    }

    for entry in &report.results {
        match entry.status {
            WriteStatus::Created => println!(
                "  created  {}",
                entry.path.as_ref().unwrap_or(&entry.target).display()
            ),
            WriteStatus::Failed => println!(
                "  failed   {}: {}",
                entry.name,
                entry.reason.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!(
        "{} created, {} failed, in {}",
        report.succeeded(),
        report.failed(),
        report.destination.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            inspection_budget: 10,
            fallback_budget: 7,
            subfolder: "FromConfig".to_string(),
            extra_roots: vec![PathBuf::from("/cfg")],
            min_launcher_size: 1024,
            extra_deny_tokens: vec!["beta".to_string()],
        }
    }

    #[test]
    fn test_config_values_without_flags() {
        let args = Args::try_parse_from(["relink"]).unwrap();
        let options = args.options(&config());

        assert_eq!(options.scope, Scope::CurrentUser);
        assert_eq!(options.inspection_budget, 10);
        assert_eq!(options.fallback_budget, 7);
        assert_eq!(options.subfolder, "FromConfig");
        assert_eq!(options.extra_roots, vec![PathBuf::from("/cfg")]);
        assert_eq!(options.policy.min_size, 1024);
        assert!(!options.preview);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "relink",
            "--all-users",
            "--budget",
            "42",
            "--subfolder",
            "Restored",
            "--root",
            "/games",
            "--root",
            "/cfg",
            "--root",
            "/games",
            "--preview",
        ])
        .unwrap();
        let options = args.options(&config());

        assert_eq!(options.scope, Scope::AllUsers);
        assert_eq!(options.inspection_budget, 42);
        assert_eq!(options.subfolder, "Restored");
        assert_eq!(
            options.extra_roots,
            vec![PathBuf::from("/cfg"), PathBuf::from("/games")]
        );
        assert!(options.preview);
        assert_eq!(options.fallback_budget, 7);
    }

    #[test]
    fn test_rejects_non_numeric_budget() {
        assert!(Args::try_parse_from(["relink", "--budget", "many"]).is_err());
    }
}
