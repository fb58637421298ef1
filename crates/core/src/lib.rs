//! Core library for launcher recovery
//!
//! Discovers installed programs that have no Start-menu launcher by merging
//! the App Paths and Uninstall registry subtrees with a bounded folder scan,
//! then writes launchers for whatever the caller selects.

pub mod aggregate;
pub mod candidate;
pub mod config;
pub mod error;
pub mod existing;
pub mod heuristic;
pub mod link;
pub mod platform;
pub mod recover;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod scan;
pub mod select;

pub use candidate::{CandidateApp, Source};
pub use config::Config;
pub use error::{Error, Result};
pub use link::{LauncherWriteResult, LinkWriter};
pub use platform::Platform;
pub use recover::{Discovery, Recovery, RecoveryOptions, Scope};
pub use report::{RunReport, WriteStatus};
pub use select::{SelectAll, Selection, Selector};
