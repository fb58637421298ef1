//! Error types surfaced by the core

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The target executable vanished between discovery and the write
    #[error("target no longer exists: {}", .0.display())]
    TargetMissing(PathBuf),

    #[error("cannot create destination folder {}: {source}", .path.display())]
    CreateDestination { path: PathBuf, source: io::Error },

    #[error("cannot write launcher {}: {source}", .path.display())]
    WriteLink { path: PathBuf, source: io::Error },

    #[error("no Programs root is known for {0} on this platform")]
    NoProgramsRoot(&'static str),

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
}

impl Error {
    /// Short machine-readable tag, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::TargetMissing(_) => "TargetMissing",
            Error::CreateDestination { .. } => "CreateDestination",
            Error::WriteLink { .. } => "WriteLink",
            Error::NoProgramsRoot(_) => "NoProgramsRoot",
            Error::Config { .. } | Error::ConfigRead { .. } => "Config",
        }
    }
}
