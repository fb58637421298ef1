//! Serializable summary of one run

use crate::candidate::CandidateApp;
use crate::link::LauncherWriteResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Candidates contributed by each source, before and after merging
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SourceCounts {
    pub app_paths: usize,
    pub uninstall: usize,
    pub scan: usize,
    /// Distinct targets after de-duplication
    pub merged: usize,
    /// Executables the folder scan looked at
    pub inspected: usize,
    pub scan_truncated: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Created,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub target: PathBuf,
    pub status: WriteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&LauncherWriteResult> for ReportEntry {
    fn from(result: &LauncherWriteResult) -> Self {
        match &result.outcome {
            Ok(path) => Self {
                name: result.name.clone(),
                target: result.target.clone(),
                status: WriteStatus::Created,
                path: Some(path.clone()),
                kind: None,
                reason: None,
            },
            Err(e) => Self {
                name: result.name.clone(),
                target: result.target.clone(),
                status: WriteStatus::Failed,
                path: None,
                kind: Some(e.kind()),
                reason: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub preview: bool,
    pub cancelled: bool,
    pub destination: PathBuf,
    pub counts: SourceCounts,
    pub existing_launchers: usize,
    /// Merged candidates dropped because a launcher with that name exists
    pub already_present: usize,
    pub candidates: Vec<CandidateApp>,
    pub results: Vec<ReportEntry>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == WriteStatus::Created)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_entry_from_failure() {
        let result = LauncherWriteResult {
            name: "Gone".to_string(),
            target: PathBuf::from("/x/gone.exe"),
            outcome: Err(Error::TargetMissing(PathBuf::from("/x/gone.exe"))),
        };
        let entry = ReportEntry::from(&result);
        assert_eq!(entry.status, WriteStatus::Failed);
        assert_eq!(entry.kind, Some("TargetMissing"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json.get("path").is_none());
    }
}
