//! Launcher heuristic: is this executable something a user would start?
//!
//! Precision over recall. Missing a real program is acceptable, offering
//! an uninstaller as an application is not.

use std::path::Path;

/// Smallest file size considered a real program (200 KiB)
pub const MIN_LAUNCHER_SIZE: u64 = 200 * 1024;

/// Base-name infixes that mark installers, helpers and services
pub const DENY_TOKENS: &[&str] = &[
    "unins",
    "uninstall",
    "setup",
    "install",
    "updater",
    "update",
    "elevation",
    "crashpad",
    "service",
    "daemon",
    "agent",
    "reporter",
    "telemetry",
    "console",
    "cli",
    "helper",
    "tool",
    "dbg",
    "redist",
    "vc_redist",
    "dxsetup",
    "repair",
    "cleanup",
    "watchdog",
    "monitor",
];

/// Extensions treated as executables by the scanner and folder fallback
pub const EXECUTABLE_EXTENSIONS: &[&str] = &["exe"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    TooSmall(u64),
    Denied(String),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Size floor plus deny table. The table is data so it can grow from config.
#[derive(Debug, Clone)]
pub struct LauncherPolicy {
    pub min_size: u64,
    deny_tokens: Vec<String>,
}

impl Default for LauncherPolicy {
    fn default() -> Self {
        Self {
            min_size: MIN_LAUNCHER_SIZE,
            deny_tokens: DENY_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl LauncherPolicy {
    pub fn with_min_size(mut self, min_size: u64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Append extra deny tokens; blanks are ignored and case is folded
    pub fn with_extra_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() && !self.deny_tokens.contains(&token) {
                self.deny_tokens.push(token);
            }
        }
        self
    }

    pub fn deny_tokens(&self) -> &[String] {
        &self.deny_tokens
    }

    /// Classify by file name and size without touching the filesystem
    pub fn classify(&self, path: &Path, size: u64) -> Verdict {
        if size < self.min_size {
            return Verdict::TooSmall(size);
        }

        match self.denied_token(path) {
            Some(token) => Verdict::Denied(token.to_string()),
            None => Verdict::Accept,
        }
    }

    /// First deny token contained in the lower-cased base name, if any
    pub fn denied_token(&self, path: &Path) -> Option<&str> {
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        self.deny_tokens
            .iter()
            .find(|t| base.contains(t.as_str()))
            .map(String::as_str)
    }
}

/// True when the path carries one of the executable extensions
pub fn has_executable_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            EXECUTABLE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_large_game_accepted() {
        let policy = LauncherPolicy::default();
        assert_eq!(
            policy.classify(Path::new("game.exe"), 5 * MB),
            Verdict::Accept
        );
    }

    #[test]
    fn test_uninstaller_rejected() {
        let policy = LauncherPolicy::default();
        assert_eq!(
            policy.classify(Path::new("unins000.exe"), 5 * MB),
            Verdict::Denied("unins".to_string())
        );
    }

    #[test]
    fn test_small_file_rejected() {
        let policy = LauncherPolicy::default();
        assert_eq!(
            policy.classify(Path::new("app.exe"), 10 * 1024),
            Verdict::TooSmall(10 * 1024)
        );
    }

    #[test]
    fn test_deny_match_is_case_insensitive() {
        let policy = LauncherPolicy::default();
        assert!(!policy
            .classify(Path::new(r"C:\Apps\MyApp\MyAppUpdater.EXE"), 5 * MB)
            .is_accept());
        assert!(!policy.classify(Path::new("CrashPad_Handler.exe"), 5 * MB).is_accept());
    }

    #[test]
    fn test_every_table_token_rejects() {
        let policy = LauncherPolicy::default();
        for token in DENY_TOKENS {
            let name = format!("x{}x.exe", token);
            assert!(
                !policy.classify(Path::new(&name), 5 * MB).is_accept(),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_size_floor_is_inclusive() {
        let policy = LauncherPolicy::default();
        assert!(policy.classify(Path::new("edge.exe"), MIN_LAUNCHER_SIZE).is_accept());
        assert!(!policy.classify(Path::new("edge.exe"), MIN_LAUNCHER_SIZE - 1).is_accept());
    }

    #[test]
    fn test_extra_tokens_extend_table() {
        let policy = LauncherPolicy::default().with_extra_tokens([" Launcher ", ""]);
        assert_eq!(policy.deny_tokens().len(), DENY_TOKENS.len() + 1);
        assert_eq!(
            policy.classify(Path::new("GameLauncher.exe"), 5 * MB),
            Verdict::Denied("launcher".to_string())
        );
    }

    #[test]
    fn test_executable_extension() {
        assert!(has_executable_extension(Path::new("a/b/Foo.EXE")));
        assert!(!has_executable_extension(Path::new("a/b/foo.dll")));
        assert!(!has_executable_extension(Path::new("a/b/exe")));
    }
}
