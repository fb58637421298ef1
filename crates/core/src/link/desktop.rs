//! freedesktop.org `.desktop` launchers

use super::{LinkSpec, LinkWriter};
use std::fs;
use std::io;
use std::path::Path;

pub struct DesktopEntryWriter {
    /// Program that runs the target, e.g. `wine` for Windows binaries
    runner: Option<String>,
}

impl DesktopEntryWriter {
    pub fn new() -> Self {
        Self { runner: None }
    }

    pub fn with_runner(runner: impl Into<String>) -> Self {
        Self {
            runner: Some(runner.into()),
        }
    }

    fn render(&self, spec: &LinkSpec<'_>) -> String {
        let mut exec = String::new();
        if let Some(runner) = &self.runner {
            exec.push_str(&quote_arg(runner));
            exec.push(' ');
        }
        exec.push_str(&quote_arg(&spec.target.to_string_lossy()));

        format!(
            "[Desktop Entry]\nType=Application\nName={}\nExec={}\nPath={}\nIcon={}\nTerminal=false\n",
            escape_value(spec.name),
            escape_value(&exec),
            escape_value(&spec.working_dir.to_string_lossy()),
            escape_value(&spec.icon.to_string_lossy()),
        )
    }
}

impl Default for DesktopEntryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkWriter for DesktopEntryWriter {
    fn extension(&self) -> &str {
        "desktop"
    }

    fn write_link(&self, spec: &LinkSpec<'_>, path: &Path) -> io::Result<()> {
        fs::write(path, self.render(spec))
    }
}

/// Quote one `Exec` argument. A literal `%` is doubled so it is not read as a field code.
fn quote_arg(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for c in arg.chars() {
        match c {
            '"' | '`' | '$' | '\\' => out.push('\\'),
            '%' => out.push('%'),
            _ => {}
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Escape a value of string type
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
