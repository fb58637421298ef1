//! Console selection of candidates
//!
//! Input is a comma-separated list of picks: `3`, `2-5`, `all`, or `3=New name`
//! to pick and rename. An empty line or end of input cancels.

use relink_core::{CandidateApp, Selection, Selector};
use std::collections::BTreeMap;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Zero-based candidate index and an optional new name
type Pick = (usize, Option<String>);

pub struct ConsolePicker<R, W> {
    input: R,
    output: W,
}

impl ConsolePicker<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn list(&mut self, candidates: &[CandidateApp]) -> io::Result<()> {
        writeln!(self.output, "Programs without a launcher:")?;
        for (i, app) in candidates.iter().enumerate() {
            writeln!(
                self.output,
                "{:>4}  {:<40} [{}] {}",
                i + 1,
                app.name,
                app.source,
                app.target_path.display()
            )?;
        }
        Ok(())
    }

    fn prompt(&mut self, candidates: &[CandidateApp]) -> io::Result<Option<Vec<Pick>>> {
        loop {
            write!(
                self.output,
                "Create which? (e.g. 1,3-5 or all; N=Name renames; empty cancels): "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.is_empty() || line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match parse_picks(line, candidates.len()) {
                Ok(picks) => return Ok(Some(picks)),
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Selector for ConsolePicker<R, W> {
    fn select(&mut self, candidates: Vec<CandidateApp>) -> Selection {
        let picks = self
            .list(&candidates)
            .and_then(|_| self.prompt(&candidates));

        let picks = match picks {
            Ok(Some(picks)) => picks,
            Ok(None) => return Selection::Cancelled,
            Err(e) => {
                log::error!("Console selection failed: {}", e);
                return Selection::Cancelled;
            }
        };

        let mut candidates: Vec<Option<CandidateApp>> = candidates.into_iter().map(Some).collect();
        let chosen = picks
            .into_iter()
            .filter_map(|(index, rename)| {
                let mut app = candidates.get_mut(index)?.take()?;
                if let Some(name) = rename {
                    app.name = name;
                }
                Some(app)
            })
            .collect();
        Selection::Chosen(chosen)
    }
}

/// Parse picks into zero-based indices in ascending order, with optional new names
pub fn parse_picks(line: &str, count: usize) -> Result<Vec<Pick>, String> {
    let mut picks: BTreeMap<usize, Option<String>> = BTreeMap::new();

    for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if token.eq_ignore_ascii_case("all") {
            for index in 0..count {
                picks.entry(index).or_insert(None);
            }
            continue;
        }

        if let Some((number, name)) = token.split_once('=') {
            let index = parse_index(number, count)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("Empty name in '{}'", token));
            }
            picks.insert(index, Some(name.to_string()));
            continue;
        }

        if let Some((start, end)) = token.split_once('-') {
            let start = parse_index(start, count)?;
            let end = parse_index(end, count)?;
            if start > end {
                return Err(format!("Range '{}' is reversed", token));
            }
            for index in start..=end {
                picks.entry(index).or_insert(None);
            }
            continue;
        }

        let index = parse_index(token, count)?;
        picks.entry(index).or_insert(None);
    }

    Ok(picks.into_iter().collect())
}

fn parse_index(text: &str, count: usize) -> Result<usize, String> {
    let text = text.trim();
    match text.parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Ok(n - 1),
        Ok(n) => Err(format!("{} is out of range 1-{}", n, count)),
        Err(_) => Err(format!("'{}' is not a number", text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relink_core::Source;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn candidates() -> Vec<CandidateApp> {
        ["alpha", "beta", "gamma", "delta"]
            .iter()
            .map(|name| {
                CandidateApp::new(
                    *name,
                    PathBuf::from(format!("/apps/{}.exe", name)),
                    Source::Scan,
                )
            })
            .collect()
    }

    #[test]
    fn test_parse_numbers_and_ranges() {
        assert_eq!(
            parse_picks("3, 1-2", 4).unwrap(),
            vec![(0, None), (1, None), (2, None)]
        );
        assert_eq!(parse_picks("all", 2).unwrap(), vec![(0, None), (1, None)]);
    }

    #[test]
    fn test_parse_rename() {
        assert_eq!(
            parse_picks("all, 2=Beta Pro", 3).unwrap(),
            vec![(0, None), (1, Some("Beta Pro".to_string())), (2, None)]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_picks("0", 3).is_err());
        assert!(parse_picks("4", 3).is_err());
        assert!(parse_picks("x", 3).is_err());
        assert!(parse_picks("3-1", 3).is_err());
        assert!(parse_picks("2=", 3).is_err());
    }

    #[test]
    fn test_picker_selects_and_renames() {
        let mut output = Vec::new();
        let mut picker = ConsolePicker::new(Cursor::new("nope\n2,4=Delta Suite\n"), &mut output);

        let chosen = picker.select(candidates()).into_chosen();
        let names: Vec<_> = chosen.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "Delta Suite"]);
        assert_eq!(chosen[1].target_path, PathBuf::from("/apps/delta.exe"));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("'nope' is not a number"));
    }

    #[test]
    fn test_empty_line_and_eof_cancel() {
        let mut picker = ConsolePicker::new(Cursor::new("\n"), Vec::new());
        assert_eq!(picker.select(candidates()), Selection::Cancelled);

        let mut picker = ConsolePicker::new(Cursor::new(""), Vec::new());
        assert_eq!(picker.select(candidates()), Selection::Cancelled);
    }
}
