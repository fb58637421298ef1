//! Merge of all discovery sources into one de-duplicated list

use crate::candidate::CandidateApp;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

/// One record per target path, best-ranked source wins, sorted by name then path.
///
/// Among records of equal rank the first one seen survives.
pub fn aggregate<I>(records: I) -> Vec<CandidateApp>
where
    I: IntoIterator<Item = CandidateApp>,
{
    let mut survivors: Vec<CandidateApp> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = path_key(&record.target_path);
        match by_path.get(&key) {
            Some(&index) => {
                if record.source.rank() < survivors[index].source.rank() {
                    survivors[index] = record;
                }
            }
            None => {
                by_path.insert(key, survivors.len());
                survivors.push(record);
            }
        }
    }

    survivors.sort_by(compare);
    survivors
}

fn compare(a: &CandidateApp, b: &CandidateApp) -> Ordering {
    a.name.cmp(&b.name).then_with(|| {
        a.target_path
            .to_string_lossy()
            .cmp(&b.target_path.to_string_lossy())
    })
}

/// Identity of a target path. Windows paths compare case-insensitively.
pub fn path_key(path: &Path) -> String {
    let text = path.to_string_lossy();
    if cfg!(target_os = "windows") {
        text.to_lowercase()
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Source;
    use std::path::PathBuf;

    fn app(name: &str, path: &str, source: Source) -> CandidateApp {
        CandidateApp::new(name, PathBuf::from(path), source)
    }

    #[test]
    fn test_best_rank_survives() {
        let merged = aggregate(vec![
            app("foo", "/apps/foo.exe", Source::Scan),
            app("Foo Suite", "/apps/foo.exe", Source::Uninstall),
            app("foo", "/apps/foo.exe", Source::AppPaths),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::AppPaths);
    }

    #[test]
    fn test_first_seen_wins_within_rank() {
        let merged = aggregate(vec![
            app("First", "/apps/foo.exe", Source::Uninstall),
            app("Second", "/apps/foo.exe", Source::Uninstall),
            app("foo", "/apps/foo.exe", Source::Scan),
        ]);
        assert_eq!(
            merged,
            vec![app("First", "/apps/foo.exe", Source::Uninstall)]
        );
    }

    #[test]
    fn test_sorted_by_name_then_path() {
        let merged = aggregate(vec![
            app("b", "/x/b.exe", Source::Scan),
            app("a", "/z/a.exe", Source::Scan),
            app("a", "/y/a.exe", Source::Uninstall),
            app("B", "/x/B2.exe", Source::AppPaths),
        ]);
        let order: Vec<_> = merged
            .iter()
            .map(|c| c.target_path.to_string_lossy().to_string())
            .collect();
        assert_eq!(order, vec!["/x/B2.exe", "/y/a.exe", "/z/a.exe", "/x/b.exe"]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let input = vec![
            app("zeta", "/z.exe", Source::Scan),
            app("alpha", "/a.exe", Source::Uninstall),
            app("alpha", "/a.exe", Source::Scan),
            app("mid", "/m.exe", Source::AppPaths),
            app("alpha", "/a2.exe", Source::Scan),
        ];

        let once = aggregate(input.clone());
        assert_eq!(aggregate(input), once);
        assert_eq!(aggregate(once.clone()), once);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
