//! Seam for the interactive selection step

use crate::candidate::CandidateApp;

/// What the user picked. A cancel and an empty pick both mean no writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(Vec<CandidateApp>),
    Cancelled,
}

impl Selection {
    pub fn into_chosen(self) -> Vec<CandidateApp> {
        match self {
            Selection::Chosen(apps) => apps,
            Selection::Cancelled => vec![],
        }
    }
}

/// Presents candidates and returns a (possibly renamed) subset. May block on user input.
pub trait Selector {
    fn select(&mut self, candidates: Vec<CandidateApp>) -> Selection;
}

/// Accept everything unchanged
pub struct SelectAll;

impl Selector for SelectAll {
    fn select(&mut self, candidates: Vec<CandidateApp>) -> Selection {
        Selection::Chosen(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Source;
    use std::path::PathBuf;

    #[test]
    fn test_select_all_keeps_everything() {
        let apps = vec![
            CandidateApp::new("A", PathBuf::from("/a.exe"), Source::Scan),
            CandidateApp::new("B", PathBuf::from("/b.exe"), Source::AppPaths),
        ];
        let picked = SelectAll.select(apps.clone()).into_chosen();
        assert_eq!(picked, apps);
    }

    #[test]
    fn test_cancel_and_empty_both_yield_nothing() {
        assert!(Selection::Cancelled.into_chosen().is_empty());
        assert!(Selection::Chosen(vec![]).into_chosen().is_empty());
    }
}
