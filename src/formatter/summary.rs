use serde::Serialize;

use crate::types::ListingMode;

/// Inputs of the one-line listing summary printed above the issue rows
#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub qualifier: String,
    pub repo_full_name: String,
    pub page: u32,
    pub mode: ListingMode,
    pub current_page_count: usize,
}

impl ListSummary {
    pub fn describe(&self) -> String {
        describe(
            &self.qualifier,
            &self.repo_full_name,
            self.page,
            self.mode,
            self.current_page_count,
        )
    }
}

impl std::fmt::Display for ListSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Describe a listing in one line, e.g.
/// `Showing 5 open issues in group/project that match your search (page 2)`.
///
/// An empty qualifier (all states) is left out entirely.
pub fn describe(
    qualifier: &str,
    repo_full_name: &str,
    page: u32,
    mode: ListingMode,
    current_page_count: usize,
) -> String {
    let (noun, verb) = if current_page_count == 1 {
        ("issue", "matches")
    } else {
        ("issues", "match")
    };

    let subject = match qualifier.trim() {
        "" => noun.to_string(),
        qualifier => format!("{} {}", qualifier, noun),
    };

    let search_note = match mode {
        ListingMode::Default => String::new(),
        ListingMode::Filtered => format!(" that {} your search", verb),
    };

    format!(
        "Showing {} {} in {}{} (page {})",
        current_page_count, subject, repo_full_name, search_note, page
    )
}
