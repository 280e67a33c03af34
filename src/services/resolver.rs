//! Filter resolution for issue listings
//!
//! Turns the raw option values collected by the CLI into a normalized
//! [`Query`] and classifies it as a default or filtered listing.

use anyhow::Result;
use tracing::debug;

use crate::types::{
    DEFAULT_PAGE, DEFAULT_PER_PAGE, IssueStateFilter, ListingMode, Query, RawOptions, Username,
};

/// Resolves "my username" for `--mine`. May perform network I/O.
pub trait CurrentUserLookup {
    #[allow(async_fn_in_trait)]
    async fn current_username(&self) -> Result<Username>;
}

/// Outcome of resolving a set of raw options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub query: Query,
    pub mode: ListingMode,
    /// "open", "closed" or "" for all issues
    pub qualifier: &'static str,
}

/// Resolve raw list options into a query and listing mode.
///
/// The steps run in a fixed order and later steps may override earlier
/// ones: `--mine` replaces any `--assignee` value. Assignee alone keeps the
/// default mode; every other filter and any explicit page or page size
/// marks the listing as filtered.
///
/// The lookup is only called when `mine` is set. Its failure does not fail
/// the resolution.
pub async fn resolve<L: CurrentUserLookup>(raw: &RawOptions, lookup: &L) -> Result<Resolution> {
    let state = IssueStateFilter::from_flags(raw.all, raw.closed);
    let mut mode = ListingMode::Default;

    let mut query = Query {
        state,
        page: DEFAULT_PAGE,
        per_page: DEFAULT_PER_PAGE,
        ..Query::default()
    };

    if let Some(page) = raw.page.explicit() {
        query.page = page;
        mode = ListingMode::Filtered;
    }
    if let Some(per_page) = raw.per_page.explicit() {
        query.per_page = per_page;
        mode = ListingMode::Filtered;
    }

    if let Some(assignee) = non_empty(&raw.assignee) {
        query.assignee_username = Some(Username::from(assignee));
    }
    if let Some(label) = non_empty(&raw.label) {
        query.labels = vec![label.to_string()];
        mode = ListingMode::Filtered;
    }
    if let Some(milestone) = non_empty(&raw.milestone) {
        query.milestone = Some(milestone.to_string());
        mode = ListingMode::Filtered;
    }
    if raw.confidential == Some(true) {
        query.confidential = Some(true);
        mode = ListingMode::Filtered;
    }

    if raw.mine {
        // A failed lookup degrades to the assignee filter (if any) instead of
        // aborting the listing. Intentional; the error is only logged.
        match lookup.current_username().await {
            Ok(username) => query.assignee_username = Some(username),
            Err(e) => debug!("Ignoring current user lookup failure: {:#}", e),
        }
        mode = ListingMode::Filtered;
    }

    Ok(Resolution {
        query,
        mode,
        qualifier: state.qualifier(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
