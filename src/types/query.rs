//! Issue list query types
//!
//! [`RawOptions`] is what the flag layer hands over; [`Query`] is the
//! normalized request sent to the issue list endpoint. The resolver in
//! [`crate::services::resolver`] turns one into the other.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Username;

/// Page number used when none is requested
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none is requested
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Optional pagination value as supplied by the user.
///
/// Zero means "not supplied", the same as `None`. Only [`PageOption::explicit`]
/// looks at that convention, so changing it later touches one place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOption(pub Option<u32>);

impl PageOption {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn new(value: u32) -> Self {
        Self(Some(value))
    }

    /// The requested value, or `None` when absent or zero
    pub fn explicit(self) -> Option<u32> {
        self.0.filter(|value| *value != 0)
    }
}

impl From<Option<u32>> for PageOption {
    fn from(value: Option<u32>) -> Self {
        Self(value)
    }
}

/// User-supplied list options, before any defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub all: bool,
    pub closed: bool,
    pub opened: bool,
    pub assignee: Option<String>,
    pub label: Option<String>,
    pub milestone: Option<String>,
    pub confidential: Option<bool>,
    pub page: PageOption,
    pub per_page: PageOption,
    pub mine: bool,
}

/// State filter sent as the `state` query parameter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueStateFilter {
    #[default]
    Opened,
    Closed,
    All,
}

impl IssueStateFilter {
    /// Collapse the state flags into one selection.
    ///
    /// `all` wins over `closed`, which wins over the default of open issues.
    /// Conflicting flags are not an error.
    pub fn from_flags(all: bool, closed: bool) -> Self {
        if all {
            Self::All
        } else if closed {
            Self::Closed
        } else {
            Self::Opened
        }
    }

    /// Word placed before "issues" in the listing summary
    pub fn qualifier(&self) -> &'static str {
        match self {
            Self::Opened => "open",
            Self::Closed => "closed",
            Self::All => "",
        }
    }
}

/// How a resolved query relates to the default listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ListingMode {
    #[default]
    Default,
    Filtered,
}

/// Normalized issue list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub state: IssueStateFilter,
    pub assignee_username: Option<Username>,
    pub labels: Vec<String>,
    pub milestone: Option<String>,
    pub confidential: Option<bool>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            state: IssueStateFilter::default(),
            assignee_username: None,
            labels: Vec::new(),
            milestone: None,
            confidential: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Query {
    /// Query string parameters for `GET /projects/:id/issues`
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("state", self.state.to_string())];

        if let Some(assignee) = &self.assignee_username {
            pairs.push(("assignee_username", assignee.to_string()));
        }
        if !self.labels.is_empty() {
            pairs.push(("labels", self.labels.join(",")));
        }
        if let Some(milestone) = &self.milestone {
            pairs.push(("milestone", milestone.clone()));
        }
        if let Some(confidential) = self.confidential {
            pairs.push(("confidential", confidential.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("per_page", self.per_page.to_string()));

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_option_zero_is_absent() {
        assert_eq!(PageOption::unset().explicit(), None);
        assert_eq!(PageOption::new(0).explicit(), None);
        assert_eq!(PageOption::new(1).explicit(), Some(1));
        assert_eq!(PageOption::from(Some(7)).explicit(), Some(7));
    }

    #[test]
    fn test_state_filter_precedence() {
        assert_eq!(IssueStateFilter::from_flags(true, true), IssueStateFilter::All);
        assert_eq!(IssueStateFilter::from_flags(true, false), IssueStateFilter::All);
        assert_eq!(IssueStateFilter::from_flags(false, true), IssueStateFilter::Closed);
        assert_eq!(IssueStateFilter::from_flags(false, false), IssueStateFilter::Opened);
    }

    #[test]
    fn test_state_filter_wire_names() {
        assert_eq!(IssueStateFilter::Opened.to_string(), "opened");
        assert_eq!(IssueStateFilter::Closed.to_string(), "closed");
        assert_eq!(IssueStateFilter::All.to_string(), "all");
    }

    #[test]
    fn test_default_query_pairs() {
        let pairs = Query::default().to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("state", "opened".to_string()),
                ("page", "1".to_string()),
                ("per_page", "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_filtered_query_pairs() {
        let query = Query {
            state: IssueStateFilter::Closed,
            assignee_username: Some(Username::from("alice")),
            labels: vec!["bug".to_string()],
            milestone: Some("v1.0".to_string()),
            confidential: Some(true),
            page: 3,
            per_page: 50,
        };

        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("state", "closed".to_string())));
        assert!(pairs.contains(&("assignee_username", "alice".to_string())));
        assert!(pairs.contains(&("labels", "bug".to_string())));
        assert!(pairs.contains(&("milestone", "v1.0".to_string())));
        assert!(pairs.contains(&("confidential", "true".to_string())));
        assert!(pairs.contains(&("page", "3".to_string())));
        assert!(pairs.contains(&("per_page", "50".to_string())));
    }
}
