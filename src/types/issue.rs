//! Issue domain types
//!
//! Issues as returned by the project issue list endpoint, converted from
//! the REST representation in [`crate::gitlab::rest_types`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::Username;

/// Wrapper type for project-scoped issue numbers (GitLab `iid`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IssueIid(pub u64);

impl IssueIid {
    pub fn new(iid: u64) -> Self {
        Self(iid)
    }
}

impl std::fmt::Display for IssueIid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a single issue as reported by GitLab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueState {
    /// Issue is open and active
    Opened,
    /// Issue is closed
    Closed,
}

/// GitLab issue with the metadata shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub iid: IssueIid,
    pub title: String,
    pub state: IssueState,
    pub author: Option<Username>,
    pub assignees: Vec<Username>,
    pub labels: Vec<String>,
    pub milestone: Option<String>,
    pub confidential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub web_url: String,
    pub comments_count: u32,
}
