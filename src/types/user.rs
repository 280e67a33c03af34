//! User identification types
//!
//! GitLab identifies users by their username; this is what the issue list
//! API accepts as `assignee_username` and what `/user` reports back.

use serde::{Deserialize, Serialize};

/// Username wrapper type for GitLab accounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Creates a new Username from the raw account name
    pub fn new(username: String) -> Self {
        Self(username)
    }

    /// Get the username as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Username::new(s.to_string())
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Username::new(s)
    }
}
