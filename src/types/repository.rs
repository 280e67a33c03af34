//! Repository domain types and remote parsing
//!
//! GitLab projects live under a namespace that may itself be nested
//! (`group/subgroup/project`). All parsing of remotes and repository
//! arguments into a [`RepositoryId`] lives in this module.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Repository argument or git remote wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryUrl(pub String);

static HTTPS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^/]+/(.+)/([^/]+?)(?:\.git)?$").expect("Failed to compile HTTPS regex")
});

static SSH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:ssh://)?[^@/\s]+@[^:/\s]+(?::\d+)?[:/](.+)/([^/]+?)(?:\.git)?$")
        .expect("Failed to compile SSH regex")
});

static SIMPLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^/:@\s]+(?:/[^/:@\s]+)*)/([^/:@\s]+)$")
        .expect("Failed to compile simple regex")
});

/// Namespace (group path or user name) wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Namespace(pub String);

impl Namespace {
    pub fn new(namespace: String) -> Self {
        Self(namespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ProjectName(pub String);

impl ProjectName {
    pub fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RepositoryUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RepositoryUrl {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed identifier for a GitLab project
///
/// The identity is the project's full path; the host is configured
/// separately on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RepositoryId {
    pub namespace: Namespace,
    pub project_name: ProjectName,
}

impl RepositoryId {
    /// Parse a repository identifier from the supported input formats
    /// - "https://gitlab.com/group/sub/project(.git)" - HTTPS remote
    /// - "git@gitlab.com:group/project.git" - SSH remote
    /// - "group/project" - full path
    pub fn parse_url(input: &RepositoryUrl) -> Result<Self, String> {
        let input_str = input.as_str().trim().trim_end_matches('/');

        for regex in [&*HTTPS_REGEX, &*SSH_REGEX, &*SIMPLE_REGEX] {
            if let Some(captures) = regex.captures(input_str) {
                if let (Some(namespace), Some(project)) = (captures.get(1), captures.get(2)) {
                    return Ok(Self::new(namespace.as_str(), project.as_str()));
                }
            }
        }

        Err(format!("Invalid repository format: {}", input_str))
    }

    pub fn new<T1: Into<String>, T2: Into<String>>(namespace: T1, name: T2) -> Self {
        Self {
            namespace: Namespace::new(namespace.into()),
            project_name: ProjectName::new(name.into()),
        }
    }

    /// Returns the full path (namespace/project) used for display
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.project_name)
    }

    /// Returns the URL-encoded full path accepted as `:id` by the REST API
    pub fn api_path(&self) -> String {
        urlencoding::encode(&self.full_name()).into_owned()
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
