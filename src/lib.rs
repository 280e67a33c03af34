/// User configuration file and environment overrides
pub mod config;

/// Plain-text rendering of issue rows and listing summaries
pub mod formatter;

/// GitLab REST client used to list issues and look up the current user
pub mod gitlab;

/// Output paging
pub mod pager;

/// Filter resolution and the issue listing workflow
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
