use anyhow::Result;
use tracing::debug;

use crate::formatter::ListSummary;
use crate::services::resolver::{CurrentUserLookup, resolve};
use crate::types::{Issue, ListingMode, Query, RawOptions, RepositoryId};

/// Fetches one page of issues for a resolved query
pub trait IssueLister {
    #[allow(async_fn_in_trait)]
    async fn list_issues(&self, repository_id: &RepositoryId, query: &Query) -> Result<Vec<Issue>>;
}

/// Everything produced by one issue listing
#[derive(Debug, Clone)]
pub struct IssueListOutcome {
    pub query: Query,
    pub mode: ListingMode,
    pub issues: Vec<Issue>,
    pub summary: ListSummary,
}

/// Service running the issue listing workflow: resolve, fetch, summarize.
pub struct IssueListService<C> {
    gitlab_client: C,
}

impl<C: CurrentUserLookup + IssueLister> IssueListService<C> {
    pub fn new(gitlab_client: C) -> Self {
        Self { gitlab_client }
    }

    /// List issues of `repository_id` matching the raw options
    ///
    /// Fetch failures are returned as-is; only the `--mine` lookup is
    /// lenient (see [`resolve`]).
    pub async fn list(
        &self,
        repository_id: &RepositoryId,
        raw: &RawOptions,
    ) -> Result<IssueListOutcome> {
        let resolution = resolve(raw, &self.gitlab_client).await?;

        debug!(
            "Listing {} issues of {} ({} mode, page {}, {} per page)",
            resolution.query.state,
            repository_id,
            resolution.mode,
            resolution.query.page,
            resolution.query.per_page
        );

        let issues = self
            .gitlab_client
            .list_issues(repository_id, &resolution.query)
            .await?;

        let summary = ListSummary {
            qualifier: resolution.qualifier.to_string(),
            repo_full_name: repository_id.full_name(),
            page: resolution.query.page,
            mode: resolution.mode,
            current_page_count: issues.len(),
        };

        Ok(IssueListOutcome {
            query: resolution.query,
            mode: resolution.mode,
            issues,
            summary,
        })
    }
}
