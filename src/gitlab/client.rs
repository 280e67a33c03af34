use crate::gitlab::error::ApiRetryableError;
use crate::gitlab::rest_types::{IssueNode, UserNode};
use crate::services::{CurrentUserLookup, IssueLister};
use crate::types::{Issue, Query, RepositoryId, Username};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tokio::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

/// Default maximum number of retry attempts for API operations
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 3;

/// Host used when neither configuration nor flags name one
pub const DEFAULT_GITLAB_HOST: &str = "https://gitlab.com";

const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

#[derive(Clone)]
pub struct GitLabClient {
    pub(crate) client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    max_retry_count: u32,
}

impl GitLabClient {
    pub fn new(host: &str, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url =
            Url::parse(host).with_context(|| format!("Invalid GitLab host URL: {}", host))?;

        let timeout_duration = timeout.unwrap_or_else(|| Duration::from_secs(30));
        let connection_timeout = if timeout_duration < Duration::from_secs(10) {
            std::cmp::max(timeout_duration, Duration::from_secs(1))
        } else {
            Duration::from_secs(10)
        };

        let client = reqwest::Client::builder()
            .connect_timeout(connection_timeout)
            .timeout(std::cmp::max(timeout_duration, Duration::from_secs(1)))
            .user_agent(concat!("gitlab-issue-list/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build GitLab client")?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
            max_retry_count: DEFAULT_MAX_RETRY_COUNT,
        })
    }

    /// Overrides how many times transient failures are retried
    pub fn with_max_retry_count(mut self, max_retry_count: u32) -> Self {
        self.max_retry_count = max_retry_count;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/v4/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Lists one page of project issues matching the query
    ///
    /// Calls `GET /projects/:id/issues` with the query's state, filters and
    /// pagination. Issues come back in the order the API returns them.
    pub async fn fetch_project_issues(
        &self,
        repository_id: &RepositoryId,
        query: &Query,
    ) -> Result<Vec<Issue>> {
        let url = self.endpoint(&format!("projects/{}/issues", repository_id.api_path()));
        let nodes: Vec<IssueNode> = self
            .get_json("project_issues", &url, &query.to_query_pairs())
            .await
            .with_context(|| format!("Failed to list issues of {}", repository_id))?;

        let mut issues = Vec::with_capacity(nodes.len());
        for node in nodes {
            let iid = node.iid;
            match Issue::try_from(node) {
                Ok(issue) => issues.push(issue),
                Err(e) => {
                    warn!("Failed to convert issue #{}: {}", iid, e);
                    return Err(e);
                }
            }
        }

        Ok(issues)
    }

    /// Fetches the username of the account the token belongs to
    pub async fn fetch_current_user(&self) -> Result<Username> {
        let url = self.endpoint("user");
        let user: UserNode = self
            .get_json("current_user", &url, &[])
            .await
            .context("Failed to look up the current user")?;

        Ok(Username::from(user.username))
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        operation_name: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<R> {
        retry_with_backoff(operation_name, Some(self.max_retry_count), || async {
            debug!("Starting GET {} with query {:?}", url, query);

            let start_time = std::time::Instant::now();

            let mut request = self.client.get(url).query(query);
            if let Some(token) = &self.token {
                request = request.header(PRIVATE_TOKEN_HEADER, token);
            }

            let response = request
                .send()
                .await
                .map_err(ApiRetryableError::from_reqwest_error)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiRetryableError::from_status(status, &body));
            }

            let body = response
                .json::<R>()
                .await
                .map_err(ApiRetryableError::from_reqwest_error)?;

            debug!("GET {} completed in {:?}", url, start_time.elapsed());

            Ok(body)
        })
        .await
    }
}

impl CurrentUserLookup for GitLabClient {
    async fn current_username(&self) -> Result<Username> {
        self.fetch_current_user().await
    }
}

impl IssueLister for GitLabClient {
    async fn list_issues(&self, repository_id: &RepositoryId, query: &Query) -> Result<Vec<Issue>> {
        self.fetch_project_issues(repository_id, query).await
    }
}

pub(crate) async fn retry_with_backoff<F, Fut, T>(
    operation_name: &str,
    max_retry_count: Option<u32>,
    execute_operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, ApiRetryableError>>,
{
    let mut attempt = 0;
    let max_retries = max_retry_count.unwrap_or(DEFAULT_MAX_RETRY_COUNT);

    loop {
        match execute_operation().await {
            Ok(result) => {
                tracing::debug!(
                    "Operation {} succeeded on attempt {}",
                    operation_name,
                    attempt + 1
                );
                return Ok(result);
            }
            Err(e) => {
                tracing::debug!(
                    "Operation {} failed on attempt {}: {}",
                    operation_name,
                    attempt + 1,
                    e,
                );

                let base_delay_ms: u64 = match e {
                    ApiRetryableError::NonRetryable(_) => {
                        return Err(anyhow::anyhow!(e));
                    }
                    ApiRetryableError::RateLimit => 1000,
                    ApiRetryableError::Retryable(_) => 500,
                };

                if attempt >= max_retries {
                    tracing::debug!(
                        "Retries exhausted for {} after {} attempts",
                        operation_name,
                        attempt + 1
                    );
                    return Err(anyhow::anyhow!(e));
                }

                attempt += 1;
                let backoff_delay = Duration::from_millis(
                    base_delay_ms.saturating_mul(2_u64.saturating_pow(attempt - 1)),
                );

                tracing::debug!(
                    "Backing off {} for {:?} before attempt {}/{}",
                    operation_name,
                    backoff_delay,
                    attempt + 1,
                    max_retries + 1
                );

                sleep(backoff_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_invalid_host_is_rejected() {
        assert!(GitLabClient::new("not a url", None, None).is_err());
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let client = GitLabClient::new("https://gitlab.example.com/", None, None).unwrap();
        assert_eq!(
            client.endpoint("user"),
            "https://gitlab.example.com/api/v4/user"
        );
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("flaky", Some(1), || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiRetryableError::Retryable("boom".to_string()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_stops_on_non_retryable() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry_with_backoff("fatal", Some(5), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiRetryableError::NonRetryable("nope".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
