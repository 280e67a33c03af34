//! Integration tests for the GitLab REST client
//!
//! These tests verify request shapes and error handling of the client
//! against a mock GitLab server.

use mockito::Matcher;
use tokio::time::Duration;

use gitlab_issue_list::gitlab::GitLabClient;
use gitlab_issue_list::types::{IssueState, Query, RepositoryId, Username};
use test_util::{create_test_gitlab_client, issue_json};

/// Nested namespaces are sent as a single URL-encoded project path
#[tokio::test]
async fn test_nested_project_path_is_encoded() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/projects/group%2Fsub%2Fproject/issues")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([issue_json(3, "Nested", &["ui", "bug"])]).to_string())
        .create_async()
        .await;

    let client = create_test_gitlab_client(&server.url());
    let issues = client
        .fetch_project_issues(
            &RepositoryId::new("group/sub", "project"),
            &Query::default(),
        )
        .await
        .expect("fetch should succeed");

    mock.assert_async().await;

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].state, IssueState::Opened);
    assert_eq!(issues[0].labels, vec!["ui", "bug"]);
}

#[tokio::test]
async fn test_fetch_current_user() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/user")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "username": "alice"}"#)
        .create_async()
        .await;

    let client = create_test_gitlab_client(&server.url());
    let username = client
        .fetch_current_user()
        .await
        .expect("lookup should succeed");

    mock.assert_async().await;
    assert_eq!(username, Username::from("alice"));
}

/// Requests without a token carry no PRIVATE-TOKEN header
#[tokio::test]
async fn test_anonymous_client_sends_no_token() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/user")
        .match_header("private-token", Matcher::Missing)
        .with_status(401)
        .with_body(r#"{"message": "401 Unauthorized"}"#)
        .create_async()
        .await;

    let client = GitLabClient::new(&server.url(), None, Some(Duration::from_secs(5)))
        .unwrap()
        .with_max_retry_count(0);

    assert!(client.fetch_current_user().await.is_err());
    mock.assert_async().await;
}

/// Server errors are retried before giving up
#[tokio::test]
async fn test_server_error_is_retried() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/user")
        .with_status(502)
        .expect(2)
        .create_async()
        .await;

    let client = create_test_gitlab_client(&server.url()).with_max_retry_count(1);

    assert!(client.fetch_current_user().await.is_err());
    mock.assert_async().await;
}

/// A body that is not an issue list fails without retrying
#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/projects/group%2Fproject/issues")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_gitlab_client(&server.url()).with_max_retry_count(3);
    let result = client
        .fetch_project_issues(&RepositoryId::new("group", "project"), &Query::default())
        .await;

    assert!(result.is_err());
    mock.assert_async().await;
}
