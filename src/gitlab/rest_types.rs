//! Response bodies of the GitLab REST v4 endpoints used by the client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Issue, IssueIid, IssueState, Username};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserNode {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneNode {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueNode {
    pub iid: u64,
    pub title: String,
    pub state: String,
    pub author: Option<UserNode>,
    #[serde(default)]
    pub assignees: Vec<UserNode>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub milestone: Option<MilestoneNode>,
    #[serde(default)]
    pub confidential: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub web_url: String,
    #[serde(default)]
    pub user_notes_count: u32,
}

impl TryFrom<IssueNode> for Issue {
    type Error = anyhow::Error;

    fn try_from(issue_node: IssueNode) -> Result<Self, Self::Error> {
        let state = issue_node
            .state
            .parse::<IssueState>()
            .map_err(|_| anyhow::anyhow!("Unknown issue state: {}", issue_node.state))?;

        let assignees = issue_node
            .assignees
            .into_iter()
            .map(|assignee| Username::from(assignee.username))
            .collect();

        Ok(Issue {
            iid: IssueIid::new(issue_node.iid),
            title: issue_node.title,
            state,
            author: issue_node.author.map(|author| Username::from(author.username)),
            assignees,
            labels: issue_node.labels,
            milestone: issue_node.milestone.map(|milestone| milestone.title),
            confidential: issue_node.confidential,
            created_at: issue_node.created_at,
            updated_at: issue_node.updated_at,
            closed_at: issue_node.closed_at,
            web_url: issue_node.web_url,
            comments_count: issue_node.user_notes_count,
        })
    }
}
