use async_trait::async_trait;

use super::{GithubClient, IssueRepository};

/// The subset of an issue returned by the update endpoint that the run
/// reports on.
#[derive(Debug, serde::Deserialize)]
pub struct Issue {
    pub number: u64,
    /// The common URL for viewing this issue.
    ///
    /// Example: `https://github.com/octocat/Hello-World/issues/1347`
    pub html_url: String,
    pub state: IssueState,
    #[serde(default)]
    pub state_reason: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(PartialEq, Eq, Debug, Clone, serde::Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, serde::Deserialize)]
pub struct Comment {
    pub id: u64,
    pub html_url: String,
}

/// `POST /repos/{owner}/{repo}/issues/{issue_number}/comments`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CommentRequest {
    #[serde(skip)]
    pub repository: IssueRepository,
    #[serde(skip)]
    pub issue_number: u64,
    pub body: String,
}

/// `PATCH /repos/{owner}/{repo}/issues/{issue_number}`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UpdateIssue {
    #[serde(skip)]
    pub repository: IssueRepository,
    #[serde(skip)]
    pub issue_number: u64,
    pub state: IssueState,
    pub state_reason: String,
    /// Replaces the issue's labels. `None` leaves them untouched: the field
    /// is left out of the body, which GitHub treats differently from `[]`
    /// (that would remove every label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// The two issue-tracker operations a run performs.
#[async_trait]
pub trait IssueTracker {
    async fn create_comment(&self, req: &CommentRequest) -> anyhow::Result<Comment>;

    async fn update_issue(&self, req: &UpdateIssue) -> anyhow::Result<Issue>;
}

#[async_trait]
impl IssueTracker for GithubClient {
    async fn create_comment(&self, req: &CommentRequest) -> anyhow::Result<Comment> {
        let url = format!(
            "{repo_url}/issues/{number}/comments",
            repo_url = req.repository.url(self),
            number = req.issue_number
        );
        let comment = self.json(self.post(&url).json(req)).await?;
        Ok(comment)
    }

    async fn update_issue(&self, req: &UpdateIssue) -> anyhow::Result<Issue> {
        let url = format!(
            "{repo_url}/issues/{number}",
            repo_url = req.repository.url(self),
            number = req.issue_number
        );
        let issue: Issue = self.json(self.patch(&url).json(req)).await?;
        tracing::debug!(
            "{}#{} is now {:?} ({:?})",
            req.repository,
            issue.number,
            issue.state,
            issue.state_reason
        );
        Ok(issue)
    }
}

#[async_trait]
impl<'a, T: IssueTracker + Sync + ?Sized> IssueTracker for &'a T {
    async fn create_comment(&self, req: &CommentRequest) -> anyhow::Result<Comment> {
        (**self).create_comment(req).await
    }

    async fn update_issue(&self, req: &UpdateIssue) -> anyhow::Result<Issue> {
        (**self).update_issue(req).await
    }
}

impl Issue {
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}
