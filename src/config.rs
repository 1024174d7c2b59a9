use secrecy::SecretString;

use crate::github::{CommentRequest, IssueRepository, IssueState, UpdateIssue};
use crate::host::Host;

/// The action inputs, read once at the start of a run.
#[derive(Debug)]
pub struct Inputs {
    pub token: SecretString,
    pub repository: IssueRepository,
    pub issue_number: u64,
    /// Sent as-is as the `state_reason`, e.g. `completed` or `not_planned`.
    pub close_reason: String,
    pub comment: String,
    /// Comma-separated label names.
    pub labels: String,
}

impl Inputs {
    pub fn load<H: Host + ?Sized>(host: &H) -> anyhow::Result<Inputs> {
        let token = host.get_input("token");
        if token.is_empty() {
            anyhow::bail!("Parameter token or opts.auth is required");
        }
        host.set_secret(&token);

        let issue_number = host.get_input("issue-number");
        let issue_number = match issue_number.parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => anyhow::bail!("invalid issue number {issue_number:?}"),
        };

        Ok(Inputs {
            token: token.into(),
            repository: host.get_input("repository").parse()?,
            issue_number,
            close_reason: host.get_input("close-reason"),
            comment: host.get_input("comment"),
            labels: host.get_input("labels"),
        })
    }

    pub fn comment(&self) -> Option<&str> {
        (!self.comment.is_empty()).then_some(self.comment.as_str())
    }

    /// The labels to set on close.
    ///
    /// `None` when no token has any content, so the issue's labels are left
    /// alone. Otherwise every token of the split is kept verbatim, empty
    /// ones included.
    pub fn labels(&self) -> Option<Vec<String>> {
        let tokens = self.labels.split(',').map(str::to_string).collect::<Vec<_>>();
        if tokens.iter().all(|t| t.trim().is_empty()) {
            None
        } else {
            Some(tokens)
        }
    }

    pub fn comment_request(&self) -> Option<CommentRequest> {
        self.comment().map(|body| CommentRequest {
            repository: self.repository.clone(),
            issue_number: self.issue_number,
            body: body.to_string(),
        })
    }

    pub fn update_request(&self) -> UpdateIssue {
        UpdateIssue {
            repository: self.repository.clone(),
            issue_number: self.issue_number,
            state: IssueState::Closed,
            state_reason: self.close_reason.clone(),
            labels: self.labels(),
        }
    }
}
