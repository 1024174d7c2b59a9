//! Closes an issue, optionally commenting on it first and relabelling it.
//!
//! This is a single attempt: if the comment is posted but closing fails, the
//! comment stays and the issue stays open.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use itertools::Itertools;

use crate::config::Inputs;
use crate::errors::panic_message;
use crate::github::IssueTracker;
use crate::host::Host;

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed {
        /// Shown as the run's failure annotation.
        message: String,
        /// The complete error chain, only logged at debug level.
        detail: String,
    },
}

impl Outcome {
    fn from_error(err: anyhow::Error) -> Outcome {
        Outcome::Failed {
            message: err.to_string(),
            detail: format!("{err:?}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }

    /// Hands the outcome to the host. A success reports nothing.
    pub fn report<H: Host + ?Sized>(&self, host: &H) {
        if let Outcome::Failed { message, detail } = self {
            host.debug(detail);
            host.set_failed(message);
        }
    }
}

/// Runs the whole procedure against `host`.
///
/// `connect` builds the issue tracker from the loaded inputs. Every failure,
/// including a panic inside the tracker, ends up as [`Outcome::Failed`].
pub async fn run<H, T, F>(host: &H, connect: F) -> Outcome
where
    H: Host + ?Sized,
    T: IssueTracker,
    F: FnOnce(&Inputs) -> anyhow::Result<T>,
{
    match AssertUnwindSafe(close_issue(host, connect))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => Outcome::Succeeded,
        Ok(Err(e)) => Outcome::from_error(e),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            Outcome::Failed {
                detail: format!("panicked: {message}"),
                message,
            }
        }
    }
}

async fn close_issue<H, T, F>(host: &H, connect: F) -> anyhow::Result<()>
where
    H: Host + ?Sized,
    T: IssueTracker,
    F: FnOnce(&Inputs) -> anyhow::Result<T>,
{
    let inputs = Inputs::load(host)?;
    host.debug(&format!("Inputs: {inputs:#?}"));
    host.debug(&format!("Repo: {:?}", inputs.repository.repository));

    let tracker = connect(&inputs)?;

    if let Some(req) = inputs.comment_request() {
        host.info("Adding a comment before closing the issue");
        let comment = tracker.create_comment(&req).await?;
        host.debug(&format!("Comment {} created: {}", comment.id, comment.html_url));
    }

    host.info(&format!("Closing the issue as {}", inputs.close_reason));
    let req = inputs.update_request();
    let issue = tracker.update_issue(&req).await?;
    if req.labels.is_some() {
        host.debug(&format!("Labels: {}", issue.label_names().format(", ")));
    }
    if issue.is_closed() {
        host.info(&format!("Closed {}", issue.html_url));
    } else {
        tracing::warn!("{} is still {:?} after the update", issue.html_url, issue.state);
    }

    Ok(())
}
