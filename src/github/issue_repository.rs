use std::fmt;
use std::str::FromStr;

use super::GithubClient;

/// The `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRepository {
    pub organization: String,
    pub repository: String,
}

impl fmt::Display for IssueRepository {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

impl FromStr for IssueRepository {
    type Err = anyhow::Error;

    /// Accepts exactly `owner/name`; a missing or extra `/`, or an empty
    /// half, is rejected instead of producing a request for a bogus path.
    fn from_str(s: &str) -> anyhow::Result<IssueRepository> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(IssueRepository {
                    organization: owner.to_string(),
                    repository: name.to_string(),
                })
            }
            _ => anyhow::bail!("invalid repository {s:?}, expected \"owner/name\""),
        }
    }
}

impl IssueRepository {
    pub(crate) fn url(&self, client: &GithubClient) -> String {
        format!(
            "{}/repos/{}/{}",
            client.api_url, self.organization, self.repository
        )
    }
}
