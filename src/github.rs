pub(crate) mod client;
pub(crate) mod issue;
pub(crate) mod issue_repository;

pub use client::{DEFAULT_API_URL, GithubClient};
pub use issue::*;
pub use issue_repository::IssueRepository;
