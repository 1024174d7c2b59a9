use std::process::ExitCode;

use clap::Parser;
use close_issue::close;
use close_issue::github::{DEFAULT_API_URL, GithubClient};
use close_issue::host::ActionsHost;

/// Closes the issue described by the `INPUT_*` environment variables.
#[derive(Parser, Debug)]
struct Opt {
    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    close_issue::logger::init();

    let opt = Opt::parse();
    let host = ActionsHost::new();
    let outcome = close::run(&host, |inputs| {
        let gh = GithubClient::new(inputs.token.clone(), opt.api_url.clone());
        tracing::debug!("using GitHub API at {}", gh.api_url());
        Ok(gh)
    })
    .await;
    outcome.report(&host);

    if host.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
