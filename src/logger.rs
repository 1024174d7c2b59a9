use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "CLOSE_ISSUE_LOG";

/// Installs the subscriber for the crate's own diagnostics.
///
/// These go to stderr, filtered by `CLOSE_ISSUE_LOG` (default `warn`), so
/// they never mix with the workflow commands written to stdout.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var_os("DISABLE_COLOR").is_none())
        .try_init();
}
