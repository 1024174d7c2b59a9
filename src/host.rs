//! The facility the run reports to.
//!
//! Inside a workflow this is the GitHub Actions runner: inputs arrive as
//! `INPUT_*` environment variables and diagnostics are written to stdout as
//! [workflow commands](https://docs.github.com/actions/using-workflows/workflow-commands-for-github-actions).

use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Everything the run procedure needs from its environment.
pub trait Host {
    /// Returns the value of the named input, or an empty string if unset.
    fn get_input(&self, name: &str) -> String;

    fn debug(&self, text: &str);

    fn info(&self, text: &str);

    /// Marks the run as failed. This does not terminate the process.
    fn set_failed(&self, message: &str);

    /// Asks the host to mask `value` in any later output.
    fn set_secret(&self, _value: &str) {}
}

/// The GitHub Actions runner.
pub struct ActionsHost<W = Stdout> {
    out: Mutex<W>,
    failed: AtomicBool,
}

impl ActionsHost<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> ActionsHost<W> {
    pub fn with_writer(out: W) -> Self {
        ActionsHost {
            out: Mutex::new(out),
            failed: AtomicBool::new(false),
        }
    }

    /// Whether [`Host::set_failed`] was called.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::error!("failed to write to the runner: {e}");
        }
    }

    fn command(&self, command: &str, data: &str) {
        self.write_line(&format!("::{command}::{}", escape_data(data)));
    }
}

impl<W: Write> Host for ActionsHost<W> {
    fn get_input(&self, name: &str) -> String {
        std::env::var(input_var(name))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn debug(&self, text: &str) {
        self.command("debug", text);
    }

    fn info(&self, text: &str) {
        self.write_line(text);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.command("error", message);
    }

    fn set_secret(&self, value: &str) {
        if !value.is_empty() {
            self.command("add-mask", value);
        }
    }
}

/// `issue-number` is read from `INPUT_ISSUE-NUMBER`.
fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
