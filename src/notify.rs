//! Desktop notification via `terminal-notifier`.

use crate::config::Config;
use crate::constants::{NOTIFICATION_MESSAGE, NOTIFICATION_TITLE};
use crate::process::{CommandLogger, Invocation};
use std::path::Path;

/// `file://` URL for a local path, resolved against the working directory.
#[must_use]
pub fn file_url(path: &Path) -> String {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", path.display())
}

fn notifier_invocation(config: &Config, report: &Path) -> Invocation {
    Invocation::new(&config.notifier_program).args([
        "-title",
        NOTIFICATION_TITLE,
        "-message",
        NOTIFICATION_MESSAGE,
        "-open",
        file_url(report).as_str(),
    ])
}

/// Sends the notification opening `report`.
///
/// The notifier's exit status is not checked; only a failure to run it at
/// all is reported. Returns whether it exited successfully.
pub fn send(config: &Config, report: &Path, logger: CommandLogger) -> anyhow::Result<bool> {
    let output = notifier_invocation(config, report).output(config.timeout, logger)?;
    Ok(output.status.success())
}
