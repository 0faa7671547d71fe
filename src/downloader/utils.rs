// Subprocess helpers shared by extractor implementations

use std::io::ErrorKind;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use super::errors::DownloadError;

/// Run an external command to completion, collecting stdout and stderr,
/// with a hard wall-clock limit. The child is killed if the limit is hit.
pub async fn run_with_timeout(
    program: &str,
    args: &[String],
    limit: Duration,
) -> Result<Output, DownloadError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(limit, command.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) if err.kind() == ErrorKind::NotFound => {
            Err(DownloadError::ToolNotFound(program.to_string()))
        }
        Ok(Err(err)) => Err(DownloadError::ExecutionFailed(format!(
            "failed to run {}: {}",
            program, err
        ))),
        Err(_) => Err(DownloadError::Timeout(limit.as_secs())),
    }
}
