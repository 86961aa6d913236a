//! Process execution utilities with timeout support
//!
//! Children are always killed when the waiting future is dropped. A
//! wall-clock limit is applied only when the caller asks for one.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::core::error::AppError;

/// Run an async Command with a timeout.
///
/// The child is killed when the timeout elapses (`kill_on_drop`).
/// Returns the process Output on success, or an AppError on timeout/IO failure.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, AppError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(AppError::Io(e)),
        Err(_) => Err(AppError::Download(format!(
            "Process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// Run an async Command, optionally bounded by `limit`.
pub async fn run_command(cmd: &mut Command, limit: Option<Duration>) -> Result<Output, AppError> {
    match limit {
        Some(timeout) => run_with_timeout(cmd, timeout).await,
        None => {
            cmd.kill_on_drop(true);
            Ok(cmd.output().await?)
        }
    }
}
