// PdfPress - Multi-Pass PDF Compression
// Copyright (C) 2025 PdfPress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Child-process runner for external engines
//!
//! Spawns exactly one child per call with discrete argument tokens (no shell
//! interpretation), captures stdout/stderr, and enforces a hard wall-clock
//! timeout. The runner reports the raw process result; interpreting exit
//! codes is the caller's responsibility.

use crate::error::{EngineError, EngineResult};
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Raw result of one engine invocation
#[derive(Debug, Clone)]
pub struct EngineRun {
    /// Process exit code, None if terminated by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl EngineRun {
    /// True when the process exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run one external engine to completion.
///
/// The child inherits nothing: stdin is closed, stdout/stderr are captured.
/// When `timeout` elapses the child is killed and [`EngineError::TimedOut`]
/// is returned. A missing binary maps to [`EngineError::NotFound`].
pub async fn run_engine<I, S>(
    engine: &'static str,
    args: I,
    timeout: Duration,
) -> EngineResult<EngineRun>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(engine);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(engine, timeout_secs = timeout.as_secs(), "spawning engine");

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EngineError::NotFound { engine });
        }
        Ok(Err(e)) => return Err(EngineError::Io(e)),
        Err(_) => {
            warn!(engine, timeout_secs = timeout.as_secs(), "engine timed out");
            return Err(EngineError::TimedOut {
                engine,
                seconds: timeout.as_secs(),
            });
        }
    };

    let run = EngineRun {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(engine, exit_code = ?run.exit_code, "engine finished");
    Ok(run)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_maps_to_not_found() {
        let err = run_engine(
            "pdfpress-no-such-engine",
            ["--version"],
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let run = run_engine("echo", ["hello"], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(run.success());
        assert_eq!(run.stdout.trim(), "hello");
        assert!(run.stderr.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_reported_not_swallowed() {
        let run = run_engine("false", Vec::<String>::new(), Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!run.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let err = run_engine("sleep", ["5"], Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
