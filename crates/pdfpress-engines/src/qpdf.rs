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

//! Lossless structural pass (qpdf)
//!
//! Rewrites the document with recompressed streams, generated object
//! streams, and linearized layout. Content-preserving; always the first
//! pass of the pipeline.

use crate::error::{EngineError, EngineResult};
use crate::runner::run_engine;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Name of the qpdf binary
pub const QPDF: &str = "qpdf";

/// Default wall-clock timeout for a qpdf invocation
pub const DEFAULT_QPDF_TIMEOUT: Duration = Duration::from_secs(120);

/// A lossless, content-preserving document optimizer
#[async_trait]
pub trait LosslessEngine: Send + Sync {
    /// Rewrite `input` into `output` without altering rendered content
    async fn optimize(&self, input: &Path, output: &Path) -> EngineResult<()>;
}

/// qpdf-backed lossless engine
#[derive(Debug, Clone)]
pub struct QpdfEngine {
    timeout: Duration,
}

impl QpdfEngine {
    /// Create an engine with the default timeout
    pub fn new() -> Self {
        QpdfEngine {
            timeout: DEFAULT_QPDF_TIMEOUT,
        }
    }

    /// Create an engine with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        QpdfEngine { timeout }
    }

    fn build_args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from("--object-streams=generate"),
            OsString::from("--stream-data=compress"),
            OsString::from("--linearize"),
            input.as_os_str().to_os_string(),
            output.as_os_str().to_os_string(),
        ]
    }
}

impl Default for QpdfEngine {
    fn default() -> Self {
        QpdfEngine::new()
    }
}

#[async_trait]
impl LosslessEngine for QpdfEngine {
    async fn optimize(&self, input: &Path, output: &Path) -> EngineResult<()> {
        let args = Self::build_args(input, output);
        let run = run_engine(QPDF, args, self.timeout).await?;

        if !run.success() {
            return Err(EngineError::execution_failed(QPDF, run.stderr.trim()));
        }

        let size = tokio::fs::metadata(output).await.map(|m| m.len());
        match size {
            Ok(len) if len > 0 => {
                debug!(output_bytes = len, "qpdf pass complete");
                Ok(())
            }
            _ => Err(EngineError::EmptyOutput { engine: QPDF }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_qpdf_argument_vector() {
        let input = PathBuf::from("/tmp/work/input.pdf");
        let output = PathBuf::from("/tmp/work/lossless.pdf");
        let args: Vec<String> = QpdfEngine::build_args(&input, &output)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "--object-streams=generate",
                "--stream-data=compress",
                "--linearize",
                "/tmp/work/input.pdf",
                "/tmp/work/lossless.pdf",
            ]
        );
    }

    #[test]
    fn test_paths_are_discrete_tokens() {
        // A hostile filename must stay a single argv token, never shell text.
        let input = PathBuf::from("/tmp/a b; rm -rf.pdf");
        let output = PathBuf::from("/tmp/out.pdf");
        let args = QpdfEngine::build_args(&input, &output);
        assert_eq!(args.len(), 5);
        assert_eq!(args[3], input.as_os_str());
    }
}
