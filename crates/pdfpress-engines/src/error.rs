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

//! Engine error types

use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while invoking an external engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine binary could not be located on this system
    #[error("engine not found: {engine}")]
    NotFound {
        /// Name of the missing engine binary
        engine: &'static str,
    },

    /// The engine ran but exited with a non-zero status
    #[error("{engine} failed: {stderr}")]
    ExecutionFailed {
        /// Name of the engine that failed
        engine: &'static str,
        /// Captured stderr text for diagnostics
        stderr: String,
    },

    /// The engine exceeded its wall-clock timeout and was killed
    #[error("{engine} timed out after {seconds}s")]
    TimedOut {
        /// Name of the engine that timed out
        engine: &'static str,
        /// The timeout that was exceeded
        seconds: u64,
    },

    /// The engine reported success but produced no usable output file
    #[error("{engine} produced an empty or missing output file")]
    EmptyOutput {
        /// Name of the engine
        engine: &'static str,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create an execution failed error from captured stderr
    pub fn execution_failed(engine: &'static str, stderr: impl Into<String>) -> Self {
        EngineError::ExecutionFailed {
            engine,
            stderr: stderr.into(),
        }
    }

    /// Check if this error means the engine binary is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound { .. })
    }

    /// Check if this error was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, EngineError::TimedOut { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::execution_failed("qpdf", "bad xref");
        assert_eq!(err.to_string(), "qpdf failed: bad xref");

        let err = EngineError::TimedOut {
            engine: "gs",
            seconds: 300,
        };
        assert_eq!(err.to_string(), "gs timed out after 300s");
    }

    #[test]
    fn test_error_predicates() {
        assert!(EngineError::NotFound { engine: "gs" }.is_not_found());
        assert!(!EngineError::NotFound { engine: "gs" }.is_timeout());
        assert!(EngineError::TimedOut {
            engine: "gs",
            seconds: 1
        }
        .is_timeout());
    }
}
