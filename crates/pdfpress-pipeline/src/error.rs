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

//! Pipeline error types
//!
//! Only two conditions flip a pipeline result to `success = false`:
//! a fatal input (the lossless pass rejects the document) and missing
//! engine dependencies. Every other stage failure degrades gracefully and
//! is visible only through diagnostics.

use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The lossless pass rejected the input; the document is not
    /// well-formed. The caller receives the original bytes back.
    #[error("input rejected by lossless pass: {0}")]
    FatalInput(String),

    /// A required external engine is missing; refused before any
    /// working-area I/O.
    #[error("required engines unavailable: {0}")]
    DependencyUnavailable(String),

    /// Working-area I/O failed with no prior good artifact to fall back on
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::FatalInput("qpdf failed: bad xref".to_string());
        assert!(err.to_string().contains("rejected by lossless pass"));

        let err = PipelineError::DependencyUnavailable("missing engines: gs".to_string());
        assert!(err.to_string().contains("unavailable"));
    }
}
