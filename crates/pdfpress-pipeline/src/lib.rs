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

//! Multi-pass PDF compression pipeline
//!
//! Runs a lossless structural pass, a lossy raster pass, a size comparison
//! that commits to the smaller artifact, and an optional metadata strip,
//! inside a per-request ephemeral working area. Recoverable stage failures
//! degrade gracefully; the pipeline never loses the caller's document.
//!
//! # Quick Start
//!
//! ```no_run
//! use pdfpress_pipeline::{CompressionRequest, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let report = pdfpress_engines::probe().await;
//!     let orchestrator = Orchestrator::new(&report);
//!
//!     let input = std::fs::read("report.pdf").unwrap();
//!     let request = CompressionRequest::from_json(
//!         r#"{"level": "high", "removeMetadata": true}"#,
//!     )
//!     .unwrap();
//!
//!     let result = orchestrator.compress(&input, &request).await;
//!     println!(
//!         "{} -> {} bytes ({:.1}% reduction)",
//!         result.original_size, result.final_size, result.reduction_percent
//!     );
//! }
//! ```

pub mod artifact;
pub mod error;
pub mod metadata;
pub mod orchestrator;
pub mod progress;
pub mod request;
pub mod result;

pub use artifact::{PipelineArtifact, Stage, WorkingArea};
pub use error::PipelineError;
pub use metadata::{strip_metadata, StripOutcome};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use progress::{ProgressHook, StageEvent};
pub use request::CompressionRequest;
pub use result::{reduction_percent, PipelineResult, ResultEnvelope};

// Re-exported so embedders can probe and pick levels without importing the
// engines crate directly.
pub use pdfpress_engines::{probe, CompressionLevel, ProbeReport, StrategyCatalog};
