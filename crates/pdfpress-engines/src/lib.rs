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

//! External engine adapters for PdfPress
//!
//! This crate wraps the two external transformation engines behind uniform
//! async traits, together with the compression-level catalog and the
//! startup dependency probe:
//! - **qpdf**: lossless structural pass (stream recompression, object
//!   streams, linearization)
//! - **Ghostscript**: lossy raster-content pass, driven by a
//!   [`StrategyProfile`]
//!
//! Engines are always invoked with discrete argument vectors, captured
//! stdout/stderr, and a hard wall-clock timeout. Failures surface as typed
//! [`EngineError`] values, never as swallowed exit codes.
//!
//! # Quick Start
//!
//! ```no_run
//! use pdfpress_engines::{probe, LosslessEngine, QpdfEngine};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pdfpress_engines::EngineError> {
//!     let report = probe().await;
//!     assert!(report.ready(), "{}", report.message());
//!
//!     let qpdf = QpdfEngine::new();
//!     qpdf.optimize(Path::new("in.pdf"), Path::new("out.pdf")).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod ghostscript;
pub mod probe;
pub mod qpdf;
pub mod runner;
pub mod strategy;

pub use error::{EngineError, EngineResult};
pub use ghostscript::{GhostscriptEngine, GsPreset, LossyEngine, DEFAULT_GS_TIMEOUT, GHOSTSCRIPT};
pub use probe::{probe, EngineStatus, ProbeReport};
pub use qpdf::{LosslessEngine, QpdfEngine, DEFAULT_QPDF_TIMEOUT, QPDF};
pub use runner::{run_engine, EngineRun};
pub use strategy::{
    clamp_quality, CompressionLevel, StrategyCatalog, StrategyProfile, MAX_JPEG_QUALITY,
    MIN_JPEG_QUALITY,
};
