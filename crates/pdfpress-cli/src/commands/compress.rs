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

//! Compress a PDF document through the multi-pass pipeline

use crate::output;
use anyhow::{bail, Context, Result};
use clap::Args;
use pdfpress_pipeline::{probe, CompressionRequest, Orchestrator, StageEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct CompressCmd {
    /// Input PDF file
    pub input: PathBuf,

    /// Output file (defaults to <input>.compressed.pdf); unused with --json
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compression level: low | medium | high | maximum
    #[arg(short, long, default_value = "medium")]
    pub level: String,

    /// Explicit JPEG quality (10-95), overrides the level's default
    #[arg(long, value_name = "N")]
    pub image_quality: Option<f64>,

    /// Strip document metadata after the compression passes
    #[arg(long)]
    pub remove_metadata: bool,

    /// Keep embedded raster images at their original resolution
    #[arg(long)]
    pub no_image_optimization: bool,

    /// Print the JSON result envelope to stdout instead of writing a file
    #[arg(long)]
    pub json: bool,
}

impl CompressCmd {
    pub async fn execute(self) -> Result<()> {
        let input = tokio::fs::read(&self.input)
            .await
            .with_context(|| format!("failed to read {}", self.input.display()))?;

        let report = probe().await;
        if !report.ready() {
            bail!("{} (run `pdfpress doctor` for details)", report.message());
        }

        let request = CompressionRequest {
            level: Some(self.level.clone()),
            image_quality: self.image_quality,
            remove_metadata: self.remove_metadata,
            optimize_embedded_images: !self.no_image_optimization,
        };

        let orchestrator = Orchestrator::new(&report).with_progress(Arc::new(|event: &StageEvent| {
            match event {
                StageEvent::Started { stage } => info!(%stage, "stage started"),
                StageEvent::Completed { stage, size } => {
                    info!(%stage, size, "stage complete");
                }
                StageEvent::Degraded { stage, reason } => {
                    warn!(%stage, %reason, "stage degraded");
                }
            }
        }));

        let result = orchestrator.compress(&input, &request).await;

        if self.json {
            println!("{}", serde_json::to_string(&result.into_envelope())?);
            return Ok(());
        }

        for diagnostic in &result.diagnostics {
            output::warning(diagnostic);
        }

        if !result.success {
            bail!(
                "compression failed: {}",
                result.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let out_path = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input));
        tokio::fs::write(&out_path, &result.payload)
            .await
            .with_context(|| format!("failed to write {}", out_path.display()))?;

        output::success(&format!(
            "{} → {}",
            self.input.display(),
            out_path.display()
        ));
        output::detail("Original size", &format!("{} bytes", result.original_size));
        output::detail("Compressed size", &format!("{} bytes", result.final_size));
        output::detail("Reduction", &format!("{:.1}%", result.reduction_percent));
        Ok(())
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("compressed.pdf")
}
