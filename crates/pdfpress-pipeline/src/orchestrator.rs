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

//! Pipeline orchestrator
//!
//! Sequences the lossless pass, the lossy pass, the size comparison, and
//! the optional metadata strip, with graceful degradation on recoverable
//! stage failures. Worst case, the caller gets back exactly the bytes they
//! sent, flagged as unsuccessful.

use crate::artifact::{PipelineArtifact, Stage, WorkingArea};
use crate::error::PipelineError;
use crate::metadata::{strip_metadata, StripOutcome};
use crate::progress::{ProgressHook, StageEvent};
use crate::request::CompressionRequest;
use crate::result::PipelineResult;
use pdfpress_engines::{
    GhostscriptEngine, LosslessEngine, LossyEngine, ProbeReport, QpdfEngine, StrategyCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

/// Tunables for an orchestrator instance
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum number of concurrently running pipelines
    pub max_concurrency: usize,
    /// Wall-clock timeout for the lossless pass
    pub lossless_timeout: Duration,
    /// Wall-clock timeout for the lossy pass
    pub lossy_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig {
            max_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            lossless_timeout: pdfpress_engines::DEFAULT_QPDF_TIMEOUT,
            lossy_timeout: pdfpress_engines::DEFAULT_GS_TIMEOUT,
        }
    }
}

/// Multi-pass compression pipeline
///
/// Holds the immutable strategy catalog and the engine adapters; safe to
/// share across tasks. Requests are independent aside from the concurrency
/// limiter.
pub struct Orchestrator {
    catalog: StrategyCatalog,
    lossless: Arc<dyn LosslessEngine>,
    lossy: Arc<dyn LossyEngine>,
    limiter: Arc<Semaphore>,
    ready: Result<(), String>,
    progress: Option<ProgressHook>,
}

impl Orchestrator {
    /// Create an orchestrator backed by the real qpdf/Ghostscript engines
    pub fn new(report: &ProbeReport) -> Self {
        Orchestrator::with_config(report, OrchestratorConfig::default())
    }

    /// Create an orchestrator with custom timeouts and concurrency bound
    pub fn with_config(report: &ProbeReport, config: OrchestratorConfig) -> Self {
        Orchestrator::with_engines(
            report,
            StrategyCatalog::new(),
            Arc::new(QpdfEngine::with_timeout(config.lossless_timeout)),
            Arc::new(GhostscriptEngine::with_timeout(config.lossy_timeout)),
            config.max_concurrency,
        )
    }

    /// Create an orchestrator over arbitrary engine implementations.
    ///
    /// The seam the tests use; embedders may also supply their own engines.
    pub fn with_engines(
        report: &ProbeReport,
        catalog: StrategyCatalog,
        lossless: Arc<dyn LosslessEngine>,
        lossy: Arc<dyn LossyEngine>,
        max_concurrency: usize,
    ) -> Self {
        let ready = if report.ready() {
            Ok(())
        } else {
            Err(report.message())
        };
        Orchestrator {
            catalog,
            lossless,
            lossy,
            limiter: Arc::new(Semaphore::new(max_concurrency.max(1))),
            ready,
            progress: None,
        }
    }

    /// Attach a progress callback receiving per-stage events
    #[must_use]
    pub fn with_progress(mut self, hook: ProgressHook) -> Self {
        self.progress = Some(hook);
        self
    }

    fn emit(&self, event: StageEvent) {
        if let Some(hook) = &self.progress {
            hook(&event);
        }
    }

    /// Run the full pipeline over `input`.
    ///
    /// Never returns an error: fatal conditions are absorbed into a result
    /// carrying the original bytes with `success = false`.
    #[instrument(skip_all, fields(input_bytes = input.len(), level = %request.resolved_level()))]
    pub async fn compress(&self, input: &[u8], request: &CompressionRequest) -> PipelineResult {
        // Refuse before any working-area I/O when engines are missing.
        if let Err(message) = &self.ready {
            let err = PipelineError::DependencyUnavailable(message.clone());
            warn!(%err, "pipeline refused");
            return PipelineResult::failed(input, err.to_string(), Vec::new());
        }

        let _permit = match self.limiter.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return PipelineResult::failed(input, "pipeline limiter closed", Vec::new());
            }
        };

        let mut diagnostics = Vec::new();
        match self.run_stages(input, request, &mut diagnostics).await {
            Ok(payload) => {
                let result =
                    PipelineResult::succeeded(input.len() as u64, payload, diagnostics);
                info!(
                    original_size = result.original_size,
                    final_size = result.final_size,
                    reduction_percent = result.reduction_percent,
                    "pipeline complete"
                );
                result
            }
            Err(err) => {
                warn!(%err, "pipeline failed, returning original input");
                PipelineResult::failed(input, err.to_string(), diagnostics)
            }
        }
    }

    async fn run_stages(
        &self,
        input: &[u8],
        request: &CompressionRequest,
        diagnostics: &mut Vec<String>,
    ) -> Result<Vec<u8>, PipelineError> {
        let area = WorkingArea::create()?;
        let source = area.path_for("input.pdf");
        tokio::fs::write(&source, input).await?;

        // Lossless pass: the document must always survive this, so a
        // failure marks the input itself as non-conformant.
        self.emit(StageEvent::Started {
            stage: Stage::Lossless,
        });
        let lossless_path = area.path_for("lossless.pdf");
        self.lossless
            .optimize(&source, &lossless_path)
            .await
            .map_err(|e| PipelineError::FatalInput(e.to_string()))?;
        let lossless = PipelineArtifact::from_path(lossless_path, Stage::Lossless).await?;
        self.emit(StageEvent::Completed {
            stage: Stage::Lossless,
            size: lossless.size,
        });

        // Lossy pass over the lossless output; recoverable on failure.
        let profile = request.resolve_profile(&self.catalog);
        self.emit(StageEvent::Started { stage: Stage::Lossy });
        let lossy_path = area.path_for("lossy.pdf");
        let lossy = match self
            .lossy
            .transcode(
                &lossless.path,
                &lossy_path,
                &profile,
                request.optimize_embedded_images,
            )
            .await
        {
            Ok(()) => match PipelineArtifact::from_path(lossy_path, Stage::Lossy).await {
                Ok(artifact) => {
                    self.emit(StageEvent::Completed {
                        stage: Stage::Lossy,
                        size: artifact.size,
                    });
                    Some(artifact)
                }
                Err(e) => {
                    self.degrade(Stage::Lossy, e.to_string(), diagnostics);
                    None
                }
            },
            Err(e) => {
                self.degrade(Stage::Lossy, e.to_string(), diagnostics);
                None
            }
        };

        // Strictly smaller wins; ties keep the content-preserving artifact.
        let chosen = match lossy {
            Some(artifact) if artifact.size < lossless.size => artifact,
            _ => lossless,
        };
        debug!(stage = %chosen.stage, size = chosen.size, "chosen artifact");

        let final_path = if request.remove_metadata {
            self.strip_stage(&area, &chosen, diagnostics).await
        } else {
            chosen.path.clone()
        };

        let payload = tokio::fs::read(&final_path).await?;
        Ok(payload)
        // `area` drops here, removing the working directory on every path.
    }

    async fn strip_stage(
        &self,
        area: &WorkingArea,
        chosen: &PipelineArtifact,
        diagnostics: &mut Vec<String>,
    ) -> PathBuf {
        self.emit(StageEvent::Started { stage: Stage::Final });
        let strip_input = chosen.path.clone();
        let strip_output = area.path_for("final.pdf");
        let task_output = strip_output.clone();

        let outcome =
            tokio::task::spawn_blocking(move || strip_metadata(&strip_input, &task_output)).await;

        match outcome {
            Ok(Ok(StripOutcome::Stripped)) => strip_output,
            Ok(Ok(StripOutcome::CopiedVerbatim { warning })) => {
                self.degrade(Stage::Final, warning, diagnostics);
                strip_output
            }
            Ok(Err(e)) => {
                self.degrade(Stage::Final, format!("metadata strip I/O failed: {e}"), diagnostics);
                chosen.path.clone()
            }
            Err(e) => {
                self.degrade(Stage::Final, format!("metadata strip task failed: {e}"), diagnostics);
                chosen.path.clone()
            }
        }
    }

    fn degrade(&self, stage: Stage, reason: String, diagnostics: &mut Vec<String>) {
        warn!(%stage, %reason, "stage degraded");
        diagnostics.push(format!("{stage} stage degraded: {reason}"));
        self.emit(StageEvent::Degraded { stage, reason });
    }
}
