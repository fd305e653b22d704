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

//! Dependency prober
//!
//! Verifies at startup that every required external engine is present and
//! invocable, so the pipeline fails fast with a clear diagnostic instead of
//! discovering a missing binary mid-pass. The structural document model
//! (lopdf) is statically linked and needs no probe.

use crate::ghostscript::GHOSTSCRIPT;
use crate::qpdf::QPDF;
use crate::runner::run_engine;
use std::time::Duration;
use tracing::{info, warn};

/// Timeout for a single `--version` probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe outcome for one engine
#[derive(Debug, Clone)]
pub struct EngineStatus {
    /// Engine binary name
    pub engine: &'static str,
    /// Whether the engine responded with a success exit code
    pub available: bool,
    /// Version string when available, otherwise the failure reason
    pub detail: String,
}

/// Combined probe outcome for all required engines
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Per-engine statuses
    pub engines: Vec<EngineStatus>,
}

impl ProbeReport {
    /// True only when every required engine is available
    pub fn ready(&self) -> bool {
        self.engines.iter().all(|e| e.available)
    }

    /// Human-readable summary naming each missing engine
    pub fn message(&self) -> String {
        if self.ready() {
            return "all engines available".to_string();
        }
        let missing: Vec<String> = self
            .engines
            .iter()
            .filter(|e| !e.available)
            .map(|e| format!("{} ({})", e.engine, e.detail))
            .collect();
        format!("missing engines: {}", missing.join(", "))
    }

    /// Build a report that marks every engine available (for tests and
    /// embedders that manage their own probing)
    pub fn assume_ready() -> Self {
        ProbeReport {
            engines: vec![
                EngineStatus {
                    engine: QPDF,
                    available: true,
                    detail: "assumed".to_string(),
                },
                EngineStatus {
                    engine: GHOSTSCRIPT,
                    available: true,
                    detail: "assumed".to_string(),
                },
            ],
        }
    }
}

/// Probe every required external engine with a version no-op
pub async fn probe() -> ProbeReport {
    let mut engines = Vec::with_capacity(2);
    for engine in [QPDF, GHOSTSCRIPT] {
        engines.push(probe_one(engine).await);
    }

    let report = ProbeReport { engines };
    if report.ready() {
        info!("engine probe passed");
    } else {
        warn!(message = %report.message(), "engine probe failed");
    }
    report
}

async fn probe_one(engine: &'static str) -> EngineStatus {
    match run_engine(engine, ["--version"], PROBE_TIMEOUT).await {
        Ok(run) if run.success() => EngineStatus {
            engine,
            available: true,
            detail: run.stdout.lines().next().unwrap_or("").trim().to_string(),
        },
        Ok(run) => EngineStatus {
            engine,
            available: false,
            detail: format!("exit code {:?}", run.exit_code),
        },
        Err(e) => EngineStatus {
            engine,
            available: false,
            detail: e.to_string(),
        },
    }
}
