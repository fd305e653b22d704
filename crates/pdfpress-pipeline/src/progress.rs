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

//! Observable progress signal for a staged pipeline run
//!
//! Events go to a caller-supplied callback, keeping progress on a side
//! channel distinct from the structured result payload.

use crate::artifact::Stage;
use std::sync::Arc;

/// Progress event emitted while a pipeline run advances through its stages
#[derive(Debug, Clone)]
pub enum StageEvent {
    /// A stage began
    Started {
        /// The stage that began
        stage: Stage,
    },
    /// A stage produced an artifact
    Completed {
        /// The stage that finished
        stage: Stage,
        /// Artifact size in bytes
        size: u64,
    },
    /// A stage failed and the pipeline fell back to the previous artifact
    Degraded {
        /// The stage that failed
        stage: Stage,
        /// Why it was skipped
        reason: String,
    },
}

/// Callback receiving [`StageEvent`]s during a run
pub type ProgressHook = Arc<dyn Fn(&StageEvent) + Send + Sync>;
