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

//! Per-request working area and stage artifacts
//!
//! Each pipeline invocation gets one ephemeral directory holding the input
//! and at most four intermediate artifacts. The directory is removed when
//! the working area drops, on every exit path.

use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Pipeline stage that produced an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Lossless structural pass
    Lossless,
    /// Lossy content pass
    Lossy,
    /// Final artifact (after the optional metadata strip)
    Final,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lossless => "lossless",
            Stage::Lossy => "lossy",
            Stage::Final => "final",
        };
        f.write_str(name)
    }
}

/// An on-disk intermediate result, scoped to one request's working area
#[derive(Debug, Clone)]
pub struct PipelineArtifact {
    /// Location inside the working area
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Stage that produced this artifact
    pub stage: Stage,
}

impl PipelineArtifact {
    /// Stat an engine output file into an artifact
    pub async fn from_path(path: PathBuf, stage: Stage) -> std::io::Result<Self> {
        let size = tokio::fs::metadata(&path).await?.len();
        Ok(PipelineArtifact { path, size, stage })
    }
}

/// Ephemeral per-request directory, deleted on drop
#[derive(Debug)]
pub struct WorkingArea {
    dir: TempDir,
}

impl WorkingArea {
    /// Create a fresh working area
    pub fn create() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("pdfpress-").tempdir()?;
        Ok(WorkingArea { dir })
    }

    /// Path of a named file inside the working area
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// The working area's root directory
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_working_area_removed_on_drop() {
        let area = WorkingArea::create().unwrap();
        let root = area.root().to_path_buf();
        tokio::fs::write(area.path_for("input.pdf"), b"%PDF-1.5")
            .await
            .unwrap();
        assert!(root.exists());

        drop(area);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_artifact_records_size_and_stage() {
        let area = WorkingArea::create().unwrap();
        let path = area.path_for("lossless.pdf");
        tokio::fs::write(&path, vec![0u8; 1234]).await.unwrap();

        let artifact = PipelineArtifact::from_path(path, Stage::Lossless)
            .await
            .unwrap();
        assert_eq!(artifact.size, 1234);
        assert_eq!(artifact.stage, Stage::Lossless);
    }

    #[tokio::test]
    async fn test_missing_artifact_is_an_error() {
        let area = WorkingArea::create().unwrap();
        let result = PipelineArtifact::from_path(area.path_for("gone.pdf"), Stage::Lossy).await;
        assert!(result.is_err());
    }
}
