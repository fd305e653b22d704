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

//! Check that the required external engines are installed

use crate::output;
use anyhow::Result;
use clap::Args;
use pdfpress_pipeline::probe;

#[derive(Debug, Args)]
pub struct DoctorCmd {}

impl DoctorCmd {
    pub async fn execute(self) -> Result<()> {
        let report = probe().await;

        for status in &report.engines {
            if status.available {
                output::success(&format!("{}: {}", status.engine, status.detail));
            } else {
                output::error(&format!("{}: {}", status.engine, status.detail));
            }
        }

        if report.ready() {
            output::info("all engines available, ready to compress");
            Ok(())
        } else {
            anyhow::bail!("{}", report.message());
        }
    }
}
