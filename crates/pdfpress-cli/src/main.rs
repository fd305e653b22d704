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

mod commands;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use commands::{CompressCmd, DoctorCmd};
use pdfpress_observability::{init_tracing, LogFormat};
use std::io;

#[derive(Parser)]
#[command(name = "pdfpress")]
#[command(version, about = "Multi-pass PDF compression via qpdf and Ghostscript")]
#[command(propagate_version = true)]
#[command(author = "PdfPress Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (pretty|compact|json)
    #[arg(long, global = true, value_name = "FORMAT", default_value = "compact")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a PDF document
    Compress(CompressCmd),

    /// Check that the required external engines are installed
    Doctor(DoctorCmd),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = LogFormat::parse(&cli.log_format)?;
    let level = cli.verbose.then_some("debug");
    init_tracing(format, level)?;

    match cli.command {
        Commands::Compress(cmd) => cmd.execute().await,
        Commands::Doctor(cmd) => cmd.execute().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
