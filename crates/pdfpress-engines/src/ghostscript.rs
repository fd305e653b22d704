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

//! Lossy content pass (Ghostscript)
//!
//! Transcodes embedded raster content according to a [`StrategyProfile`].
//! Parameter selection uses the preset-bucket strategy: the profile's JPEG
//! quality picks one of Ghostscript's built-in presets, and explicit
//! resolution caps with downsampling are appended only for the most
//! aggressive preset.

use crate::error::{EngineError, EngineResult};
use crate::runner::run_engine;
use crate::strategy::StrategyProfile;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Name of the Ghostscript binary
pub const GHOSTSCRIPT: &str = "gs";

/// Default wall-clock timeout for a Ghostscript invocation
pub const DEFAULT_GS_TIMEOUT: Duration = Duration::from_secs(300);

/// Built-in Ghostscript distiller presets, most to least aggressive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsPreset {
    /// Most aggressive: low-resolution screen viewing
    Screen,
    /// Medium: e-book quality
    Ebook,
    /// Least aggressive: print quality
    Printer,
}

impl GsPreset {
    /// Bucket a JPEG quality value into a preset
    pub fn for_quality(quality: u8) -> Self {
        if quality <= 50 {
            GsPreset::Screen
        } else if quality <= 70 {
            GsPreset::Ebook
        } else {
            GsPreset::Printer
        }
    }

    /// The `-dPDFSETTINGS` flag value for this preset
    pub fn as_flag(&self) -> &'static str {
        match self {
            GsPreset::Screen => "/screen",
            GsPreset::Ebook => "/ebook",
            GsPreset::Printer => "/printer",
        }
    }
}

/// A lossy raster-content transcoder
#[async_trait]
pub trait LossyEngine: Send + Sync {
    /// Transcode `input` into `output` using the resolved profile.
    ///
    /// `downsample_images` gates the explicit resolution-cap flags; preset
    /// selection itself is unaffected by it.
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        profile: &StrategyProfile,
        downsample_images: bool,
    ) -> EngineResult<()>;
}

/// Ghostscript-backed lossy engine
#[derive(Debug, Clone)]
pub struct GhostscriptEngine {
    timeout: Duration,
}

impl GhostscriptEngine {
    /// Create an engine with the default timeout
    pub fn new() -> Self {
        GhostscriptEngine {
            timeout: DEFAULT_GS_TIMEOUT,
        }
    }

    /// Create an engine with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        GhostscriptEngine { timeout }
    }

    fn build_args(
        input: &Path,
        output: &Path,
        profile: &StrategyProfile,
        downsample_images: bool,
    ) -> Vec<OsString> {
        let preset = GsPreset::for_quality(profile.jpeg_quality);

        let mut args: Vec<OsString> = [
            "-sDEVICE=pdfwrite",
            "-dCompatibilityLevel=1.6",
            "-dNOPAUSE",
            "-dBATCH",
            "-dSAFER",
            "-dDetectDuplicateImages=true",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(OsString::from(format!("-dPDFSETTINGS={}", preset.as_flag())));

        // Resolution caps and downsampling only sharpen the most aggressive
        // preset; the milder presets keep their built-in parameters.
        if preset == GsPreset::Screen && downsample_images {
            args.push(OsString::from(format!(
                "-dColorImageResolution={}",
                profile.color_image_resolution
            )));
            args.push(OsString::from(format!(
                "-dGrayImageResolution={}",
                profile.gray_image_resolution
            )));
            args.push(OsString::from(format!(
                "-dMonoImageResolution={}",
                profile.mono_image_resolution
            )));
            args.push(OsString::from("-dDownsampleColorImages=true"));
            args.push(OsString::from("-dDownsampleGrayImages=true"));
            args.push(OsString::from("-dDownsampleMonoImages=true"));
            args.push(OsString::from("-dColorImageDownsampleType=/Average"));
            args.push(OsString::from("-dGrayImageDownsampleType=/Average"));
            args.push(OsString::from("-dMonoImageDownsampleType=/Subsample"));
        }

        if profile.use_advanced_codec {
            args.push(OsString::from("-sColorImageFilter=/JPXEncode"));
            args.push(OsString::from("-sGrayImageFilter=/JPXEncode"));
        } else {
            args.push(OsString::from("-sColorImageFilter=/DCTEncode"));
            args.push(OsString::from("-sGrayImageFilter=/DCTEncode"));
        }

        let mut output_flag = OsString::from("-sOutputFile=");
        output_flag.push(output.as_os_str());
        args.push(output_flag);
        args.push(input.as_os_str().to_os_string());
        args
    }
}

impl Default for GhostscriptEngine {
    fn default() -> Self {
        GhostscriptEngine::new()
    }
}

#[async_trait]
impl LossyEngine for GhostscriptEngine {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        profile: &StrategyProfile,
        downsample_images: bool,
    ) -> EngineResult<()> {
        let args = Self::build_args(input, output, profile, downsample_images);
        let run = run_engine(GHOSTSCRIPT, args, self.timeout).await?;

        if !run.success() {
            return Err(EngineError::execution_failed(GHOSTSCRIPT, run.stderr.trim()));
        }

        let size = tokio::fs::metadata(output).await.map(|m| m.len());
        match size {
            Ok(len) if len > 0 => {
                debug!(
                    output_bytes = len,
                    preset = GsPreset::for_quality(profile.jpeg_quality).as_flag(),
                    "ghostscript pass complete"
                );
                Ok(())
            }
            _ => Err(EngineError::EmptyOutput {
                engine: GHOSTSCRIPT,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{CompressionLevel, StrategyCatalog};
    use std::path::PathBuf;

    fn args_for(profile: &StrategyProfile, downsample: bool) -> Vec<String> {
        GhostscriptEngine::build_args(
            &PathBuf::from("/tmp/in.pdf"),
            &PathBuf::from("/tmp/out.pdf"),
            profile,
            downsample,
        )
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
    }

    #[test]
    fn test_preset_bucketing_thresholds() {
        assert_eq!(GsPreset::for_quality(10), GsPreset::Screen);
        assert_eq!(GsPreset::for_quality(50), GsPreset::Screen);
        assert_eq!(GsPreset::for_quality(51), GsPreset::Ebook);
        assert_eq!(GsPreset::for_quality(70), GsPreset::Ebook);
        assert_eq!(GsPreset::for_quality(71), GsPreset::Printer);
        assert_eq!(GsPreset::for_quality(95), GsPreset::Printer);
    }

    #[test]
    fn test_screen_preset_gets_resolution_caps() {
        let catalog = StrategyCatalog::new();
        let profile = catalog.profile(CompressionLevel::Maximum); // q45 -> /screen
        let args = args_for(&profile, true);

        assert!(args.contains(&"-dPDFSETTINGS=/screen".to_string()));
        assert!(args.contains(&"-dColorImageResolution=120".to_string()));
        assert!(args.contains(&"-dMonoImageDownsampleType=/Subsample".to_string()));
    }

    #[test]
    fn test_milder_presets_skip_resolution_caps() {
        let catalog = StrategyCatalog::new();
        let profile = catalog.profile(CompressionLevel::Medium); // q70 -> /ebook
        let args = args_for(&profile, true);

        assert!(args.contains(&"-dPDFSETTINGS=/ebook".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-dColorImageResolution")));
        assert!(!args.iter().any(|a| a.starts_with("-dDownsample")));
    }

    #[test]
    fn test_image_optimization_off_suppresses_downsampling() {
        let catalog = StrategyCatalog::new();
        let profile = catalog.profile(CompressionLevel::Maximum);
        let args = args_for(&profile, false);

        assert!(args.contains(&"-dPDFSETTINGS=/screen".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-dColorImageResolution")));
        assert!(!args.iter().any(|a| a.starts_with("-dDownsample")));
    }

    #[test]
    fn test_codec_selection_follows_profile() {
        let catalog = StrategyCatalog::new();
        let low = args_for(&catalog.profile(CompressionLevel::Low), true);
        assert!(low.contains(&"-sColorImageFilter=/DCTEncode".to_string()));

        let max = args_for(&catalog.profile(CompressionLevel::Maximum), true);
        assert!(max.contains(&"-sColorImageFilter=/JPXEncode".to_string()));
    }

    #[test]
    fn test_quality_override_reaches_bucketing() {
        let catalog = StrategyCatalog::new();
        // Low defaults to /printer; an override of 30 must drop it to /screen.
        let profile = catalog
            .profile(CompressionLevel::Low)
            .with_quality_override(30.0);
        let args = args_for(&profile, true);
        assert!(args.contains(&"-dPDFSETTINGS=/screen".to_string()));
    }

    #[test]
    fn test_output_file_flag_and_input_last() {
        let catalog = StrategyCatalog::new();
        let args = args_for(&catalog.profile(CompressionLevel::Medium), true);
        assert!(args.contains(&"-sOutputFile=/tmp/out.pdf".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("/tmp/in.pdf"));
    }
}
