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

//! Compression level catalog
//!
//! Maps the four named compression levels to concrete per-engine parameter
//! sets. The catalog is built once and never mutated; requests take a copy
//! of a profile and may override only its quality field.

use std::collections::HashMap;
use std::fmt;

/// Minimum accepted JPEG quality override
pub const MIN_JPEG_QUALITY: u8 = 10;
/// Maximum accepted JPEG quality override
pub const MAX_JPEG_QUALITY: u8 = 95;

/// Named compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionLevel {
    /// Light compression, highest fidelity
    Low,
    /// Balanced compression (the default)
    #[default]
    Medium,
    /// Aggressive compression
    High,
    /// Most aggressive compression
    Maximum,
}

impl CompressionLevel {
    /// Parse a level name, case-insensitively.
    ///
    /// Unknown or empty names resolve to `Medium`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "low" => CompressionLevel::Low,
            "medium" => CompressionLevel::Medium,
            "high" => CompressionLevel::High,
            "maximum" => CompressionLevel::Maximum,
            _ => CompressionLevel::Medium,
        }
    }

    /// Canonical lowercase name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionLevel::Low => "low",
            CompressionLevel::Medium => "medium",
            CompressionLevel::High => "high",
            CompressionLevel::Maximum => "maximum",
        }
    }

    /// All levels, least to most aggressive
    pub fn all() -> [CompressionLevel; 4] {
        [
            CompressionLevel::Low,
            CompressionLevel::Medium,
            CompressionLevel::High,
            CompressionLevel::Maximum,
        ]
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved parameter set for one compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyProfile {
    /// Resolution cap for color images (dpi)
    pub color_image_resolution: u32,
    /// Resolution cap for grayscale images (dpi)
    pub gray_image_resolution: u32,
    /// Resolution cap for monochrome images (dpi)
    pub mono_image_resolution: u32,
    /// JPEG quality for recompressed raster content
    pub jpeg_quality: u8,
    /// Use the advanced (JPX) image codec instead of DCT
    pub use_advanced_codec: bool,
}

impl StrategyProfile {
    /// Return a copy of this profile with only the quality field replaced.
    ///
    /// The override is rounded to the nearest integer and clamped into
    /// [`MIN_JPEG_QUALITY`, `MAX_JPEG_QUALITY`].
    pub fn with_quality_override(mut self, quality: f64) -> Self {
        self.jpeg_quality = clamp_quality(quality);
        self
    }
}

/// Clamp a caller-supplied quality value into the accepted range,
/// rounding to the nearest integer.
pub fn clamp_quality(quality: f64) -> u8 {
    let rounded = quality.round();
    if rounded < f64::from(MIN_JPEG_QUALITY) {
        MIN_JPEG_QUALITY
    } else if rounded > f64::from(MAX_JPEG_QUALITY) {
        MAX_JPEG_QUALITY
    } else {
        rounded as u8
    }
}

/// Immutable level-to-profile catalog, built once at startup
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    profiles: HashMap<CompressionLevel, StrategyProfile>,
}

impl StrategyCatalog {
    /// Build the catalog with the built-in level tables
    pub fn new() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            CompressionLevel::Low,
            StrategyProfile {
                color_image_resolution: 300,
                gray_image_resolution: 300,
                mono_image_resolution: 600,
                jpeg_quality: 85,
                use_advanced_codec: false,
            },
        );
        profiles.insert(
            CompressionLevel::Medium,
            StrategyProfile {
                color_image_resolution: 200,
                gray_image_resolution: 200,
                mono_image_resolution: 600,
                jpeg_quality: 70,
                use_advanced_codec: false,
            },
        );
        profiles.insert(
            CompressionLevel::High,
            StrategyProfile {
                color_image_resolution: 150,
                gray_image_resolution: 150,
                mono_image_resolution: 600,
                jpeg_quality: 60,
                use_advanced_codec: true,
            },
        );
        profiles.insert(
            CompressionLevel::Maximum,
            StrategyProfile {
                color_image_resolution: 120,
                gray_image_resolution: 120,
                mono_image_resolution: 600,
                jpeg_quality: 45,
                use_advanced_codec: true,
            },
        );
        StrategyCatalog { profiles }
    }

    /// Look up the profile for a level (copied out; the catalog never mutates)
    pub fn profile(&self, level: CompressionLevel) -> StrategyProfile {
        // Every level is inserted in new(); the fallback keeps the lookup total.
        self.profiles
            .get(&level)
            .copied()
            .unwrap_or_else(|| self.profiles[&CompressionLevel::Medium])
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        StrategyCatalog::new()
    }
}
