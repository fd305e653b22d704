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

//! Compression request model
//!
//! Deserialized from the caller's flat key-value options (camelCase keys on
//! the wire). Level names are case-insensitive and unknown names fall back
//! to `medium`; an explicit image quality always overrides the level's
//! default quality.

use pdfpress_engines::{CompressionLevel, StrategyCatalog, StrategyProfile};
use serde::Deserialize;

fn default_optimize_images() -> bool {
    true
}

/// Per-request compression options
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionRequest {
    /// Level name: low | medium | high | maximum (case-insensitive)
    #[serde(default)]
    pub level: Option<String>,

    /// Explicit JPEG quality override, clamped into [10, 95]
    #[serde(default)]
    pub image_quality: Option<f64>,

    /// Strip document metadata after the compression passes
    #[serde(default)]
    pub remove_metadata: bool,

    /// Allow downsampling of embedded raster images
    #[serde(default = "default_optimize_images")]
    pub optimize_embedded_images: bool,
}

impl Default for CompressionRequest {
    fn default() -> Self {
        CompressionRequest {
            level: None,
            image_quality: None,
            remove_metadata: false,
            optimize_embedded_images: true,
        }
    }
}

impl CompressionRequest {
    /// Build a request for a specific level with all other defaults
    pub fn for_level(level: CompressionLevel) -> Self {
        CompressionRequest {
            level: Some(level.as_str().to_string()),
            ..CompressionRequest::default()
        }
    }

    /// Parse a request from its JSON wire form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The effective compression level for this request
    pub fn resolved_level(&self) -> CompressionLevel {
        self.level
            .as_deref()
            .map(CompressionLevel::parse)
            .unwrap_or_default()
    }

    /// Resolve the strategy profile for this request: catalog lookup plus
    /// the optional quality override (clamped). Only the quality field of
    /// the request-scoped copy is touched.
    pub fn resolve_profile(&self, catalog: &StrategyCatalog) -> StrategyProfile {
        let profile = catalog.profile(self.resolved_level());
        match self.image_quality {
            Some(quality) => profile.with_quality_override(quality),
            None => profile,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_defaults() {
        let request = CompressionRequest::from_json("{}").unwrap();
        assert_eq!(request.resolved_level(), CompressionLevel::Medium);
        assert!(request.image_quality.is_none());
        assert!(!request.remove_metadata);
        assert!(request.optimize_embedded_images);
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let request = CompressionRequest::from_json(
            r#"{"level":"HIGH","imageQuality":30,"removeMetadata":true,"optimizeEmbeddedImages":false}"#,
        )
        .unwrap();
        assert_eq!(request.resolved_level(), CompressionLevel::High);
        assert_eq!(request.image_quality, Some(30.0));
        assert!(request.remove_metadata);
        assert!(!request.optimize_embedded_images);
    }

    #[test]
    fn test_unrecognized_level_falls_back_to_medium() {
        let request = CompressionRequest::from_json(r#"{"level":"turbo"}"#).unwrap();
        assert_eq!(request.resolved_level(), CompressionLevel::Medium);
    }

    #[test]
    fn test_quality_override_wins_over_level_default() {
        let catalog = StrategyCatalog::new();
        for level in CompressionLevel::all() {
            let request = CompressionRequest {
                image_quality: Some(30.0),
                ..CompressionRequest::for_level(level)
            };
            assert_eq!(request.resolve_profile(&catalog).jpeg_quality, 30);
        }
    }

    #[test]
    fn test_out_of_range_quality_is_clamped() {
        let catalog = StrategyCatalog::new();

        let low = CompressionRequest {
            image_quality: Some(5.0),
            ..CompressionRequest::default()
        };
        assert_eq!(low.resolve_profile(&catalog).jpeg_quality, 10);

        let high = CompressionRequest {
            image_quality: Some(120.0),
            ..CompressionRequest::default()
        };
        assert_eq!(high.resolve_profile(&catalog).jpeg_quality, 95);
    }

    #[test]
    fn test_profile_without_override_matches_catalog() {
        let catalog = StrategyCatalog::new();
        let request = CompressionRequest::for_level(CompressionLevel::Maximum);
        assert_eq!(
            request.resolve_profile(&catalog),
            catalog.profile(CompressionLevel::Maximum)
        );
    }
}
