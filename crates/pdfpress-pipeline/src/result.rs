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

//! Pipeline result model and wire envelope
//!
//! The pipeline never destroys data: on failure the payload is exactly the
//! original input, flagged with `success = false`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

/// Outcome of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// False only for fatal input or missing dependencies
    pub success: bool,
    /// Input size in bytes
    pub original_size: u64,
    /// Final artifact size in bytes (equals `original_size` on failure)
    pub final_size: u64,
    /// Size reduction as a percentage of the original (0 on failure;
    /// negative when a processed document inflated)
    pub reduction_percent: f64,
    /// Final artifact bytes (the original input on failure)
    pub payload: Vec<u8>,
    /// Ordered human-readable diagnostics from degraded stages
    pub diagnostics: Vec<String>,
    /// Error description when `success` is false
    pub error: Option<String>,
}

impl PipelineResult {
    /// Build a successful result from the final payload
    pub fn succeeded(original_size: u64, payload: Vec<u8>, diagnostics: Vec<String>) -> Self {
        let final_size = payload.len() as u64;
        PipelineResult {
            success: true,
            original_size,
            final_size,
            reduction_percent: reduction_percent(original_size, final_size),
            payload,
            diagnostics,
            error: None,
        }
    }

    /// Build a failed result that hands the original input back unchanged
    pub fn failed(input: &[u8], error: impl Into<String>, diagnostics: Vec<String>) -> Self {
        let original_size = input.len() as u64;
        PipelineResult {
            success: false,
            original_size,
            final_size: original_size,
            reduction_percent: 0.0,
            payload: input.to_vec(),
            diagnostics,
            error: Some(error.into()),
        }
    }

    /// Convert into the JSON wire envelope (payload base64-encoded)
    pub fn into_envelope(self) -> ResultEnvelope {
        ResultEnvelope {
            success: self.success,
            original_size: self.original_size,
            compressed_size: self.final_size,
            compression_ratio: round_one_decimal(self.reduction_percent),
            compressed_data: BASE64.encode(&self.payload),
            error: self.error,
        }
    }
}

/// Serialized result shape for machine consumers
#[derive(Debug, Clone, Serialize)]
pub struct ResultEnvelope {
    /// Whether the pipeline produced a compressed document
    pub success: bool,
    /// Input size in bytes
    pub original_size: u64,
    /// Output size in bytes
    pub compressed_size: u64,
    /// Reduction percentage, one decimal place
    pub compression_ratio: f64,
    /// Base64-encoded output bytes
    pub compressed_data: String,
    /// Error description, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Size reduction as a percentage of the original, zero-guarded
pub fn reduction_percent(original_size: u64, final_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size as f64 - final_size as f64) / original_size as f64 * 100.0
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_percent_math() {
        assert_eq!(reduction_percent(1000, 600), 40.0);
        assert_eq!(reduction_percent(1000, 1000), 0.0);
        assert_eq!(reduction_percent(0, 0), 0.0);
        // Inflation is reported accurately, not hidden.
        assert_eq!(reduction_percent(1000, 1100), -10.0);
    }

    #[test]
    fn test_failed_result_keeps_original_bytes() {
        let input = b"original document bytes";
        let result = PipelineResult::failed(input, "qpdf failed", vec![]);

        assert!(!result.success);
        assert_eq!(result.payload, input);
        assert_eq!(result.original_size, input.len() as u64);
        assert_eq!(result.final_size, input.len() as u64);
        assert_eq!(result.reduction_percent, 0.0);
    }

    #[test]
    fn test_envelope_wire_keys() {
        let result = PipelineResult::succeeded(1000, vec![0x25; 333], vec![]);
        let json = serde_json::to_value(result.into_envelope()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["original_size"], 1000);
        assert_eq!(json["compressed_size"], 333);
        assert_eq!(json["compression_ratio"], 66.7);
        assert!(json.get("error").is_none());
        assert!(json["compressed_data"].is_string());
    }

    #[test]
    fn test_envelope_payload_roundtrips_base64() {
        let payload = b"%PDF-1.6 fake".to_vec();
        let envelope = PipelineResult::succeeded(100, payload.clone(), vec![]).into_envelope();
        let decoded = BASE64.decode(envelope.compressed_data).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_envelope_carries_error_on_failure() {
        let envelope =
            PipelineResult::failed(b"x", "input rejected", vec!["diag".to_string()]).into_envelope();
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("input rejected"));
        assert_eq!(envelope.compression_ratio, 0.0);
    }
}
