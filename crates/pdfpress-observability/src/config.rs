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

//! Logging configuration types

use thiserror::Error;

/// Errors that can occur during logging configuration
#[derive(Error, Debug)]
pub enum LogError {
    /// The format name was not recognized
    #[error("invalid log format: {0}")]
    InvalidFormat(String),

    /// The level filter could not be parsed
    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Output format for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty-printed logs for interactive use
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for machine-readable logs
    Json,
}

impl LogFormat {
    /// Parse a format name
    pub fn parse(name: &str) -> Result<Self, LogError> {
        match name.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(LogError::InvalidFormat(format!(
                "{other} (expected one of: pretty, compact, json)"
            ))),
        }
    }
}

/// Configuration for logging
///
/// Output always goes to stderr so the structured result payload on stdout
/// stays clean for machine consumers.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Output format for logs
    pub format: LogFormat,
    /// Level filter (e.g. "info", "debug"); RUST_LOG wins when unset
    pub level: Option<String>,
}

impl LogConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the level filter
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// The level filter to apply, falling back to RUST_LOG then "info"
    pub fn effective_level(&self) -> String {
        if let Some(level) = &self.level {
            return level.clone();
        }
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(LogFormat::parse("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::parse("xml").is_err());
    }

    #[test]
    fn test_explicit_level_wins() {
        let config = LogConfig::new().with_level("debug");
        assert_eq!(config.effective_level(), "debug");
    }
}
