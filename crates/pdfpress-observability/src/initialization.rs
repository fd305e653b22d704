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

//! Tracing initialization

use crate::config::{LogConfig, LogError, LogFormat};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initialize tracing with a format and optional level filter.
///
/// Convenience wrapper over [`init_tracing_with_config`].
pub fn init_tracing(format: LogFormat, level: Option<&str>) -> Result<(), LogError> {
    let mut config = LogConfig::new().with_format(format);
    if let Some(level) = level {
        config = config.with_level(level);
    }
    init_tracing_with_config(config)
}

/// Initialize the global tracing subscriber.
///
/// All log output goes to stderr; stdout is reserved for result payloads.
pub fn init_tracing_with_config(config: LogConfig) -> Result<(), LogError> {
    let env_filter = build_env_filter(&config)?;
    let registry = Registry::default().with(env_filter);

    match config.format {
        LogFormat::Pretty => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).pretty())
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).compact())
                .init();
        }
        LogFormat::Json => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).json())
                .init();
        }
    }

    Ok(())
}

fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let level = config.effective_level();
    EnvFilter::try_new(&level)
        .map_err(|e| LogError::ConfigError(format!("failed to parse log filter '{level}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Initializing the global subscriber is a once-per-process operation,
    // so only the filter construction is unit-tested here.

    #[test]
    fn test_env_filter_accepts_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let config = LogConfig::new().with_level(level);
            assert!(build_env_filter(&config).is_ok(), "level {level}");
        }
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        let config = LogConfig::new().with_level("not[a]filter=");
        assert!(build_env_filter(&config).is_err());
    }
}
