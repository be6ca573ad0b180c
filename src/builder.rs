//! Builder for [`FemtoViewerLogger`](crate::FemtoViewerLogger).
//!
//! Collects optional overrides, validates them, and produces either a
//! [`ViewerConfig`] or a running logger.

use std::{io, path::Path, time::Duration};

use thiserror::Error;

use crate::{config::ViewerConfig, delivery::FemtoViewerLogger, level::ViewerLevel};

/// Errors that may occur while building a logger.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid viewer configuration: {0}")]
    InvalidConfig(String),
    /// Underlying I/O error whilst reading configuration.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Malformed INI text.
    #[error("invalid INI configuration: {0}")]
    Ini(#[from] ini::ParseError),
}

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(BuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`FemtoViewerLogger`] instances.
#[derive(Clone, Debug, Default)]
pub struct ViewerLoggerBuilder {
    base: Option<ViewerConfig>,
    endpoint: Option<(String, u16)>,
    tag: Option<String>,
    level: Option<ViewerLevel>,
    flush_timeout_ms: Option<u64>,
    warn_interval_ms: Option<u64>,
}

impl ViewerLoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration; later setters override it.
    pub fn from_config(config: ViewerConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    /// Start from the `[viewer]` section of an INI file.
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        Ok(Self::from_config(ViewerConfig::from_ini_file(path)?))
    }

    /// Target a viewer listening on `host:port`.
    pub fn with_tcp(mut self, host: impl Into<String>, port: u16) -> Self {
        self.endpoint = Some((host.into(), port));
        self
    }

    /// Set the Tag part carried by log entries.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    option_setter!(
        /// Set the Level part carried by log entries.
        with_level,
        level,
        ViewerLevel
    );
    option_setter!(
        /// Set how long `flush` and `close` wait for the worker.
        with_flush_timeout_ms,
        flush_timeout_ms,
        u64
    );
    option_setter!(
        /// Set the minimum interval between dropped-packet warnings.
        with_warn_interval_ms,
        warn_interval_ms,
        u64
    );

    /// Validate the overrides and produce the resulting configuration.
    pub fn build_config(&self) -> Result<ViewerConfig, BuildError> {
        let mut config = self.base.clone().unwrap_or_default();
        if let Some((host, port)) = &self.endpoint {
            config = config.with_endpoint(host.clone(), *port);
        }
        if let Some(tag) = &self.tag {
            config.tag = tag.clone();
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(ms) = self.flush_timeout_ms {
            config.flush_timeout = Duration::from_millis(ensure_positive!(ms, "flush_timeout_ms")?);
        }
        if let Some(ms) = self.warn_interval_ms {
            config.warn_interval = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    /// Build and start a logger.
    pub fn build(&self) -> Result<FemtoViewerLogger, BuildError> {
        Ok(FemtoViewerLogger::with_config(self.build_config()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn overrides_apply_on_top_of_base() {
        let base = ViewerConfig::default().with_tag("Base");
        let config = ViewerLoggerBuilder::from_config(base)
            .with_tcp("10.0.0.2", 7000)
            .with_level(ViewerLevel::Error)
            .with_flush_timeout_ms(20)
            .build_config()
            .expect("valid config");
        assert_eq!(config.host, "10.0.0.2");
        assert_eq!(config.port, 7000);
        assert_eq!(config.tag, "Base");
        assert_eq!(config.level, ViewerLevel::Error);
        assert_eq!(config.flush_timeout, Duration::from_millis(20));
    }

    #[rstest]
    fn rejects_zero_flush_timeout() {
        let err = ViewerLoggerBuilder::new()
            .with_flush_timeout_ms(0)
            .build_config()
            .expect_err("zero timeout must fail");
        assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("flush_timeout_ms")));
    }

    #[rstest]
    fn rejects_empty_host() {
        let err = ViewerLoggerBuilder::new()
            .with_tcp("  ", 9000)
            .build_config()
            .expect_err("empty host must fail");
        assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("host")));
    }

    #[rstest]
    fn rejects_zero_port() {
        let err = ViewerLoggerBuilder::new()
            .with_tcp("localhost", 0)
            .build_config()
            .expect_err("zero port must fail");
        assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains("port")));
    }
}
