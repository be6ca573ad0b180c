//! Configuration consumed by [`FemtoViewerLogger`](crate::FemtoViewerLogger).
//!
//! Values can be assembled in code, through
//! [`ViewerLoggerBuilder`](crate::ViewerLoggerBuilder), or loaded from the
//! `[viewer]` section of an INI file:
//!
//! ```ini
//! [viewer]
//! host = 127.0.0.1
//! port = 50010
//! tag = MyApp
//! level = debug
//! flush_timeout_ms = 1000
//! warn_interval_ms = 5000
//! ```

use std::{fs, path::Path, time::Duration};

use ini::Ini;

use crate::{
    builder::BuildError, delivery::TcpConnector, level::ViewerLevel,
    rate_limited_warner::DEFAULT_WARN_INTERVAL,
};

/// Default viewer host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default viewer port.
pub const DEFAULT_PORT: u16 = 50010;
/// Default value of the Tag part on log entries.
pub const DEFAULT_TAG: &str = "FemtoViewer";
/// Default time `flush` and `close` wait for the worker.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);
/// INI section holding viewer settings.
pub const INI_SECTION: &str = "viewer";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerConfig {
    pub host: String,
    pub port: u16,
    pub tag: String,
    pub level: ViewerLevel,
    pub flush_timeout: Duration,
    pub warn_interval: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            tag: DEFAULT_TAG.into(),
            level: ViewerLevel::default(),
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            warn_interval: DEFAULT_WARN_INTERVAL,
        }
    }
}

impl ViewerConfig {
    /// Override the viewer endpoint.
    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_level(mut self, level: ViewerLevel) -> Self {
        self.level = level;
        self
    }

    /// TCP connector for the configured endpoint.
    pub fn connector(&self) -> TcpConnector {
        TcpConnector::new(self.host.clone(), self.port)
    }

    /// Check invariants the logger relies on.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.host.trim().is_empty() {
            return Err(BuildError::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(BuildError::InvalidConfig(
                "port must be greater than zero".into(),
            ));
        }
        if self.flush_timeout.is_zero() {
            return Err(BuildError::InvalidConfig(
                "flush_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Parse the `[viewer]` section of INI text. Missing keys keep their
    /// defaults; unknown keys are rejected.
    pub fn from_ini_str(text: &str) -> Result<Self, BuildError> {
        let ini = Ini::load_from_str(text)?;
        let section = ini.section(Some(INI_SECTION)).ok_or_else(|| {
            BuildError::InvalidConfig(format!("missing [{INI_SECTION}] section"))
        })?;
        let mut config = Self::default();
        for (key, value) in section.iter() {
            let value = value.trim();
            match key {
                "host" => config.host = value.to_owned(),
                "port" => config.port = parse_field(key, value)?,
                "tag" => config.tag = value.to_owned(),
                "level" => {
                    config.level = value
                        .parse()
                        .map_err(|err| BuildError::InvalidConfig(format!("level: {err}")))?;
                }
                "flush_timeout_ms" => {
                    config.flush_timeout = Duration::from_millis(parse_field(key, value)?);
                }
                "warn_interval_ms" => {
                    config.warn_interval = Duration::from_millis(parse_field(key, value)?);
                }
                other => {
                    return Err(BuildError::InvalidConfig(format!(
                        "unknown key {other:?} in [{INI_SECTION}]"
                    )));
                }
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Load settings from an INI file.
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let text = fs::read_to_string(path)?;
        Self::from_ini_str(&text)
    }
}

fn parse_field<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, BuildError> {
    value
        .parse()
        .map_err(|_| BuildError::InvalidConfig(format!("{key} has invalid value {value:?}")))
}
