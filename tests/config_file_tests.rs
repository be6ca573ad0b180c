//! Loading viewer settings from INI files.

use std::{io::Write, time::Duration};

use femtoviewer::{BuildError, ViewerConfig, ViewerLevel, ViewerLoggerBuilder};
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

#[fixture]
fn ini_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(
        file,
        "; viewer settings\n[viewer]\nhost = 192.0.2.10\nport = 50011\ntag = FromFile\nlevel = warning\nflush_timeout_ms = 300"
    )
    .expect("write ini");
    file
}

#[rstest]
fn loads_config_from_file(ini_file: NamedTempFile) {
    let config = ViewerConfig::from_ini_file(ini_file.path()).expect("load config");
    assert_eq!(config.host, "192.0.2.10");
    assert_eq!(config.port, 50011);
    assert_eq!(config.tag, "FromFile");
    assert_eq!(config.level, ViewerLevel::Warning);
    assert_eq!(config.flush_timeout, Duration::from_millis(300));
}

#[rstest]
fn builder_overrides_file_values(ini_file: NamedTempFile) {
    let config = ViewerLoggerBuilder::from_ini_file(ini_file.path())
        .expect("load config")
        .with_tag("Override")
        .build_config()
        .expect("valid config");
    assert_eq!(config.tag, "Override");
    assert_eq!(config.port, 50011);
}

#[rstest]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ViewerConfig::from_ini_file(dir.path().join("absent.ini"))
        .expect_err("missing file must fail");
    assert!(matches!(err, BuildError::Io(_)));
}

#[rstest]
fn malformed_ini_is_reported() {
    let err = ViewerConfig::from_ini_str("[viewer\nport = 1").expect_err("malformed ini");
    assert!(matches!(err, BuildError::Ini(_)));
}
