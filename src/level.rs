//! Viewer severity levels and their textual forms.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity understood by the viewer. Lower values are more severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ViewerLevel {
    Error = 0,
    Warning = 1,
    Important = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
    Noise = 6,
}

impl Default for ViewerLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl ViewerLevel {
    /// Value carried by the Level part.
    pub const fn code(self) -> i64 {
        self as i64
    }

    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Error),
            1 => Some(Self::Warning),
            2 => Some(Self::Important),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Verbose),
            6 => Some(Self::Noise),
            _ => None,
        }
    }
}

impl fmt::Display for ViewerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewerLevel::Error => "ERROR",
            ViewerLevel::Warning => "WARNING",
            ViewerLevel::Important => "IMPORTANT",
            ViewerLevel::Info => "INFO",
            ViewerLevel::Debug => "DEBUG",
            ViewerLevel::Verbose => "VERBOSE",
            ViewerLevel::Noise => "NOISE",
        };
        f.write_str(s)
    }
}

/// Returned when a level name or number is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown viewer level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for ViewerLevel {
    type Err = ParseLevelError;

    /// Accepts level names in any case, `WARN` as an alias, or the numeric
    /// wire value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code).ok_or_else(|| ParseLevelError(s.to_owned()));
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Self::Error),
            "WARN" | "WARNING" => Ok(Self::Warning),
            "IMPORTANT" => Ok(Self::Important),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            "VERBOSE" => Ok(Self::Verbose),
            "NOISE" => Ok(Self::Noise),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}
