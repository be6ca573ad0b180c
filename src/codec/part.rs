//! Typed message parts and their wire encoding.
//!
//! A part is laid out as `key:u8 type:u8 payload`. String and binary payloads
//! carry a 32-bit length prefix; integer payloads are fixed width. All
//! multi-byte values are big-endian.

use std::fmt;

use super::byte_order::{put_u16, put_u32, put_u64};
use super::error::EncodingError;

/// Bytes taken by the key and type fields.
pub const PART_HEADER_LEN: usize = 2;
/// Bytes taken by the length prefix of string and binary payloads.
pub const BLOB_LENGTH_LEN: usize = 4;

/// Key identifying the meaning of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKey {
    MessageType,
    TimestampSeconds,
    /// Millisecond remainder; mutually exclusive with `TimestampMicros`.
    TimestampMillis,
    /// Microsecond remainder; mutually exclusive with `TimestampMillis`.
    TimestampMicros,
    ThreadId,
    Tag,
    Level,
    Message,
    ImageWidth,
    ImageHeight,
    /// Order in which the client generated the message.
    MessageSeq,
    Filename,
    LineNumber,
    FunctionName,
    ClientName,
    ClientVersion,
    OsName,
    OsVersion,
    ClientModel,
    UniqueId,
    UserDefined(UserKey),
}

/// A key from the user-defined range (`>= 100`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserKey(u8);

impl UserKey {
    /// First key code available for application-defined parts.
    pub const FIRST: u8 = 100;

    /// Wrap `code` if it lies in the user-defined range.
    pub const fn new(code: u8) -> Option<Self> {
        if code >= Self::FIRST {
            Some(Self(code))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl PartKey {
    /// Convenience constructor for a user-defined key.
    pub const fn user(code: u8) -> Option<Self> {
        match UserKey::new(code) {
            Some(key) => Some(Self::UserDefined(key)),
            None => None,
        }
    }

    /// Wire value of the key.
    pub const fn code(self) -> u8 {
        match self {
            Self::MessageType => 0,
            Self::TimestampSeconds => 1,
            Self::TimestampMillis => 2,
            Self::TimestampMicros => 3,
            Self::ThreadId => 4,
            Self::Tag => 5,
            Self::Level => 6,
            Self::Message => 7,
            Self::ImageWidth => 8,
            Self::ImageHeight => 9,
            Self::MessageSeq => 10,
            Self::Filename => 11,
            Self::LineNumber => 12,
            Self::FunctionName => 13,
            Self::ClientName => 20,
            Self::ClientVersion => 21,
            Self::OsName => 22,
            Self::OsVersion => 23,
            Self::ClientModel => 24,
            Self::UniqueId => 25,
            Self::UserDefined(key) => key.get(),
        }
    }

    /// Parse a wire value. Returns `None` for unassigned codes below 100.
    pub const fn from_code(code: u8) -> Option<Self> {
        let key = match code {
            0 => Self::MessageType,
            1 => Self::TimestampSeconds,
            2 => Self::TimestampMillis,
            3 => Self::TimestampMicros,
            4 => Self::ThreadId,
            5 => Self::Tag,
            6 => Self::Level,
            7 => Self::Message,
            8 => Self::ImageWidth,
            9 => Self::ImageHeight,
            10 => Self::MessageSeq,
            11 => Self::Filename,
            12 => Self::LineNumber,
            13 => Self::FunctionName,
            20 => Self::ClientName,
            21 => Self::ClientVersion,
            22 => Self::OsName,
            23 => Self::OsVersion,
            24 => Self::ClientModel,
            25 => Self::UniqueId,
            _ => return Self::user(code),
        };
        Some(key)
    }
}

/// Wire type of a part's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PartType {
    String = 0,
    Binary = 1,
    Int16 = 2,
    Int32 = 3,
    Int64 = 4,
    /// PNG image data. Reserved; neither encoded nor decoded.
    Image = 5,
}

impl PartType {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::String),
            1 => Some(Self::Binary),
            2 => Some(Self::Int16),
            3 => Some(Self::Int32),
            4 => Some(Self::Int64),
            5 => Some(Self::Image),
            _ => None,
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartType::String => "String",
            PartType::Binary => "Binary",
            PartType::Int16 => "Int16",
            PartType::Int32 => "Int32",
            PartType::Int64 => "Int64",
            PartType::Image => "Image",
        };
        f.write_str(name)
    }
}

/// Payload of a part. Each variant maps to exactly one [`PartType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartValue {
    String(String),
    Binary(Vec<u8>),
    Int16(i16),
    Int32(i32),
    Int64(i64),
}

impl PartValue {
    /// The wire type this value encodes as.
    pub const fn part_type(&self) -> PartType {
        match self {
            PartValue::String(_) => PartType::String,
            PartValue::Binary(_) => PartType::Binary,
            PartValue::Int16(_) => PartType::Int16,
            PartValue::Int32(_) => PartType::Int32,
            PartValue::Int64(_) => PartType::Int64,
        }
    }

    /// Number of payload bytes, including any length prefix.
    pub fn payload_len(&self) -> usize {
        match self {
            PartValue::String(text) => BLOB_LENGTH_LEN + text.len(),
            PartValue::Binary(data) => BLOB_LENGTH_LEN + data.len(),
            PartValue::Int16(_) => 2,
            PartValue::Int32(_) => 4,
            PartValue::Int64(_) => 8,
        }
    }

    /// Parse a hexadecimal literal such as `"0x0102030405060708"` into an
    /// Int64 value.
    ///
    /// The literal is read as a 64-bit pattern, so `"0xffffffffffffffff"`
    /// yields `-1` exactly as `PartValue::Int64(-1)` would. A leading `-`
    /// negates the parsed value and the `0x` prefix is optional.
    pub fn int64_from_hex(literal: &str) -> Result<Self, EncodingError> {
        let invalid = || EncodingError::InvalidHex(literal.to_owned());
        let trimmed = literal.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits = unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned);
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Err(invalid());
        }
        let bits = u64::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let value = bits as i64;
        Ok(PartValue::Int64(if negative {
            value.wrapping_neg()
        } else {
            value
        }))
    }
}

impl From<&str> for PartValue {
    fn from(value: &str) -> Self {
        PartValue::String(value.to_owned())
    }
}

impl From<String> for PartValue {
    fn from(value: String) -> Self {
        PartValue::String(value)
    }
}

impl From<&[u8]> for PartValue {
    fn from(value: &[u8]) -> Self {
        PartValue::Binary(value.to_vec())
    }
}

impl From<Vec<u8>> for PartValue {
    fn from(value: Vec<u8>) -> Self {
        PartValue::Binary(value)
    }
}

impl From<i16> for PartValue {
    fn from(value: i16) -> Self {
        PartValue::Int16(value)
    }
}

impl From<i32> for PartValue {
    fn from(value: i32) -> Self {
        PartValue::Int32(value)
    }
}

impl From<i64> for PartValue {
    fn from(value: i64) -> Self {
        PartValue::Int64(value)
    }
}

/// One encoded `(key, type, value)` triple.
///
/// The wire bytes are produced once at construction and never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogPart {
    key: PartKey,
    value: PartValue,
    bytes: Vec<u8>,
}

impl LogPart {
    /// Build a part from an explicitly declared type.
    ///
    /// Fails when `value` does not match `part_type`, or when `part_type` is
    /// [`PartType::Image`].
    pub fn new(
        key: PartKey,
        part_type: PartType,
        value: PartValue,
    ) -> Result<Self, EncodingError> {
        if part_type == PartType::Image {
            return Err(EncodingError::UnsupportedType(PartType::Image));
        }
        let found = value.part_type();
        if found != part_type {
            return Err(EncodingError::TypeMismatch {
                expected: part_type,
                found,
            });
        }
        Self::from_value(key, value)
    }

    /// Build a part whose type follows the value variant.
    pub fn from_value(key: PartKey, value: PartValue) -> Result<Self, EncodingError> {
        let bytes = match &value {
            PartValue::String(text) => encode_blob(key, &value, text.as_bytes())?,
            PartValue::Binary(data) => encode_blob(key, &value, data)?,
            PartValue::Int16(v) => return Ok(Self::int16(key, *v)),
            PartValue::Int32(v) => return Ok(Self::int32(key, *v)),
            PartValue::Int64(v) => return Ok(Self::int64(key, *v)),
        };
        Ok(Self { key, value, bytes })
    }

    /// UTF-8 string part. The length field counts bytes, not characters.
    pub fn string(key: PartKey, text: impl Into<String>) -> Result<Self, EncodingError> {
        Self::from_value(key, PartValue::String(text.into()))
    }

    pub fn binary(key: PartKey, data: impl Into<Vec<u8>>) -> Result<Self, EncodingError> {
        Self::from_value(key, PartValue::Binary(data.into()))
    }

    pub fn int16(key: PartKey, value: i16) -> Self {
        let value_bits = value as u16;
        let value = PartValue::Int16(value);
        let mut bytes = header(key, &value);
        put_u16(&mut bytes, value_bits);
        Self { key, value, bytes }
    }

    pub fn int32(key: PartKey, value: i32) -> Self {
        let value_bits = value as u32;
        let value = PartValue::Int32(value);
        let mut bytes = header(key, &value);
        put_u32(&mut bytes, value_bits);
        Self { key, value, bytes }
    }

    pub fn int64(key: PartKey, value: i64) -> Self {
        let value_bits = value as u64;
        let value = PartValue::Int64(value);
        let mut bytes = header(key, &value);
        put_u64(&mut bytes, value_bits);
        Self { key, value, bytes }
    }

    /// Int64 part from a hexadecimal literal; see [`PartValue::int64_from_hex`].
    pub fn int64_hex(key: PartKey, literal: &str) -> Result<Self, EncodingError> {
        Self::from_value(key, PartValue::int64_from_hex(literal)?)
    }

    pub fn key(&self) -> PartKey {
        self.key
    }

    pub fn part_type(&self) -> PartType {
        self.value.part_type()
    }

    pub fn value(&self) -> &PartValue {
        &self.value
    }

    /// Total wire size: header plus payload.
    pub fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    /// The encoded wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn header(key: PartKey, value: &PartValue) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(PART_HEADER_LEN + value.payload_len());
    bytes.push(key.code());
    bytes.push(value.part_type().code());
    bytes
}

fn encode_blob(key: PartKey, value: &PartValue, payload: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| EncodingError::PayloadTooLarge(payload.len()))?;
    let mut bytes = header(key, value);
    put_u32(&mut bytes, len);
    bytes.extend_from_slice(payload);
    Ok(bytes)
}
