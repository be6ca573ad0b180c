//! Message aggregation and packing.
//!
//! A packed message is `totalLength:u32 partCount:u16 Part*`, where
//! `totalLength` covers the part count and the parts but not itself.

use crate::level::ViewerLevel;

use super::byte_order::{put_u16, put_u32};
use super::error::EncodingError;
use super::part::{LogPart, PartKey, PartValue};

/// Bytes taken by the leading `totalLength` field.
pub const LENGTH_PREFIX_LEN: usize = 4;
/// Bytes taken by the `partCount` field.
pub const PART_COUNT_LEN: usize = 2;

/// Value of the MessageType part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MessageType {
    Log = 0,
    BlockStart = 1,
    BlockEnd = 2,
    ClientInfo = 3,
    /// Synthesised by the viewer when a client goes away.
    Disconnect = 4,
    Mark = 5,
}

impl MessageType {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Log),
            1 => Some(Self::BlockStart),
            2 => Some(Self::BlockEnd),
            3 => Some(Self::ClientInfo),
            4 => Some(Self::Disconnect),
            5 => Some(Self::Mark),
            _ => None,
        }
    }

    fn part(self) -> LogPart {
        LogPart::int32(PartKey::MessageType, self.code())
    }
}

/// Ordered, append-only collection of parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogMessage {
    parts: Vec<LogPart>,
    parts_len: usize,
}

impl LogMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part. Parts are never reordered or deduplicated.
    pub fn add_part(&mut self, part: LogPart) -> &mut Self {
        self.parts_len += part.encoded_len();
        self.parts.push(part);
        self
    }

    /// Append the seconds and millisecond-remainder parts for a Unix
    /// timestamp given in milliseconds.
    pub fn add_timestamp_parts(&mut self, now_millis: u64) -> &mut Self {
        let seconds = (now_millis / 1000) as i64;
        let millis = (now_millis % 1000) as i64;
        self.add_part(LogPart::int64(PartKey::TimestampSeconds, seconds));
        self.add_part(LogPart::int64(PartKey::TimestampMillis, millis))
    }

    pub fn parts(&self) -> &[LogPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Value of the `totalLength` field: the part count plus every part.
    pub fn total_length(&self) -> usize {
        PART_COUNT_LEN + self.parts_len
    }

    /// Serialise the message. The result is `4 + total_length()` bytes long.
    pub fn pack(&self) -> Result<Vec<u8>, EncodingError> {
        let count = u16::try_from(self.parts.len())
            .map_err(|_| EncodingError::TooManyParts(self.parts.len()))?;
        let total = self.total_length();
        let total_field =
            u32::try_from(total).map_err(|_| EncodingError::MessageTooLarge(total))?;
        let mut buf = Vec::with_capacity(LENGTH_PREFIX_LEN + total);
        put_u32(&mut buf, total_field);
        put_u16(&mut buf, count);
        for part in &self.parts {
            buf.extend_from_slice(part.as_bytes());
        }
        Ok(buf)
    }

    /// Standard log entry: timestamp, type, tag, sequence, level and payload.
    pub fn log_entry(
        now_millis: u64,
        tag: &str,
        sequence: i32,
        level: ViewerLevel,
        payload: PartValue,
    ) -> Result<Self, EncodingError> {
        let mut message = Self::new();
        message
            .add_timestamp_parts(now_millis)
            .add_part(MessageType::Log.part())
            .add_part(LogPart::string(PartKey::Tag, tag)?)
            .add_part(LogPart::int32(PartKey::MessageSeq, sequence))
            .add_part(LogPart::int64(PartKey::Level, level.code()))
            .add_part(LogPart::from_value(PartKey::Message, payload)?);
        Ok(message)
    }

    /// Mark, block start or block end message with an optional label.
    pub fn control(
        now_millis: u64,
        kind: MessageType,
        sequence: i32,
        label: Option<&str>,
    ) -> Result<Self, EncodingError> {
        let mut message = Self::new();
        message
            .add_timestamp_parts(now_millis)
            .add_part(kind.part())
            .add_part(LogPart::int32(PartKey::MessageSeq, sequence));
        if let Some(label) = label {
            message.add_part(LogPart::string(PartKey::Message, label)?);
        }
        Ok(message)
    }

    /// Client-info message announcing who is connecting.
    pub fn client_info(
        now_millis: u64,
        client_version: &str,
        client_name: &str,
        os_name: &str,
    ) -> Result<Self, EncodingError> {
        let mut message = Self::new();
        message
            .add_timestamp_parts(now_millis)
            .add_part(MessageType::ClientInfo.part())
            .add_part(LogPart::string(PartKey::ClientVersion, client_version)?)
            .add_part(LogPart::string(PartKey::ClientName, client_name)?)
            .add_part(LogPart::string(PartKey::OsName, os_name)?);
        Ok(message)
    }
}
