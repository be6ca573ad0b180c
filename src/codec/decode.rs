//! Parsing of packed messages back into parts.

use super::byte_order::{get_u16, get_u32, get_u64};
use super::error::DecodeError;
use super::message::{LENGTH_PREFIX_LEN, PART_COUNT_LEN};
use super::part::{LogPart, PartKey, PartType, PartValue};

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.buf.len() - self.pos;
        if len > available {
            return Err(DecodeError::Truncated {
                needed: len,
                available,
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.array::<1>()?[0])
    }
}

/// Length of the message at the front of `buf`, if its prefix is complete.
///
/// Returns the full size including the 4-byte prefix.
pub fn frame_len(buf: &[u8]) -> Option<usize> {
    let prefix: [u8; LENGTH_PREFIX_LEN] = buf.get(..LENGTH_PREFIX_LEN)?.try_into().ok()?;
    let total = usize::try_from(get_u32(prefix)).ok()?;
    total.checked_add(LENGTH_PREFIX_LEN)
}

/// Decode the message at the front of `buf`.
///
/// Returns the parts in wire order and the number of bytes consumed, so
/// several messages read from one stream can be split apart.
pub fn decode_message(buf: &[u8]) -> Result<(Vec<LogPart>, usize), DecodeError> {
    let mut outer = Cursor::new(buf);
    let total = get_u32(outer.array()?) as usize;
    let body = outer.take(total)?;
    if total < PART_COUNT_LEN {
        return Err(DecodeError::LengthMismatch {
            declared: total,
            consumed: PART_COUNT_LEN,
        });
    }

    let mut cursor = Cursor::new(body);
    let count = get_u16(cursor.array()?);
    let mut parts = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        parts.push(decode_part(&mut cursor)?);
    }
    if cursor.pos != body.len() {
        return Err(DecodeError::LengthMismatch {
            declared: total,
            consumed: cursor.pos,
        });
    }
    Ok((parts, LENGTH_PREFIX_LEN + total))
}

fn decode_part(cursor: &mut Cursor<'_>) -> Result<LogPart, DecodeError> {
    let key_code = cursor.u8()?;
    let key = PartKey::from_code(key_code).ok_or(DecodeError::UnknownKey(key_code))?;
    let type_code = cursor.u8()?;
    let part_type = PartType::from_code(type_code).ok_or(DecodeError::UnknownType(type_code))?;
    let value = match part_type {
        PartType::String => {
            let bytes = blob(cursor)?;
            let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
            PartValue::String(text.to_owned())
        }
        PartType::Binary => PartValue::Binary(blob(cursor)?.to_vec()),
        PartType::Int16 => PartValue::Int16(get_u16(cursor.array()?) as i16),
        PartType::Int32 => PartValue::Int32(get_u32(cursor.array()?) as i32),
        PartType::Int64 => PartValue::Int64(get_u64(cursor.array()?) as i64),
        PartType::Image => return Err(DecodeError::UnsupportedType(PartType::Image)),
    };
    Ok(LogPart::from_value(key, value)?)
}

fn blob<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], DecodeError> {
    let len = get_u32(cursor.array()?) as usize;
    cursor.take(len)
}
