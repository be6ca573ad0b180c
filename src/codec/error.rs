//! Errors raised while encoding or decoding viewer messages.

use thiserror::Error;

use super::part::PartType;

/// Errors that may occur while building a message.
///
/// These are caller errors: the values handed to the encoder cannot be
/// represented on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The value variant does not match the declared part type.
    #[error("part declared as {expected} but value is {found}")]
    TypeMismatch { expected: PartType, found: PartType },
    /// The part type is reserved by the protocol but has no encoder.
    #[error("part type {0} is not supported")]
    UnsupportedType(PartType),
    /// An Int64 literal could not be parsed as hexadecimal.
    #[error("invalid Int64 hex literal: {0:?}")]
    InvalidHex(String),
    /// A string or binary payload is longer than the 32-bit length field.
    #[error("payload of {0} bytes exceeds the 32-bit length field")]
    PayloadTooLarge(usize),
    /// The message holds more parts than the 16-bit count field allows.
    #[error("message holds {0} parts; at most 65535 fit the count field")]
    TooManyParts(usize),
    /// The message body is longer than the 32-bit length prefix.
    #[error("message body of {0} bytes exceeds the 32-bit length prefix")]
    MessageTooLarge(usize),
}

/// Errors that may occur while parsing a packed message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended before the declared structure was complete.
    #[error("truncated message: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    /// The parts did not consume exactly the declared length.
    #[error("declared length {declared} but parts used {consumed} bytes")]
    LengthMismatch { declared: usize, consumed: usize },
    /// A key byte outside the protocol's key table.
    #[error("unknown part key {0}")]
    UnknownKey(u8),
    /// A type byte outside the protocol's type table.
    #[error("unknown part type {0}")]
    UnknownType(u8),
    /// A reserved type with no decoder.
    #[error("part type {0} is not supported")]
    UnsupportedType(PartType),
    /// A string part that is not valid UTF-8.
    #[error("string part is not valid UTF-8")]
    InvalidUtf8,
    /// A decoded value could not be re-encoded as a part.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
