//! Tagged-binary wire format understood by the remote log viewer.
//!
//! A message is a big-endian length prefix, a part count, and a sequence of
//! typed parts. [`LogPart`] encodes a single `(key, type, value)` triple,
//! [`LogMessage`] aggregates parts and packs them, and [`decode_message`]
//! reverses the process for tests and receiving peers.

pub mod byte_order;
mod decode;
mod error;
mod message;
mod part;

pub use decode::{decode_message, frame_len};
pub use error::{DecodeError, EncodingError};
pub use message::{LENGTH_PREFIX_LEN, LogMessage, MessageType, PART_COUNT_LEN};
pub use part::{LogPart, PartKey, PartType, PartValue, UserKey};
