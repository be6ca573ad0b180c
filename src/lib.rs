//! Stream structured log messages to a remote log viewer.
//!
//! Messages are encoded in the viewer's tagged-binary format (see [`codec`])
//! and delivered over a persistent TCP connection by [`FemtoViewerLogger`],
//! which never blocks the caller on network state.
//!
//! ```no_run
//! use femtoviewer::FemtoViewerLogger;
//!
//! let logger = FemtoViewerLogger::new("127.0.0.1", 50010);
//! logger.log_text("hello viewer");
//! logger.log_binary(&[0xde, 0xad, 0xbe, 0xef]);
//! logger.flush();
//! ```

pub mod builder;
pub mod clock;
pub mod codec;
pub mod config;
pub mod delivery;
pub mod identity;
pub mod level;
pub mod rate_limited_warner;

pub use builder::{BuildError, ViewerLoggerBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{
    DecodeError, EncodingError, LogMessage, LogPart, MessageType, PartKey, PartType, PartValue,
    decode_message,
};
pub use config::ViewerConfig;
pub use delivery::{
    Connection, ConnectionState, Connector, DeliveryError, FemtoViewerLogger, TcpConnector,
};
pub use identity::{IdentityProvider, StaticIdentity, SystemIdentity};
pub use level::ViewerLevel;
