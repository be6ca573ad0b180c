//! Ordered, single-flight delivery of packets to the viewer.
//!
//! [`FemtoViewerLogger`] encodes messages on the caller's thread and forwards
//! the packets to a consumer thread. That thread owns the connection and the
//! pending queue, driving the [`DeliveryState`] machine: it connects lazily,
//! sends the client identity first after every connection, drains queued
//! packets one write at a time, and drops the in-flight packet when a write
//! fails.

mod handler;
mod state;
mod transport;
mod worker;


pub use handler::FemtoViewerLogger;
pub use state::{Action, ConnectionState, DeliveryState, Packet};
pub use transport::{Connection, Connector, TcpConnector};
pub use worker::DeliveryError;
