//! Worker thread driving viewer I/O.
//!
//! The worker is the only owner of the connection and the pending queue. It
//! receives packets over an unbounded channel, feeds them to
//! [`DeliveryState`], and performs the resulting actions in a loop until the
//! state machine has nothing further to do.

use std::{sync::Arc, thread, time::Duration};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    clock::Clock,
    identity::{IdentityProvider, identity_message},
    rate_limited_warner::RateLimitedWarner,
};

use super::{
    state::{Action, DeliveryState, Packet},
    transport::{Connection, Connector},
};

/// Failures absorbed by the worker. They are logged, never returned to the
/// code that produced the packet.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write to {endpoint} failed: {source}")]
    Write {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}

/// Commands processed by the worker thread.
#[derive(Debug)]
pub enum DeliveryCommand {
    Packet(Packet),
    /// Acknowledge once earlier commands are handled. The flag reports
    /// whether nothing is left queued.
    Flush(Sender<bool>),
    Shutdown(Sender<()>),
}

/// Everything the worker needs besides its command channel.
pub struct WorkerParts<C: Connector> {
    pub connector: C,
    pub identity: Box<dyn IdentityProvider>,
    pub clock: Arc<dyn Clock>,
    pub warn_interval: Duration,
}

pub fn spawn_worker<C: Connector>(
    parts: WorkerParts<C>,
) -> (Sender<DeliveryCommand>, thread::JoinHandle<()>) {
    let (tx, rx) = unbounded();
    let handle = thread::spawn(move || DeliveryWorker::new(parts).run(rx));
    (tx, handle)
}

struct DeliveryWorker<C: Connector> {
    connector: C,
    connection: Option<C::Connection>,
    state: DeliveryState,
    identity: Box<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    warner: RateLimitedWarner,
}

impl<C: Connector> DeliveryWorker<C> {
    fn new(parts: WorkerParts<C>) -> Self {
        Self {
            connector: parts.connector,
            connection: None,
            state: DeliveryState::new(),
            identity: parts.identity,
            clock: parts.clock,
            warner: RateLimitedWarner::new(parts.warn_interval),
        }
    }

    fn run(mut self, rx: Receiver<DeliveryCommand>) {
        while let Ok(cmd) = rx.recv() {
            match cmd {
                DeliveryCommand::Packet(packet) => {
                    let next = self.state.dispatch(packet);
                    self.drive(next);
                }
                DeliveryCommand::Flush(ack) => {
                    let _ = ack.send(self.state.pending_len() == 0);
                }
                DeliveryCommand::Shutdown(ack) => {
                    self.discard_pending();
                    let _ = ack.send(());
                    return;
                }
            }
        }
        self.discard_pending();
    }

    /// Perform actions until the state machine goes quiet.
    fn drive(&mut self, mut next: Option<Action>) {
        while let Some(action) = next.take() {
            next = match action {
                Action::Connect => self.connect(),
                Action::Write(packet) => self.write(&packet),
            };
        }
    }

    fn connect(&mut self) -> Option<Action> {
        let endpoint = self.connector.endpoint();
        info!("FemtoViewerLogger connecting to {endpoint}");
        match self.connector.connect() {
            Ok(connection) => {
                info!("FemtoViewerLogger connected to {endpoint}");
                self.connection = Some(connection);
                let now = self.clock.now_millis();
                let identity = match identity_message(self.identity.as_ref(), now)
                    .and_then(|message| message.pack())
                {
                    Ok(packet) => Some(packet),
                    Err(err) => {
                        warn!("FemtoViewerLogger could not encode client info: {err}");
                        None
                    }
                };
                self.state.connect_succeeded(identity)
            }
            Err(source) => {
                self.connection = None;
                self.state.connect_failed();
                let err = DeliveryError::Connect { endpoint, source };
                warn!(
                    "FemtoViewerLogger {err}; {} packets queued",
                    self.state.pending_len()
                );
                None
            }
        }
    }

    fn write(&mut self, packet: &[u8]) -> Option<Action> {
        let result = match self.connection.as_mut() {
            Some(connection) => connection.write_packet(packet),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "no active connection",
            )),
        };
        match result {
            Ok(()) => {
                debug!("FemtoViewerLogger sent {} bytes", packet.len());
                self.state.write_succeeded()
            }
            Err(source) => {
                self.connection = None;
                self.state.write_failed();
                let err = DeliveryError::Write {
                    endpoint: self.connector.endpoint(),
                    source,
                };
                warn!("FemtoViewerLogger {err}");
                self.warner.record_drop();
                self.warner.warn_if_due(|count| {
                    warn!("FemtoViewerLogger dropped {count} packets due to write errors");
                });
                None
            }
        }
    }

    fn discard_pending(&mut self) {
        let dropped = self.state.discard_pending();
        if dropped > 0 {
            warn!("FemtoViewerLogger discarded {dropped} undelivered packets on shutdown");
        }
        self.warner.flush(|count| {
            warn!("FemtoViewerLogger dropped {count} packets due to write errors");
        });
    }
}
