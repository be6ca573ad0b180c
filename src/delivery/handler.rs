//! Public logger type exported by the crate.

use std::{sync::Arc, thread, time::Duration};

use crossbeam_channel::Sender;
use log::warn;
use parking_lot::Mutex;

use crate::{
    clock::{Clock, SystemClock},
    codec::{EncodingError, LogMessage, MessageType, PartValue},
    config::ViewerConfig,
    identity::{IdentityProvider, SystemIdentity},
    level::ViewerLevel,
    rate_limited_warner::RateLimitedWarner,
};

use super::{
    state::Packet,
    transport::Connector,
    worker::{DeliveryCommand, WorkerParts, spawn_worker},
};

/// Streams log messages to a remote viewer.
///
/// Every call encodes its message on the caller's thread and hands the packet
/// to a background worker, so logging never blocks on the network and never
/// reports delivery errors. The worker connects lazily on the first packet,
/// announces the client identity after each connection, and delivers packets
/// one at a time in call order.
pub struct FemtoViewerLogger {
    tx: Option<Sender<DeliveryCommand>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    /// Next sequence number; held while a numbered packet is queued so wire
    /// order matches sequence order across threads.
    sequence: Mutex<i32>,
    clock: Arc<dyn Clock>,
    tag: String,
    level: ViewerLevel,
    warner: RateLimitedWarner,
    flush_timeout: Duration,
}

impl FemtoViewerLogger {
    /// Logger for `host:port` with default settings.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_config(ViewerConfig::default().with_endpoint(host, port))
    }

    /// Logger using TCP, the host identity and the system clock.
    pub fn with_config(config: ViewerConfig) -> Self {
        let connector = config.connector();
        Self::with_parts(config, connector, SystemIdentity, Arc::new(SystemClock))
    }

    /// Logger with an explicit transport, identity source and clock.
    pub fn with_parts<C, I>(
        config: ViewerConfig,
        connector: C,
        identity: I,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        C: Connector,
        I: IdentityProvider + 'static,
    {
        let (tx, handle) = spawn_worker(WorkerParts {
            connector,
            identity: Box::new(identity),
            clock: Arc::clone(&clock),
            warn_interval: config.warn_interval,
        });
        Self {
            tx: Some(tx),
            handle: Mutex::new(Some(handle)),
            sequence: Mutex::new(0),
            clock,
            tag: config.tag,
            level: config.level,
            warner: RateLimitedWarner::new(config.warn_interval),
            flush_timeout: config.flush_timeout,
        }
    }

    /// Log a UTF-8 message.
    pub fn log_text(&self, text: &str) {
        self.log_entry(PartValue::from(text));
    }

    /// Log a binary blob.
    pub fn log_binary(&self, data: &[u8]) {
        self.log_entry(PartValue::from(data));
    }

    /// Send a caller-built message as is.
    ///
    /// Only packing errors are reported; delivery failures are absorbed like
    /// any other packet.
    pub fn log_message(&self, message: &LogMessage) -> Result<(), EncodingError> {
        let packet = message.pack()?;
        self.enqueue(packet);
        Ok(())
    }

    /// Insert a named mark into the viewer's log flow.
    pub fn mark(&self, label: &str) {
        self.log_control(MessageType::Mark, Some(label));
    }

    /// Open a block grouping the following entries.
    pub fn block_start(&self, label: &str) {
        self.log_control(MessageType::BlockStart, Some(label));
    }

    /// Close the most recently opened block.
    pub fn block_end(&self) {
        self.log_control(MessageType::BlockEnd, None);
    }

    /// Sequence number the next message will carry.
    pub fn next_sequence(&self) -> i32 {
        *self.sequence.lock()
    }

    /// Wait until the worker has handled every earlier packet.
    ///
    /// Returns `true` when the worker acknowledged within the flush timeout and
    /// nothing is left queued for a future connection.
    pub fn flush(&self) -> bool {
        let Some(tx) = self.tx.as_ref() else {
            return false;
        };
        self.warner.flush(|count| {
            warn!("FemtoViewerLogger dropped {count} packets after close");
        });
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if tx.send(DeliveryCommand::Flush(ack_tx)).is_err() {
            return false;
        }
        ack_rx.recv_timeout(self.flush_timeout).unwrap_or(false)
    }

    /// Stop the worker and wait for it to exit. Packets still waiting for a
    /// connection are discarded.
    pub fn close(&mut self) {
        if self.request_shutdown() {
            self.join_worker();
        } else {
            // The worker is stuck in a write; let it finish on its own.
            warn!(
                "FemtoViewerLogger: worker did not stop within {:?}; detaching",
                self.flush_timeout
            );
            self.handle.lock().take();
        }
    }

    fn log_entry(&self, payload: PartValue) {
        self.send_numbered(|sequence| {
            let now = self.clock.now_millis();
            LogMessage::log_entry(now, &self.tag, sequence, self.level, payload)
        });
    }

    fn log_control(&self, kind: MessageType, label: Option<&str>) {
        self.send_numbered(|sequence| {
            LogMessage::control(self.clock.now_millis(), kind, sequence, label)
        });
    }

    /// Assign the next sequence number and queue the packet under one lock.
    fn send_numbered<F>(&self, build: F)
    where
        F: FnOnce(i32) -> Result<LogMessage, EncodingError>,
    {
        let mut next = self.sequence.lock();
        let sequence = *next;
        *next = sequence.wrapping_add(1);
        match build(sequence).and_then(|message| message.pack()) {
            Ok(packet) => self.enqueue(packet),
            Err(err) => warn!("FemtoViewerLogger dropped message {sequence}: {err}"),
        }
    }

    fn enqueue(&self, packet: Packet) {
        let delivered = self
            .tx
            .as_ref()
            .is_some_and(|tx| tx.send(DeliveryCommand::Packet(packet)).is_ok());
        if !delivered {
            self.warner.record_drop();
            self.warner.warn_if_due(|count| {
                warn!("FemtoViewerLogger dropped {count} packets after close");
            });
        }
    }

    /// Returns `false` when the worker failed to acknowledge in time.
    fn request_shutdown(&mut self) -> bool {
        let Some(tx) = self.tx.take() else {
            return true;
        };
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if tx.send(DeliveryCommand::Shutdown(ack_tx)).is_err() {
            return true;
        }
        ack_rx.recv_timeout(self.flush_timeout).is_ok()
    }

    fn join_worker(&mut self) {
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("FemtoViewerLogger: worker thread panicked");
        }
    }
}

impl Drop for FemtoViewerLogger {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for FemtoViewerLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FemtoViewerLogger")
            .field("tag", &self.tag)
            .field("level", &self.level)
            .field("next_sequence", &self.next_sequence())
            .field("flush_timeout", &self.flush_timeout)
            .finish()
    }
}
