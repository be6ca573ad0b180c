//! Connection state machine for packet delivery.
//!
//! `DeliveryState` performs no I/O. Callers feed it events (a packet to send,
//! a connect or write outcome) and carry out the [`Action`] it returns. At
//! most one write is outstanding at any time and packets leave in the order
//! they were dispatched, except that the identity packet always goes first
//! after a connection is established.

use std::collections::VecDeque;

/// An encoded message ready for the transport.
pub type Packet = Vec<u8>;

/// Connection lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Work the driver must perform next.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Open a connection and report the outcome.
    Connect,
    /// Write the packet and report the outcome.
    Write(Packet),
}

#[derive(Debug)]
pub struct DeliveryState {
    state: ConnectionState,
    pending: VecDeque<Packet>,
    send_done: bool,
}

impl Default for DeliveryState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryState {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            pending: VecDeque::new(),
            send_done: true,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Packets waiting for a connection or for the in-flight write.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True when no write is outstanding.
    pub fn is_idle(&self) -> bool {
        self.send_done
    }

    /// Offer a packet for delivery.
    ///
    /// Without a connection the packet is queued and, unless an attempt is
    /// already under way, a connect is requested.
    pub fn dispatch(&mut self, packet: Packet) -> Option<Action> {
        match self.state {
            ConnectionState::Disconnected => {
                self.pending.push_back(packet);
                self.state = ConnectionState::Connecting;
                Some(Action::Connect)
            }
            ConnectionState::Connecting => {
                self.pending.push_back(packet);
                None
            }
            ConnectionState::Connected => self.send(packet),
        }
    }

    /// The connection is up. `identity` is written before anything queued;
    /// without one, draining starts immediately.
    pub fn connect_succeeded(&mut self, identity: Option<Packet>) -> Option<Action> {
        self.state = ConnectionState::Connected;
        match identity {
            Some(packet) => self.send(packet),
            None => self.next_pending(),
        }
    }

    /// The attempt failed. Queued packets stay until a later dispatch
    /// requests another attempt.
    pub fn connect_failed(&mut self) {
        self.state = ConnectionState::Disconnected;
    }

    /// The in-flight write completed; continue with the oldest queued packet.
    pub fn write_succeeded(&mut self) -> Option<Action> {
        self.send_done = true;
        self.next_pending()
    }

    /// The in-flight write failed. That packet is dropped, the connection is
    /// considered gone, and queued packets wait for the next connection.
    pub fn write_failed(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.send_done = true;
    }

    /// Remove every queued packet, returning how many were discarded.
    pub fn discard_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    fn next_pending(&mut self) -> Option<Action> {
        let packet = self.pending.pop_front()?;
        self.send(packet)
    }

    fn send(&mut self, packet: Packet) -> Option<Action> {
        if !self.send_done {
            self.pending.push_back(packet);
            return None;
        }
        self.send_done = false;
        Some(Action::Write(packet))
    }
}
