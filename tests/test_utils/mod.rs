//! Helpers shared by the integration tests: a minimal viewer that accepts
//! one TCP connection and reports every decoded message.

use std::{
    io::Read,
    net::{SocketAddr, TcpListener},
    sync::mpsc,
    thread,
    time::Duration,
};

use femtoviewer::{LogPart, MessageType, PartKey, PartValue, decode_message};

/// Bind an ephemeral local port.
pub fn local_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

/// Accept a single client and forward each message it sends.
pub fn spawn_viewer(listener: TcpListener) -> (SocketAddr, mpsc::Receiver<Vec<LogPart>>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        loop {
            let mut prefix = [0u8; 4];
            if stream.read_exact(&mut prefix).is_err() {
                return;
            }
            let len = u32::from_be_bytes(prefix) as usize;
            let mut frame = prefix.to_vec();
            frame.resize(4 + len, 0);
            if stream.read_exact(&mut frame[4..]).is_err() {
                return;
            }
            let (parts, _) = decode_message(&frame).expect("viewer decodes message");
            if tx.send(parts).is_err() {
                return;
            }
        }
    });
    (addr, rx)
}

/// Wait for the next message from the viewer.
pub fn recv_message(rx: &mpsc::Receiver<Vec<LogPart>>) -> Vec<LogPart> {
    rx.recv_timeout(Duration::from_secs(2))
        .expect("viewer received message")
}

pub fn find(parts: &[LogPart], key: PartKey) -> Option<&PartValue> {
    parts.iter().find(|part| part.key() == key).map(LogPart::value)
}

pub fn is_identity(parts: &[LogPart]) -> bool {
    find(parts, PartKey::MessageType) == Some(&PartValue::Int32(MessageType::ClientInfo.code()))
}

pub fn text(parts: &[LogPart]) -> Option<&str> {
    match find(parts, PartKey::Message) {
        Some(PartValue::String(text)) => Some(text),
        _ => None,
    }
}
