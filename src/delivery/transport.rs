//! Transport primitives for the delivery worker.

use std::{
    io::{self, Write},
    net::{SocketAddr, TcpStream, ToSocketAddrs},
};

/// Opens connections to the viewer endpoint.
///
/// The worker calls [`Connector::connect`] lazily whenever a packet arrives
/// while no connection exists.
pub trait Connector: Send + 'static {
    type Connection: Connection;

    fn connect(&mut self) -> io::Result<Self::Connection>;

    /// Human-readable endpoint used in diagnostics.
    fn endpoint(&self) -> String;
}

/// A live byte stream to the viewer.
pub trait Connection: Send {
    /// Write one whole packet. Either every byte is handed to the transport
    /// or an error is returned.
    fn write_packet(&mut self, packet: &[u8]) -> io::Result<()>;
}

/// Plain TCP connector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TcpConnector {
    /// Hostname or IP address to connect to.
    pub host: String,
    /// TCP port number.
    pub port: u16,
}

impl TcpConnector {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map(|iter| iter.collect())
    }
}

impl Connector for TcpConnector {
    type Connection = TcpStream;

    fn connect(&mut self) -> io::Result<TcpStream> {
        let mut last_err = None;
        for addr in self.socket_addrs()? {
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    stream.set_nodelay(true)?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses resolved for {}", self.endpoint()),
            )
        }))
    }

    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Connection for TcpStream {
    fn write_packet(&mut self, packet: &[u8]) -> io::Result<()> {
        self.write_all(packet)?;
        self.flush()
    }
}
