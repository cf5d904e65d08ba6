//! Raw socket transport
//!
//! One call, one connection, one attempt:
//!
//! ```text
//! IDLE -> CONNECTING -> CONNECTED -> SENDING -> SENT
//!              |                         |
//!              +---------> FAILED <------+
//! ```
//!
//! The connection is owned by the sending scope and dropped before the call
//! returns, whichever terminal state it ends in. Nothing is read back from
//! the printer.

use crate::config::PrinterEndpoint;
use crate::error::{PrintError, PrintResult};
use crate::fingerprint::CommandStream;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream};
use tracing::{debug, info, instrument, warn};

/// Opens connections for the transport
///
/// The production implementation is [`TcpConnector`]; tests plug in fakes to
/// observe connection release without a printer.
pub trait Connector {
    type Conn: Write;

    /// Connect to `addr`, honouring the endpoint's timeouts
    fn connect(&self, addr: SocketAddr, endpoint: &PrinterEndpoint) -> io::Result<Self::Conn>;
}

/// Blocking TCP connector
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Conn = TcpStream;

    fn connect(&self, addr: SocketAddr, endpoint: &PrinterEndpoint) -> io::Result<TcpStream> {
        let stream = TcpStream::connect_timeout(&addr, endpoint.connect_timeout)?;
        stream.set_write_timeout(Some(endpoint.write_timeout))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

/// Transport lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Connecting,
    Connected,
    Sending,
    Sent,
    Failed,
}

impl TransportState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransportState::Sent | TransportState::Failed)
    }
}

fn enter(from: TransportState, to: TransportState) -> TransportState {
    debug!(?from, ?to, "transport state");
    to
}

/// Outcome of a completed send
///
/// Bytes were written and flushed to the socket. The printer sends no
/// acknowledgement, so this says nothing about the labels physically
/// coming out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sent {
    pub peer: SocketAddr,
    pub bytes: usize,
}

/// Single-attempt sender
#[derive(Debug, Clone, Default)]
pub struct Transport<C = TcpConnector> {
    connector: C,
}

impl Transport<TcpConnector> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Connector> Transport<C> {
    /// Transport using a custom connector
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    /// Send raw bytes to the endpoint
    #[instrument(
        skip(self, data),
        fields(host = %endpoint.host, port = endpoint.port, data_len = data.len())
    )]
    pub fn send(&self, data: &[u8], endpoint: &PrinterEndpoint) -> PrintResult<Sent> {
        let state = TransportState::Idle;

        let addr = endpoint.resolve().inspect_err(|e| {
            enter(state, TransportState::Failed);
            warn!(error = %e, "Printer address rejected");
        })?;

        let state = enter(state, TransportState::Connecting);
        let mut conn = match self.connector.connect(addr, endpoint) {
            Ok(conn) => conn,
            Err(e) => {
                enter(state, TransportState::Failed);
                let err = PrintError::connect(addr, e);
                warn!(error = %err, "Connect failed");
                return Err(err);
            }
        };
        let state = enter(state, TransportState::Connected);

        let state = enter(state, TransportState::Sending);
        let written = write_payload(&mut conn, data);
        drop(conn);

        match written {
            Ok(()) => {
                enter(state, TransportState::Sent);
                info!(peer = %addr, bytes = data.len(), "Print job sent");
                Ok(Sent {
                    peer: addr,
                    bytes: data.len(),
                })
            }
            Err((n, e)) => {
                enter(state, TransportState::Failed);
                let err = PrintError::write(addr, n, data.len(), e);
                warn!(error = %err, "Write failed");
                Err(err)
            }
        }
    }
}

/// Write everything and flush, or report how far we got
fn write_payload<W: Write>(conn: &mut W, data: &[u8]) -> Result<(), (usize, io::Error)> {
    let mut written = 0;
    while written < data.len() {
        match conn.write(&data[written..]) {
            Ok(0) => {
                return Err((
                    written,
                    io::Error::new(io::ErrorKind::WriteZero, "connection accepted no more data"),
                ));
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err((written, e)),
        }
    }
    conn.flush().map_err(|e| (written, e))
}

/// Send a command stream over TCP
pub fn send(stream: &CommandStream, endpoint: &PrinterEndpoint) -> PrintResult<Sent> {
    Transport::new().send(stream.as_bytes(), endpoint)
}
