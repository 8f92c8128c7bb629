//! Byte streams to a server, plain or TLS.

use std::io::{self, Read, Write};
use std::net::TcpStream;

use native_tls::{HandshakeError, TlsConnector, TlsStream};

use crate::error::FetchError;
use crate::locator::Scheme;

/// An open connection to an origin server.
#[derive(Debug)]
pub enum Connection {
    /// `http`: bytes go straight over TCP.
    Plain(TcpStream),
    /// `https`: TCP wrapped in a TLS session.
    Tls(Box<TlsStream<TcpStream>>),
}

/// Open a connection to `host:port`, negotiating TLS for `https`.
///
/// # Errors
///
/// Returns [`FetchError::Connect`] if the TCP connection fails and
/// [`FetchError::Tls`] if the TLS handshake fails.
pub fn connect(scheme: Scheme, host: &str, port: u16) -> Result<Connection, FetchError> {
    let stream = TcpStream::connect((host, port)).map_err(|source| FetchError::Connect {
        host: host.to_string(),
        port,
        source,
    })?;
    tracing::debug!(host, port, %scheme, "connected");

    if scheme != Scheme::Https {
        return Ok(Connection::Plain(stream));
    }

    let connector = TlsConnector::new().map_err(|source| FetchError::Tls {
        host: host.to_string(),
        source,
    })?;
    match connector.connect(host, stream) {
        Ok(tls) => Ok(Connection::Tls(Box::new(tls))),
        Err(HandshakeError::Failure(source)) => Err(FetchError::Tls {
            host: host.to_string(),
            source,
        }),
        Err(HandshakeError::WouldBlock(_)) => Err(FetchError::Io(io::Error::new(
            io::ErrorKind::WouldBlock,
            "TLS handshake interrupted on a blocking socket",
        ))),
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stream) => stream.read(buf),
            Self::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stream) => stream.write(buf),
            Self::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(stream) => stream.flush(),
            Self::Tls(stream) => stream.flush(),
        }
    }
}
