//! Error types for the printer library

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Printer error types
///
/// Every variant carries a human-readable context message. Callers that need
/// to branch on the failure (e.g. to pick a translated status line) should
/// match on [`PrintError::kind`] instead of the message.
#[derive(Debug, Error)]
pub enum PrintError {
    /// Label count outside the accepted range; nothing was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid printer configuration; nothing was sent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Text field cannot be represented in the printer's character set
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// No connection within the configured connect timeout
    #[error("Connection timeout: {0}")]
    ConnectTimeout(String),

    /// The printer host actively refused the connection
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// Host could not be resolved or routed to
    #[error("Printer unreachable: {0}")]
    Unreachable(String),

    /// Connection dropped mid-write or the payload was only partially delivered
    #[error("Write failed: {0}")]
    WriteFailure(String),
}

impl PrintError {
    /// Classify a failed connect attempt
    pub(crate) fn connect(addr: SocketAddr, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                PrintError::ConnectTimeout(format!("{}: {}", addr, err))
            }
            io::ErrorKind::ConnectionRefused => {
                PrintError::ConnectionRefused(format!("{}: {}", addr, err))
            }
            _ => PrintError::Unreachable(format!("{}: {}", addr, err)),
        }
    }

    /// Classify a failed write, recording how much of the payload got out
    pub(crate) fn write(addr: SocketAddr, written: usize, total: usize, err: io::Error) -> Self {
        PrintError::WriteFailure(format!(
            "{}: {} ({} of {} bytes sent)",
            addr, err, written, total
        ))
    }

    /// Kind of failure, stable across message wording changes
    pub fn kind(&self) -> PrintErrorKind {
        match self {
            PrintError::InvalidArgument(_) => PrintErrorKind::InvalidArgument,
            PrintError::InvalidConfig(_) => PrintErrorKind::InvalidConfig,
            PrintError::Encoding(_) => PrintErrorKind::Encoding,
            PrintError::ConnectTimeout(_) => PrintErrorKind::ConnectTimeout,
            PrintError::ConnectionRefused(_) => PrintErrorKind::ConnectionRefused,
            PrintError::Unreachable(_) => PrintErrorKind::Unreachable,
            PrintError::WriteFailure(_) => PrintErrorKind::WriteFailure,
        }
    }

    /// Whether the failure happened before any byte could reach the printer
    pub fn is_pre_send(&self) -> bool {
        !matches!(self, PrintError::WriteFailure(_))
    }
}

/// Fieldless mirror of [`PrintError`] for UI mapping and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintErrorKind {
    InvalidArgument,
    InvalidConfig,
    Encoding,
    ConnectTimeout,
    ConnectionRefused,
    Unreachable,
    WriteFailure,
}

impl PrintErrorKind {
    /// Stable snake_case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintErrorKind::InvalidArgument => "invalid_argument",
            PrintErrorKind::InvalidConfig => "invalid_config",
            PrintErrorKind::Encoding => "encoding",
            PrintErrorKind::ConnectTimeout => "connect_timeout",
            PrintErrorKind::ConnectionRefused => "connection_refused",
            PrintErrorKind::Unreachable => "unreachable",
            PrintErrorKind::WriteFailure => "write_failure",
        }
    }
}

impl fmt::Display for PrintErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "192.168.1.193:9100".parse().unwrap()
    }

    #[test]
    fn test_connect_classification() {
        let timed_out = PrintError::connect(addr(), io::Error::from(io::ErrorKind::TimedOut));
        assert_eq!(timed_out.kind(), PrintErrorKind::ConnectTimeout);

        let refused =
            PrintError::connect(addr(), io::Error::from(io::ErrorKind::ConnectionRefused));
        assert_eq!(refused.kind(), PrintErrorKind::ConnectionRefused);

        let unreachable =
            PrintError::connect(addr(), io::Error::from(io::ErrorKind::HostUnreachable));
        assert_eq!(unreachable.kind(), PrintErrorKind::Unreachable);
    }

    #[test]
    fn test_write_failure_reports_progress() {
        let err = PrintError::write(addr(), 12, 40, io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(err.kind(), PrintErrorKind::WriteFailure);
        assert!(err.to_string().contains("12 of 40 bytes"));
        assert!(!err.is_pre_send());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&PrintErrorKind::ConnectTimeout).unwrap();
        assert_eq!(json, "\"connect_timeout\"");
        assert_eq!(PrintErrorKind::ConnectTimeout.to_string(), "connect_timeout");
    }
}
