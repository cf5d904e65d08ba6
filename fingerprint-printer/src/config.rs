//! Printer endpoint configuration

use crate::error::{PrintError, PrintResult};
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// Raw printing port used by Fingerprint printers
pub const DEFAULT_PORT: u16 = 9100;
pub const DEFAULT_HOST: &str = "192.168.1.193";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to reach a printer
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PRINTER_HOST | 192.168.1.193 | printer address or hostname |
/// | PRINTER_PORT | 9100 | raw printing port |
/// | PRINTER_CONNECT_TIMEOUT_MS | 5000 | connect timeout (ms) |
/// | PRINTER_WRITE_TIMEOUT_MS | 10000 | write timeout (ms) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterEndpoint {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
}

impl PrinterEndpoint {
    /// Endpoint with default timeouts
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Load from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("PRINTER_HOST").unwrap_or_else(|_| DEFAULT_HOST.into()),
            port: std::env::var("PRINTER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            connect_timeout: std::env::var("PRINTER_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            write_timeout: std::env::var("PRINTER_WRITE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_WRITE_TIMEOUT),
        }
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set write timeout
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn validate(&self) -> PrintResult<()> {
        if self.host.trim().is_empty() {
            return Err(PrintError::InvalidConfig("printer host is empty".into()));
        }
        if self.port == 0 {
            return Err(PrintError::InvalidConfig("printer port is 0".into()));
        }
        // The OS rejects zero socket timeouts
        if self.connect_timeout.is_zero() || self.write_timeout.is_zero() {
            return Err(PrintError::InvalidConfig(
                "printer timeouts must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Resolve to the single address the transport will try
    ///
    /// Accepts IP literals and hostnames. Printers on raw port 9100 are
    /// commonly IPv4-only, so the first IPv4 address wins and an IPv6 address
    /// is only used when the name has no A record. A lookup failure means the
    /// printer cannot be reached, so it is reported as
    /// [`PrintError::Unreachable`].
    ///
    /// Hostname lookups go through the system resolver and are bounded by its
    /// own timeout and retry settings (`/etc/resolv.conf` on Unix), not by
    /// `connect_timeout`. Use an IP literal when the whole call must stay
    /// within `connect_timeout`.
    pub fn resolve(&self) -> PrintResult<SocketAddr> {
        self.validate()?;
        let target = format!("{}:{}", self.host, self.port);
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| PrintError::Unreachable(format!("{}: {}", target, e)))?;
        pick_address(addrs)
            .ok_or_else(|| PrintError::Unreachable(format!("{}: no address found", target)))
    }
}

/// First IPv4 address, else the first address of any family
fn pick_address(addrs: impl IntoIterator<Item = SocketAddr>) -> Option<SocketAddr> {
    let mut first = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}

impl Default for PrinterEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
