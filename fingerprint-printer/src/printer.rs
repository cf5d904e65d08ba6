//! Label printing entry points
//!
//! Supports:
//! - Blocking calls for callers that own a thread (`print_labels`)
//! - An async adapter for tokio applications (`NetworkPrinter`)

use crate::config::PrinterEndpoint;
use crate::error::{PrintError, PrintResult};
use crate::fingerprint::PrintJob;
use crate::layout::LabelLayout;
use crate::transport::{Sent, Transport};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Successful print job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintReceipt {
    pub labels: u32,
    pub bytes_sent: usize,
    pub peer: SocketAddr,
}

impl fmt::Display for PrintReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully sent print job for {} labels.",
            self.labels
        )
    }
}

/// Print labels numbered `1..=count` on `host:port`
///
/// Blocks the calling thread for at most the connect timeout plus the time
/// needed to write the job.
pub fn print_labels(count: i64, host: &str, port: u16) -> PrintResult<PrintReceipt> {
    print_labels_to(count, &PrinterEndpoint::new(host, port))
}

/// Print labels numbered `1..=count` on a configured endpoint
pub fn print_labels_to(count: i64, endpoint: &PrinterEndpoint) -> PrintResult<PrintReceipt> {
    let job = PrintJob::new(count)?;
    print_job(&job, endpoint, &LabelLayout::default())
}

/// Render and send a job
#[instrument(skip(layout), fields(count = job.count()))]
pub fn print_job(
    job: &PrintJob,
    endpoint: &PrinterEndpoint,
    layout: &LabelLayout,
) -> PrintResult<PrintReceipt> {
    let stream = job.commands(layout)?;
    let Sent { peer, bytes } = Transport::new().send(stream.as_bytes(), endpoint)?;
    Ok(PrintReceipt {
        labels: stream.labels(),
        bytes_sent: bytes,
        peer,
    })
}

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send a raw Fingerprint program to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<Sent>;

    /// Check if the printer accepts connections
    async fn is_online(&self) -> bool;
}

/// Network printer (raw TCP, port 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    endpoint: PrinterEndpoint,
    layout: LabelLayout,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> Self {
        Self::from_endpoint(PrinterEndpoint::new(host, port))
    }

    pub fn from_endpoint(endpoint: PrinterEndpoint) -> Self {
        Self {
            endpoint,
            layout: LabelLayout::default(),
        }
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.endpoint.connect_timeout = timeout;
        self
    }

    pub fn with_layout(mut self, layout: LabelLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn endpoint(&self) -> &PrinterEndpoint {
        &self.endpoint
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    /// Print labels numbered `1..=count`
    pub async fn print_labels(&self, count: i64) -> PrintResult<PrintReceipt> {
        let job = PrintJob::new(count)?;
        let endpoint = self.endpoint.clone();
        let layout = self.layout.clone();
        run_blocking(move || print_job(&job, &endpoint, &layout)).await
    }
}

impl Printer for NetworkPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<Sent> {
        let endpoint = self.endpoint.clone();
        let data = data.to_vec();
        run_blocking(move || Transport::new().send(&data, &endpoint)).await
    }

    #[instrument(skip(self), fields(host = %self.endpoint.host, port = self.endpoint.port))]
    async fn is_online(&self) -> bool {
        let target = (self.endpoint.host.as_str(), self.endpoint.port);

        match tokio::time::timeout(self.endpoint.connect_timeout, TcpStream::connect(target)).await
        {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// Socket I/O is blocking, run it off the async workers
async fn run_blocking<T, F>(f: F) -> PrintResult<T>
where
    F: FnOnce() -> PrintResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(PrintError::WriteFailure(format!("print task aborted: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_message() {
        let receipt = PrintReceipt {
            labels: 5,
            bytes_sent: 300,
            peer: "127.0.0.1:9100".parse().unwrap(),
        };
        assert_eq!(
            receipt.to_string(),
            "Successfully sent print job for 5 labels."
        );
    }

    #[test]
    fn test_invalid_count_never_connects() {
        // Port 0 would fail config validation, so an InvalidArgument proves
        // the count was checked first
        let err = print_labels(0, "127.0.0.1", 0).unwrap_err();
        assert!(matches!(err, PrintError::InvalidArgument(_)));

        let err = print_labels(-3, "127.0.0.1", 0).unwrap_err();
        assert!(matches!(err, PrintError::InvalidArgument(_)));
    }

    #[test]
    fn test_network_printer_new() {
        let printer =
            NetworkPrinter::new("192.168.1.100", 9100).with_timeout(Duration::from_secs(2));
        assert_eq!(printer.endpoint().port, 9100);
        assert_eq!(printer.endpoint().connect_timeout, Duration::from_secs(2));
        assert_eq!(printer.layout(), &LabelLayout::default());
    }

    #[tokio::test]
    async fn test_async_invalid_count() {
        let printer = NetworkPrinter::new("127.0.0.1", 9100);
        let err = printer.print_labels(0).await.unwrap_err();
        assert!(matches!(err, PrintError::InvalidArgument(_)));
    }
}
