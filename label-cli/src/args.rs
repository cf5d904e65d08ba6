use clap::Parser;
use fingerprint_printer::PrinterEndpoint;
use std::path::PathBuf;
use std::time::Duration;

/// Flags override the PRINTER_* environment variables (and `.env`).
#[derive(Debug, Parser)]
#[command(name = "label-cli")]
#[command(about = "Print sequentially numbered labels on a Fingerprint printer.")]
pub struct Args {
    /// Number of labels to print, numbered from 1
    #[arg(allow_hyphen_values = true)]
    pub count: i64,

    /// Printer address or hostname
    #[arg(long)]
    pub host: Option<String>,

    /// Raw printing port
    #[arg(long)]
    pub port: Option<u16>,

    /// Connect timeout in milliseconds
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// JSON file overriding the label layout
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Write the command stream to stdout instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Apply flag overrides on top of a base endpoint
    pub fn endpoint(&self, mut base: PrinterEndpoint) -> PrinterEndpoint {
        if let Some(host) = &self.host {
            base.host = host.clone();
        }
        if let Some(port) = self.port {
            base.port = port;
        }
        if let Some(ms) = self.connect_timeout_ms {
            base.connect_timeout = Duration::from_millis(ms);
        }
        base
    }
}
