//! # fingerprint-printer
//!
//! Numbered label printing for Fingerprint (Intermec/Honeywell) printers over
//! raw TCP.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Fingerprint command building
//! - Windows-1252 encoding of text fields
//! - Network printing (TCP port 9100), single attempt, bounded timeouts
//!
//! Input forms, status texts and translations stay in the calling
//! application. The printer sends no acknowledgement: a successful result
//! means the job was written to the socket, not that labels came out.
//!
//! ## Example
//!
//! ```ignore
//! use fingerprint_printer::{print_labels, PrintErrorKind};
//!
//! match print_labels(5, "192.168.1.193", 9100) {
//!     Ok(receipt) => println!("{}", receipt),
//!     Err(e) if e.kind() == PrintErrorKind::ConnectTimeout => println!("printer not answering"),
//!     Err(e) => println!("{}", e),
//! }
//! ```

mod config;
mod encoding;
mod error;
mod fingerprint;
mod layout;
mod printer;
mod transport;

// Re-exports
pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_WRITE_TIMEOUT, PrinterEndpoint,
};
pub use encoding::{encode_cp1252, is_cp1252, quote_text};
pub use error::{PrintError, PrintErrorKind, PrintResult};
pub use fingerprint::{
    CommandStream, FingerprintBuilder, PrintJob, build_commands, build_commands_with,
};
pub use layout::{Anchor, LabelLayout, MediaType, PrintMethod};
pub use printer::{
    NetworkPrinter, PrintReceipt, Printer, print_job, print_labels, print_labels_to,
};
pub use transport::{Connector, Sent, TcpConnector, Transport, TransportState, send};
