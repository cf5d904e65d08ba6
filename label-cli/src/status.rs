use fingerprint_printer::{PrintError, PrintErrorKind};

/// Operator-facing status line for a failed job
pub fn failure_message(err: &PrintError) -> &'static str {
    match err.kind() {
        PrintErrorKind::InvalidArgument => "Error: Please enter a positive whole number.",
        PrintErrorKind::InvalidConfig => "Error: Invalid printer configuration.",
        PrintErrorKind::Encoding => "Error: Label text contains unsupported characters.",
        PrintErrorKind::ConnectTimeout => {
            "Error: Connection timed out. Check printer IP and network."
        }
        PrintErrorKind::ConnectionRefused => {
            "Error: The printer refused the connection. \
             Check that it is on and the port is correct."
        }
        PrintErrorKind::Unreachable => "Error: Printer unreachable. Check printer IP and network.",
        PrintErrorKind::WriteFailure => {
            "Error: Connection lost while sending. Some labels may not have printed."
        }
    }
}

/// Wrap a failure with its status line for the process exit report
pub fn report(err: PrintError) -> anyhow::Error {
    let message = failure_message(&err);
    anyhow::Error::new(err).context(message)
}
