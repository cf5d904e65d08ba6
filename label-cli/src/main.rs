mod args;
mod status;

use anyhow::Context;
use args::Args;
use clap::Parser;
use fingerprint_printer::{LabelLayout, NetworkPrinter, PrinterEndpoint, build_commands_with};
use std::io::Write;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "label_cli=info,fingerprint_printer=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let endpoint = args.endpoint(PrinterEndpoint::from_env());
    let layout = match &args.layout {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading layout {}", path.display()))?;
            LabelLayout::from_json(&json).map_err(status::report)?
        }
        None => LabelLayout::default(),
    };

    if args.dry_run {
        let stream = build_commands_with(args.count, &layout).map_err(status::report)?;
        std::io::stdout().write_all(stream.as_bytes())?;
        return Ok(());
    }

    info!(
        count = args.count,
        host = %endpoint.host,
        port = endpoint.port,
        "Sending to printer..."
    );

    let printer = NetworkPrinter::from_endpoint(endpoint).with_layout(layout);
    match printer.print_labels(args.count).await {
        Ok(receipt) => {
            println!("{}", receipt);
            Ok(())
        }
        Err(e) => {
            error!(kind = %e.kind(), error = %e, "Print job failed");
            Err(status::report(e))
        }
    }
}
