use fingerprint_printer::{
    LabelLayout, NetworkPrinter, PrintErrorKind, Printer, PrinterEndpoint, build_commands,
    print_labels, print_labels_to,
};
use std::io::Read;
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

/// Accept one connection and return everything received until the client closes
fn record_one() -> (u16, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).unwrap();
        received
    });
    (port, handle)
}

#[test]
fn test_print_five_labels_end_to_end() {
    let (port, listener) = record_one();

    let receipt = print_labels(5, "127.0.0.1", port).unwrap();
    assert_eq!(receipt.labels, 5);

    let received = listener.join().unwrap();
    assert_eq!(receipt.bytes_sent, received.len());
    assert_eq!(received, build_commands(5).unwrap().into_bytes());

    let text = String::from_utf8(received).unwrap();
    let setup_end = text.find("CLL\n").unwrap();
    assert_eq!(text[..setup_end].matches("SETUP ").count(), 3);

    let blocks: Vec<&str> = text[setup_end..].split_inclusive("PRINTFEED\n").collect();
    assert_eq!(blocks.len(), 5);
    for (i, block) in blocks.iter().enumerate() {
        assert!(block.starts_with("CLL\n"));
        assert!(block.contains(&format!("PRTXT \"{}\"\n", i + 1)));
    }
}

#[test]
fn test_print_with_hostname() {
    // IPv4-only listener: `localhost` must resolve to 127.0.0.1 even where
    // ::1 is listed first
    let (port, listener) = record_one();

    let endpoint = PrinterEndpoint::new("localhost", port);
    let receipt = print_labels_to(2, &endpoint).unwrap();
    assert_eq!(receipt.labels, 2);
    assert!(receipt.peer.is_ipv4());

    let received = listener.join().unwrap();
    assert_eq!(received.len(), receipt.bytes_sent);
    assert_eq!(received, build_commands(2).unwrap().into_bytes());
}

#[test]
fn test_refused_when_nothing_listens() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = print_labels(3, "127.0.0.1", port).unwrap_err();
    assert_eq!(err.kind(), PrintErrorKind::ConnectionRefused);
    assert!(err.is_pre_send());
}

#[test]
fn test_invalid_count_is_not_attempted() {
    let err = print_labels(0, "127.0.0.1", 9).unwrap_err();
    assert_eq!(err.kind(), PrintErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_network_printer_async() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        use tokio::io::AsyncReadExt;
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    let layout = LabelLayout::from_json(r#"{"x": 200, "y": 90}"#).unwrap();
    let printer = NetworkPrinter::new("127.0.0.1", port)
        .with_timeout(Duration::from_secs(1))
        .with_layout(layout);

    let receipt = printer.print_labels(3).await.unwrap();
    assert_eq!(receipt.labels, 3);

    let text = String::from_utf8(server.await.unwrap()).unwrap();
    assert_eq!(text.matches("PRPOS 200, 90\n").count(), 3);
    assert!(text.ends_with("PRTXT \"3\"\nPRINTFEED\n"));
}

#[tokio::test]
async fn test_network_printer_raw_and_online_check() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        use tokio::io::AsyncReadExt;
        // First connection is the online check, second carries the data
        let (check, _) = listener.accept().await.unwrap();
        drop(check);
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    let printer = NetworkPrinter::new("127.0.0.1", port);
    assert!(printer.is_online().await);

    let sent = printer.print(b"PRINTFEED\n").await.unwrap();
    assert_eq!(sent.bytes, 10);
    assert_eq!(server.await.unwrap(), b"PRINTFEED\n".to_vec());
}

#[tokio::test]
async fn test_network_printer_offline() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let printer = NetworkPrinter::new("127.0.0.1", port);
    assert!(!printer.is_online().await);

    let err = printer.print_labels(1).await.unwrap_err();
    assert_eq!(err.kind(), PrintErrorKind::ConnectionRefused);
}
