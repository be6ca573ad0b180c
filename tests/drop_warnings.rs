//! Delivery failures are reported through the `log` facade, not to callers.

use femtoviewer::FemtoViewerLogger;
use logtest::Logger;

#[test]
fn connect_failures_are_logged_as_warnings() {
    let mut captured = Logger::start();
    let addr = std::net::TcpListener::bind(("127.0.0.1", 0))
        .and_then(|listener| listener.local_addr())
        .expect("reserve port");

    let mut logger = FemtoViewerLogger::new(addr.ip().to_string(), addr.port());
    logger.log_text("undeliverable");
    assert!(!logger.flush());
    logger.close();

    let mut warnings = Vec::new();
    while let Some(record) = captured.pop() {
        if record.level() == log::Level::Warn {
            warnings.push(record.args().to_owned());
        }
    }
    assert!(
        warnings.iter().any(|msg| msg.contains("failed to connect")),
        "warnings: {warnings:?}"
    );
    assert!(
        warnings
            .iter()
            .any(|msg| msg.contains("discarded 1 undelivered packets")),
        "warnings: {warnings:?}"
    );
}
