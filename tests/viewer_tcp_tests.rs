//! End-to-end delivery over a real TCP socket.

mod test_utils;

use femtoviewer::{FemtoViewerLogger, PartKey, PartValue, ViewerLevel, ViewerLoggerBuilder};
use rstest::rstest;

use test_utils::{find, is_identity, local_listener, recv_message, spawn_viewer, text};

#[rstest]
fn identity_then_messages_in_call_order() {
    let (addr, rx) = spawn_viewer(local_listener());
    let logger = FemtoViewerLogger::new(addr.ip().to_string(), addr.port());
    logger.log_text("a");
    logger.log_text("b");
    assert!(logger.flush());

    let identity = recv_message(&rx);
    assert!(is_identity(&identity));
    assert_eq!(
        find(&identity, PartKey::ClientName),
        Some(&PartValue::String(format!("pid{}", std::process::id())))
    );
    let first = recv_message(&rx);
    let second = recv_message(&rx);
    assert_eq!(text(&first), Some("a"));
    assert_eq!(text(&second), Some("b"));
    assert_eq!(find(&first, PartKey::MessageSeq), Some(&PartValue::Int32(0)));
    assert_eq!(find(&second, PartKey::MessageSeq), Some(&PartValue::Int32(1)));
}

#[rstest]
fn builder_settings_reach_the_wire() {
    let (addr, rx) = spawn_viewer(local_listener());
    let logger = ViewerLoggerBuilder::new()
        .with_tcp(addr.ip().to_string(), addr.port())
        .with_tag("Built")
        .with_level(ViewerLevel::Debug)
        .build()
        .expect("build logger");
    logger.log_binary(&[9, 8, 7]);
    assert!(logger.flush());

    assert!(is_identity(&recv_message(&rx)));
    let entry = recv_message(&rx);
    assert_eq!(find(&entry, PartKey::Tag), Some(&PartValue::from("Built")));
    assert_eq!(find(&entry, PartKey::Level), Some(&PartValue::Int64(4)));
    assert_eq!(find(&entry, PartKey::Message), Some(&PartValue::Binary(vec![9, 8, 7])));
}

#[rstest]
fn unreachable_viewer_never_blocks_caller() {
    let addr = local_listener().local_addr().expect("listener has address");
    // The listener is dropped, so the port refuses connections.
    let mut logger = FemtoViewerLogger::new(addr.ip().to_string(), addr.port());
    for i in 0..100 {
        logger.log_text(&format!("queued {i}"));
    }
    assert_eq!(logger.next_sequence(), 100);
    assert!(!logger.flush(), "packets stay queued without a viewer");
    logger.close();
}
