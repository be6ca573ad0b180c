//! Send/Sync guarantees for core types.

use femtoviewer::{
    FemtoViewerLogger, LogMessage, SystemClock, TcpConnector, ViewerConfig, ViewerLoggerBuilder,
};
use rstest::rstest;
use static_assertions::assert_impl_all;

#[rstest]
fn builders_are_send_sync() {
    assert_impl_all!(ViewerLoggerBuilder: Send, Sync);
    assert_impl_all!(ViewerConfig: Send, Sync);
}

#[rstest]
fn components_are_send_sync() {
    assert_impl_all!(FemtoViewerLogger: Send, Sync);
    assert_impl_all!(LogMessage: Send, Sync);
    assert_impl_all!(TcpConnector: Send, Sync);
    assert_impl_all!(SystemClock: Send, Sync);
}
