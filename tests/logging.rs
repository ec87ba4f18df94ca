//! Tests for the buffer's log output.

use log::Level;
use packet_receiver::ReassemblyBuffer;
use packet_receiver_testing::{LoggerHandle, corrupt, logger, sealed_sum};
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[serial(logging)]
fn rejections_are_logged_as_warnings(mut logger: LoggerHandle) {
    let mut buffer = ReassemblyBuffer::new();
    buffer.receive_part(7_u16, sealed_sum("a"), "a");
    buffer.start_packet();
    buffer.receive_part(8_u16, corrupt(sealed_sum("b")), "b");

    let warnings = logger.drain_at(Level::Warn);

    assert_eq!(warnings.len(), 2, "unexpected warnings: {warnings:?}");
    assert!(warnings[0].contains("fragment 7 arrived with no packet open"));
    assert!(warnings[1].contains("fragment 8 failed integrity check"));
}

#[rstest]
#[serial(logging)]
fn accepted_fragments_are_logged_at_debug(mut logger: LoggerHandle) {
    let mut buffer = ReassemblyBuffer::new();
    buffer.start_packet();
    buffer.receive_part(3_u16, sealed_sum("abc"), "abc");

    let debug = logger.drain_at(Level::Debug);

    assert!(debug.iter().any(|msg| msg.contains("started packet 0")));
    assert!(
        debug
            .iter()
            .any(|msg| msg.contains("accepted fragment 3 (3 bytes) into packet 0"))
    );
}
