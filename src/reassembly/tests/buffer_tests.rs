//! Tests for buffer validation, counting, and packet isolation.

use bytes::Bytes;
use rstest::{fixture, rstest};

use crate::reassembly::{
    BufferState,
    ControlSum,
    PartStatus,
    ReassemblyBuffer,
    ReceiveError,
    RejectionKind,
    SequenceId,
};

#[fixture]
fn open_buffer() -> ReassemblyBuffer {
    let mut buffer = ReassemblyBuffer::new();
    buffer.start_packet();
    buffer
}

fn sealed(buffer: &ReassemblyBuffer, data: &'static str) -> ControlSum {
    buffer.checksum_of(data.as_bytes())
}

#[test]
fn new_buffer_is_empty() {
    let buffer = ReassemblyBuffer::new();
    assert_eq!(buffer.state(), BufferState::Empty);
    assert!(!buffer.is_open());
    assert!(buffer.open_packet().is_none());
    assert_eq!(buffer.packet_count(), 0);
    assert!(buffer.collected_packets().is_empty());
    assert_eq!(buffer.failed_parts(), 0);
}

#[test]
fn rejects_fragment_before_first_packet() {
    let mut buffer = ReassemblyBuffer::new();
    let sum = sealed(&buffer, "X");

    let err = buffer
        .submit(1_u16, sum, "X")
        .expect_err("no packet is open");

    assert_eq!(
        err,
        ReceiveError::NoOpenPacket {
            sequence_id: SequenceId::new(1)
        }
    );
    assert_eq!(buffer.failed_parts(), 1);
    assert_eq!(buffer.failure_counts().no_open_packet, 1);
    assert!(buffer.collected_packets().is_empty());
    assert_eq!(buffer.state(), BufferState::Empty);
}

#[rstest]
fn start_packet_opens_an_empty_packet(open_buffer: ReassemblyBuffer) {
    assert_eq!(open_buffer.state(), BufferState::Open);
    assert_eq!(open_buffer.collected_packets(), vec![Bytes::new()]);
    assert!(open_buffer.open_packet().is_some_and(|packet| packet.is_empty()));
}

#[rstest]
fn accepts_fragment_with_matching_sum(mut open_buffer: ReassemblyBuffer) {
    let sum = sealed(&open_buffer, "AB");

    let status = open_buffer
        .submit(1_u16, sum, "AB")
        .expect("fragment accepted");

    assert_eq!(status, PartStatus::Appended);
    assert_eq!(open_buffer.collected_packets(), vec!["AB"]);
    assert_eq!(open_buffer.failed_parts(), 0);
}

#[rstest]
fn mismatch_reports_both_sums(mut open_buffer: ReassemblyBuffer) {
    let expected = sealed(&open_buffer, "X");
    let found = ControlSum::new(expected.get() ^ 1);

    let err = open_buffer
        .submit(4_u16, found, "X")
        .expect_err("corrupt fragment rejected");

    assert_eq!(
        err,
        ReceiveError::IntegrityMismatch {
            sequence_id: SequenceId::new(4),
            expected,
            found,
        }
    );
    assert_eq!(err.kind(), RejectionKind::IntegrityMismatch);
    assert_eq!(err.sequence_id(), SequenceId::new(4));
    assert!(open_buffer.open_packet().is_some_and(|packet| packet.is_empty()));
}

#[rstest]
fn rejection_leaves_packet_open(mut open_buffer: ReassemblyBuffer) {
    assert!(!open_buffer.receive_part(1_u16, 0_u64, "X"));
    let sum = sealed(&open_buffer, "Y");
    assert!(open_buffer.receive_part(2_u16, sum, "Y"));

    assert_eq!(open_buffer.state(), BufferState::Open);
    assert_eq!(open_buffer.collected_packets(), vec!["Y"]);
    assert_eq!(open_buffer.failed_parts(), 1);
}

#[rstest]
fn empty_payload_is_a_valid_fragment(mut open_buffer: ReassemblyBuffer) {
    let sum = open_buffer.checksum_of(&[]);
    assert!(open_buffer.receive_part(0_u16, sum, Bytes::new()));
    assert_eq!(open_buffer.open_packet().map(|packet| packet.len()), Some(1));
    assert_eq!(open_buffer.collected_packets(), vec![Bytes::new()]);
}

#[rstest]
fn new_packet_closes_previous_one(mut open_buffer: ReassemblyBuffer) {
    let first = sealed(&open_buffer, "one");
    assert!(open_buffer.receive_part(1_u16, first, "one"));
    open_buffer.start_packet();
    let second = sealed(&open_buffer, "two");
    assert!(open_buffer.receive_part(1_u16, second, "two"));

    assert_eq!(open_buffer.collected_packets(), vec!["one", "two"]);
    assert_eq!(open_buffer.packet_count(), 2);
    let lens: Vec<usize> = open_buffer.packets().map(|packet| packet.len()).collect();
    assert_eq!(lens, vec![1, 1]);
}

#[test]
fn counts_rejections_by_kind() {
    let mut buffer = ReassemblyBuffer::new();
    assert!(!buffer.receive_part(1_u16, 0_u64, "a"));
    assert!(!buffer.receive_part(2_u16, 0_u64, "b"));
    buffer.start_packet();
    assert!(!buffer.receive_part(3_u16, 0_u64, "c"));

    let counts = buffer.failure_counts();
    assert_eq!(counts.of(RejectionKind::NoOpenPacket), 2);
    assert_eq!(counts.of(RejectionKind::IntegrityMismatch), 1);
    assert_eq!(counts.total(), buffer.failed_parts());
    assert_eq!(buffer.failed_parts(), 3);
}

#[test]
fn custom_checksum_is_used_for_validation() {
    let mut buffer = ReassemblyBuffer::with_checksum(|data: &[u8]| data.len() as u64);
    buffer.start_packet();

    assert!(buffer.receive_part(1_u16, 3_u64, "abc"));
    assert!(!buffer.receive_part(2_u16, 3_u64, "abcd"));
    assert_eq!(buffer.checksum_of(b"abcd"), ControlSum::new(4));
}

#[rstest]
fn queries_are_idempotent(mut open_buffer: ReassemblyBuffer) {
    let sum = sealed(&open_buffer, "AB");
    assert!(open_buffer.receive_part(1_u16, sum, "AB"));

    let first = open_buffer.collected_packets();
    let second = open_buffer.collected_packets();
    assert_eq!(first, second);
    assert_eq!(open_buffer.failed_parts(), open_buffer.failed_parts());
}
