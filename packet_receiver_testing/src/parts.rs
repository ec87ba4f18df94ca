//! Builders for valid and corrupted fragments.
//!
//! All helpers assume the default [`Fnv1a64`] checksum used by
//! [`ReassemblyBuffer::new`].

use bytes::Bytes;
use packet_receiver::{
    Checksum,
    ControlSum,
    Fnv1a64,
    PartStatus,
    ReassemblyBuffer,
    ReceiveError,
};
use rstest::fixture;

/// Control sum the default buffer expects for `data`.
pub fn sealed_sum(data: impl AsRef<[u8]>) -> ControlSum { Fnv1a64.checksum(data.as_ref()) }

/// A control sum guaranteed to differ from `sum`.
pub fn corrupt(sum: ControlSum) -> ControlSum { ControlSum::new(sum.get() ^ 0x5a5a) }

/// Submit `data` under `sequence_id` with its correct control sum.
///
/// # Errors
///
/// Returns the buffer's rejection, which for a sealed fragment can only be
/// [`ReceiveError::NoOpenPacket`].
pub fn submit_sealed(
    buffer: &mut ReassemblyBuffer,
    sequence_id: u16,
    data: impl Into<Bytes>,
) -> Result<PartStatus, ReceiveError> {
    let data = data.into();
    let sum = buffer.checksum_of(&data);
    buffer.submit(sequence_id, sum, data)
}

/// A default buffer with one packet already open.
#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn open_buffer() -> ReassemblyBuffer {
    let mut buffer = ReassemblyBuffer::new();
    buffer.start_packet();
    buffer
}
