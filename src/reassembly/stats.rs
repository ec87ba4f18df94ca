//! Rejection counters split by kind.

use serde::{Deserialize, Serialize};

use super::RejectionKind;

/// Cumulative rejection counters.
///
/// [`FailureCounts::total`] is the aggregate reported by
/// [`ReassemblyBuffer::failed_parts`](crate::reassembly::ReassemblyBuffer::failed_parts).
/// Counters only ever grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounts {
    /// Fragments submitted before any packet was started.
    pub no_open_packet: u64,
    /// Fragments whose control sum did not match their payload.
    pub integrity_mismatch: u64,
}

impl FailureCounts {
    /// Record one rejection of `kind`.
    pub fn record(&mut self, kind: RejectionKind) {
        let counter = match kind {
            RejectionKind::NoOpenPacket => &mut self.no_open_packet,
            RejectionKind::IntegrityMismatch => &mut self.integrity_mismatch,
        };
        *counter = counter.saturating_add(1);
    }

    /// Number of rejections recorded for `kind`.
    #[must_use]
    pub const fn of(&self, kind: RejectionKind) -> u64 {
        match kind {
            RejectionKind::NoOpenPacket => self.no_open_packet,
            RejectionKind::IntegrityMismatch => self.integrity_mismatch,
        }
    }

    /// Total rejections across all kinds.
    #[must_use]
    pub const fn total(&self) -> u64 { self.no_open_packet.saturating_add(self.integrity_mismatch) }
}
