//! Stateful buffer that validates fragments and stitches them into packets.
//!
//! [`ReassemblyBuffer`] owns every packet started on it, in start order.
//! Fragments are only ever written to the most recently started packet;
//! earlier packets stay readable but no longer accept writes. Rejected
//! fragments are discarded and counted, and the buffer stays usable after
//! any number of rejections. Nothing is evicted: the owner decides when to
//! drop the buffer as a whole.

use std::slice;

use bytes::Bytes;
use log::{debug, warn};

use super::{
    ControlSum,
    FailureCounts,
    Fragment,
    LogicalPacket,
    PartFrame,
    PartStatus,
    ReassemblyConfig,
    ReceiveError,
    SequenceId,
};
use crate::{
    checksum::{Checksum, Fnv1a64},
    metrics::{self, PartOutcome},
};

/// Whether the buffer currently has a packet open for writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferState {
    /// No packet has been started; every fragment is rejected.
    Empty,
    /// The last started packet accepts fragments.
    Open,
}

/// In-memory reassembly state for a stream of fragmented packets.
///
/// # Examples
///
/// ```
/// use packet_receiver::reassembly::ReassemblyBuffer;
///
/// let mut buffer = ReassemblyBuffer::new();
/// buffer.start_packet();
/// let sum = buffer.checksum_of(b"AB");
/// assert!(buffer.receive_part(1_u16, sum, "AB"));
/// assert!(!buffer.receive_part(2_u16, sum, "CD"));
///
/// assert_eq!(buffer.collected_packets(), vec!["AB"]);
/// assert_eq!(buffer.failed_parts(), 1);
/// ```
#[derive(Debug)]
pub struct ReassemblyBuffer<C = Fnv1a64> {
    checksum: C,
    config: ReassemblyConfig,
    packets: Vec<LogicalPacket>,
    state: BufferState,
    failures: FailureCounts,
}

impl ReassemblyBuffer {
    /// Create an empty buffer using [`Fnv1a64`] and the default configuration.
    #[must_use]
    pub fn new() -> Self { Self::from_config(ReassemblyConfig::default()) }

    /// Create an empty buffer using [`Fnv1a64`] and `config`.
    #[must_use]
    pub fn from_config(config: ReassemblyConfig) -> Self {
        Self::with_checksum_and_config(Fnv1a64, config)
    }
}

impl Default for ReassemblyBuffer {
    fn default() -> Self { Self::new() }
}

impl<C: Checksum> ReassemblyBuffer<C> {
    /// Create an empty buffer validating fragments with `checksum`.
    #[must_use]
    pub fn with_checksum(checksum: C) -> Self {
        Self::with_checksum_and_config(checksum, ReassemblyConfig::default())
    }

    /// Create an empty buffer validating fragments with `checksum` and
    /// applying `config`.
    #[must_use]
    pub fn with_checksum_and_config(checksum: C, config: ReassemblyConfig) -> Self {
        Self {
            checksum,
            config,
            packets: Vec::new(),
            state: BufferState::Empty,
            failures: FailureCounts::default(),
        }
    }

    /// Begin a new logical packet.
    ///
    /// The previously open packet, if any, stops accepting fragments but
    /// remains part of [`collected_packets`](Self::collected_packets).
    pub fn start_packet(&mut self) {
        self.packets.push(LogicalPacket::default());
        self.state = BufferState::Open;
        metrics::inc_packets_started();
        debug!("started packet {}", self.packets.len() - 1);
    }

    /// Validate a fragment and store it in the open packet.
    ///
    /// Returns `true` when the fragment was stored. A `false` return means
    /// the fragment was discarded and counted in
    /// [`failed_parts`](Self::failed_parts).
    pub fn receive_part(
        &mut self,
        sequence_id: impl Into<SequenceId>,
        control_sum: impl Into<ControlSum>,
        data: impl Into<Bytes>,
    ) -> bool {
        self.submit(sequence_id, control_sum, data).is_ok()
    }

    /// Typed form of [`receive_part`](Self::receive_part).
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveError::NoOpenPacket`] when no packet has been started
    /// and [`ReceiveError::IntegrityMismatch`] when `control_sum` differs
    /// from the checksum of `data`. Either way the rejection is counted and
    /// stored packets are untouched.
    pub fn submit(
        &mut self,
        sequence_id: impl Into<SequenceId>,
        control_sum: impl Into<ControlSum>,
        data: impl Into<Bytes>,
    ) -> Result<PartStatus, ReceiveError> {
        let sequence_id = sequence_id.into();
        let data = data.into();
        let len = data.len();

        match self.store(sequence_id, control_sum.into(), data) {
            Ok(status) => {
                metrics::inc_parts(PartOutcome::Accepted);
                debug!(
                    "accepted fragment {sequence_id} ({len} bytes) into packet {}: {status:?}",
                    self.packets.len() - 1
                );
                Ok(status)
            }
            Err(err) => {
                self.failures.record(err.kind());
                metrics::inc_parts(PartOutcome::Rejected(err.kind()));
                warn!("rejected fragment: {err}");
                Err(err)
            }
        }
    }

    /// Submit a decoded [`PartFrame`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`submit`](Self::submit).
    pub fn submit_frame(&mut self, frame: PartFrame) -> Result<PartStatus, ReceiveError> {
        let PartFrame {
            sequence_id,
            control_sum,
            payload,
        } = frame;
        self.submit(sequence_id, control_sum, payload)
    }

    /// Assembled payload of every started packet, in start order.
    ///
    /// Packets without accepted fragments yield an empty payload.
    #[must_use]
    pub fn collected_packets(&self) -> Vec<Bytes> {
        self.packets
            .iter()
            .map(|packet| packet.assemble(self.config.order))
            .collect()
    }

    /// Cumulative number of rejected fragment submissions.
    #[must_use]
    pub const fn failed_parts(&self) -> u64 { self.failures.total() }

    /// Rejections split by kind.
    #[must_use]
    pub const fn failure_counts(&self) -> FailureCounts { self.failures }

    /// Current position in the buffer's state machine.
    #[must_use]
    pub const fn state(&self) -> BufferState { self.state }

    /// Whether a packet is open for fragment submission.
    #[must_use]
    pub fn is_open(&self) -> bool { self.state == BufferState::Open }

    /// Number of packets started so far.
    #[must_use]
    pub fn packet_count(&self) -> usize { self.packets.len() }

    /// Iterate over started packets in start order.
    pub fn packets(&self) -> slice::Iter<'_, LogicalPacket> { self.packets.iter() }

    /// Borrow the packet currently accepting fragments.
    #[must_use]
    pub fn open_packet(&self) -> Option<&LogicalPacket> {
        match self.state {
            BufferState::Open => self.packets.last(),
            BufferState::Empty => None,
        }
    }

    /// Control sum this buffer expects for `data`.
    #[must_use]
    pub fn checksum_of(&self, data: &[u8]) -> ControlSum { self.checksum.checksum(data) }

    /// Configuration applied by this buffer.
    #[must_use]
    pub const fn config(&self) -> ReassemblyConfig { self.config }

    fn store(
        &mut self,
        sequence_id: SequenceId,
        found: ControlSum,
        data: Bytes,
    ) -> Result<PartStatus, ReceiveError> {
        let packet = match self.state {
            BufferState::Open => self.packets.last_mut(),
            BufferState::Empty => None,
        }
        .ok_or(ReceiveError::NoOpenPacket { sequence_id })?;

        let expected = self.checksum.checksum(&data);
        if expected != found {
            return Err(ReceiveError::IntegrityMismatch {
                sequence_id,
                expected,
                found,
            });
        }

        Ok(packet.accept(Fragment::new(sequence_id, data), self.config.duplicates))
    }
}
