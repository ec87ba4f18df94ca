//! Rejection and status types emitted by the reassembly buffer.
//!
//! Rejections are an expected outcome on a lossy transport, so none of these
//! types carry a source error; they describe which check the fragment failed
//! and with which values.

use thiserror::Error;

use super::{ControlSum, SequenceId};

/// Result of storing an accepted fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartStatus {
    /// The fragment was appended to the open packet.
    Appended,
    /// The fragment overwrote an earlier fragment with the same identifier.
    Replaced,
}

/// Reasons a fragment submission is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ReceiveError {
    /// No packet has been started yet.
    #[error("fragment {sequence_id} arrived with no packet open")]
    NoOpenPacket {
        /// Identifier carried by the rejected fragment.
        sequence_id: SequenceId,
    },
    /// The claimed control sum does not match the payload.
    #[error("fragment {sequence_id} failed integrity check: expected {expected}, found {found}")]
    IntegrityMismatch {
        /// Identifier carried by the rejected fragment.
        sequence_id: SequenceId,
        /// Control sum computed by the buffer over the payload.
        expected: ControlSum,
        /// Control sum claimed by the producer.
        found: ControlSum,
    },
}

impl ReceiveError {
    /// Classify the rejection for counters and metrics.
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::NoOpenPacket { .. } => RejectionKind::NoOpenPacket,
            Self::IntegrityMismatch { .. } => RejectionKind::IntegrityMismatch,
        }
    }

    /// Identifier of the fragment that was rejected.
    #[must_use]
    pub const fn sequence_id(&self) -> SequenceId {
        match self {
            Self::NoOpenPacket { sequence_id } | Self::IntegrityMismatch { sequence_id, .. } => {
                *sequence_id
            }
        }
    }
}

/// Payload-free classification of a [`ReceiveError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// See [`ReceiveError::NoOpenPacket`].
    NoOpenPacket,
    /// See [`ReceiveError::IntegrityMismatch`].
    IntegrityMismatch,
}

impl RejectionKind {
    /// Stable label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoOpenPacket => "no_open_packet",
            Self::IntegrityMismatch => "integrity_mismatch",
        }
    }
}
