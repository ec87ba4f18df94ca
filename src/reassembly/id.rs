//! Identifier and integrity newtypes carried by every fragment.
//!
//! Both wrappers are `Copy` and encode as their bare integers so a
//! [`PartFrame`](crate::reassembly::PartFrame) stays as small as the raw
//! fields would be.

use bincode::{Decode, Encode};
use derive_more::{Display, From, Into};

/// Caller-assigned identifier of a fragment within its logical packet.
///
/// Identifiers need not be unique or contiguous; any `u16` is valid.
///
/// # Examples
///
/// ```
/// use packet_receiver::reassembly::SequenceId;
/// let id = SequenceId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(SequenceId::from(7_u16), id);
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From, Into,
)]
#[display("{_0}")]
pub struct SequenceId(u16);

impl SequenceId {
    /// Create a new identifier.
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    /// Return the inner numeric identifier.
    #[must_use]
    pub const fn get(self) -> u16 { self.0 }
}

/// Integrity value a producer claims for a fragment payload.
///
/// The buffer compares it against its own
/// [`Checksum`](crate::checksum::Checksum) of the payload bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, Display, From, Into)]
#[display("{_0:#018x}")]
pub struct ControlSum(u64);

impl ControlSum {
    /// Wrap a raw integrity value.
    #[must_use]
    pub const fn new(value: u64) -> Self { Self(value) }

    /// Return the raw integrity value.
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}
