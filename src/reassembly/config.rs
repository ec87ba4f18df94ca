//! Policies controlling how accepted fragments become packet payloads.
//!
//! The defaults keep fragments exactly as they arrived: payloads are
//! concatenated in acceptance order and repeated identifiers are stored
//! again. [`ReassemblyConfig::sequenced`] switches to id-ordered
//! reconstruction with duplicate suppression.

use serde::{Deserialize, Serialize};

/// Order in which a packet's fragments are concatenated on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssemblyOrder {
    /// Acceptance order, ignoring identifiers.
    #[default]
    Arrival,
    /// Ascending [`SequenceId`](crate::reassembly::SequenceId). Fragments
    /// sharing an identifier keep their acceptance order.
    SequenceId,
}

/// Handling of a fragment whose identifier already exists in the open packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Store the fragment alongside the earlier one.
    #[default]
    Keep,
    /// Overwrite the earlier fragment's payload in place.
    Replace,
}

/// Settings applied by a [`ReassemblyBuffer`](crate::reassembly::ReassemblyBuffer).
///
/// # Examples
///
/// ```
/// use packet_receiver::reassembly::{AssemblyOrder, DuplicatePolicy, ReassemblyConfig};
///
/// let config = ReassemblyConfig::default().with_order(AssemblyOrder::SequenceId);
/// assert_eq!(config.order, AssemblyOrder::SequenceId);
/// assert_eq!(config.duplicates, DuplicatePolicy::Keep);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReassemblyConfig {
    /// Concatenation order used by reads.
    pub order: AssemblyOrder,
    /// Treatment of repeated identifiers within one packet.
    pub duplicates: DuplicatePolicy,
}

impl ReassemblyConfig {
    /// Id-ordered reconstruction where the latest fragment for an id wins.
    #[must_use]
    pub const fn sequenced() -> Self {
        Self {
            order: AssemblyOrder::SequenceId,
            duplicates: DuplicatePolicy::Replace,
        }
    }

    /// Return a copy using `order`.
    #[must_use]
    pub const fn with_order(mut self, order: AssemblyOrder) -> Self {
        self.order = order;
        self
    }

    /// Return a copy using `duplicates`.
    #[must_use]
    pub const fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
