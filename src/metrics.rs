//! Metric helpers for `packet_receiver`.
//!
//! This module defines metric names and small helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::reassembly::RejectionKind;

/// Name of the counter tracking started packets.
pub const PACKETS_STARTED: &str = "packet_receiver_packets_started_total";
/// Name of the counter tracking fragment submissions, labelled by outcome.
pub const PARTS_TOTAL: &str = "packet_receiver_parts_total";

/// Outcome of a fragment submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartOutcome {
    /// The fragment was stored.
    Accepted,
    /// The fragment was discarded.
    Rejected(RejectionKind),
}

impl PartOutcome {
    /// Value of the `outcome` label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PartOutcome::Accepted => "accepted",
            PartOutcome::Rejected(_) => "rejected",
        }
    }

    /// Value of the `reason` label.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            PartOutcome::Accepted => "none",
            PartOutcome::Rejected(kind) => kind.as_str(),
        }
    }
}

/// Record a started packet.
#[cfg(feature = "metrics")]
pub fn inc_packets_started() { counter!(PACKETS_STARTED).increment(1); }

/// Record a started packet.
#[cfg(not(feature = "metrics"))]
pub fn inc_packets_started() {}

/// Record a fragment submission with the given outcome.
#[cfg(feature = "metrics")]
pub fn inc_parts(outcome: PartOutcome) {
    counter!(PARTS_TOTAL, "outcome" => outcome.as_str(), "reason" => outcome.reason())
        .increment(1);
}

/// Record a fragment submission with the given outcome.
#[cfg(not(feature = "metrics"))]
pub fn inc_parts(_outcome: PartOutcome) {}
