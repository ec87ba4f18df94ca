#![doc(html_root_url = "https://docs.rs/packet-receiver/latest")]
//! Public API for the `packet_receiver` library.
//!
//! This crate reassembles logical packets from checksummed fragments. A
//! transport layer starts a packet, submits every fragment it receives for
//! it, and reads back the assembled payloads together with a count of the
//! fragments that were rejected.

pub mod checksum;
pub mod metrics;
pub mod reassembly;
pub mod replay;

pub use checksum::{Checksum, Fnv1a64, StdHash};
pub use reassembly::{
    AssemblyOrder,
    BufferState,
    ControlSum,
    DuplicatePolicy,
    FailureCounts,
    Fragment,
    LogicalPacket,
    PartFrame,
    PartFrameError,
    PartStatus,
    ReassemblyBuffer,
    ReassemblyConfig,
    ReceiveError,
    RejectionKind,
    SequenceId,
    SharedReassemblyBuffer,
};
pub use replay::{ReplayReport, ReplayScript, ScriptError};
