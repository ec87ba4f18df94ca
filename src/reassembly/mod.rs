//! Fragment reassembly for checksummed, packet-scoped fragment streams.
//!
//! A producer starts a logical packet, submits fragments for it, and later
//! reads back the concatenated payload of every packet it started together
//! with a count of rejected fragments. Each sub-module covers one concept;
//! the crate root re-exports the types most callers need.

pub mod buffer;
pub mod config;
pub mod error;
pub mod frame;
pub mod id;
pub mod packet;
pub mod shared;
pub mod stats;

pub use buffer::{BufferState, ReassemblyBuffer};
pub use config::{AssemblyOrder, DuplicatePolicy, ReassemblyConfig};
pub use error::{PartStatus, ReceiveError, RejectionKind};
pub use frame::{MAX_FRAME_LEN, PartFrame, PartFrameError};
pub use id::{ControlSum, SequenceId};
pub use packet::{Fragment, LogicalPacket};
pub use shared::SharedReassemblyBuffer;
pub use stats::FailureCounts;
