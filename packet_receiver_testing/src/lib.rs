//! Shared fixtures for `packet_receiver` integration tests.
//!
//! Provides a serialised handle to the global [`logtest`] logger, helpers
//! for building valid and corrupted fragments, and a snapshot reader for
//! `metrics-util`'s debugging recorder.
//!
//! ```rust
//! use packet_receiver_testing::{corrupt, sealed_sum};
//!
//! let sum = sealed_sum("AB");
//! assert_ne!(corrupt(sum), sum);
//! ```

pub mod logging;
pub mod metrics;
pub mod parts;

pub use logging::{LoggerHandle, logger};
pub use metrics::{counter_value, debugging_recorder_setup};
pub use parts::{corrupt, open_buffer, sealed_sum, submit_sealed};
