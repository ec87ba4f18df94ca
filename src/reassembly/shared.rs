//! Lock-protected handle for driving one buffer from several threads.
//!
//! Mutating calls hold the write lock for their whole duration, so fragments
//! keep their insertion order and readers never observe a half-appended
//! fragment. Queries share the read lock and run alongside each other.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;

use super::{ControlSum, FailureCounts, PartStatus, ReassemblyBuffer, ReceiveError, SequenceId};
use crate::checksum::{Checksum, Fnv1a64};

/// Cloneable, thread-safe handle to a [`ReassemblyBuffer`].
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use packet_receiver::reassembly::{ReassemblyBuffer, SharedReassemblyBuffer};
///
/// let shared = SharedReassemblyBuffer::new(ReassemblyBuffer::new());
/// let producer = shared.clone();
/// thread::spawn(move || {
///     producer.with_write(|buffer| {
///         buffer.start_packet();
///         let sum = buffer.checksum_of(b"hi");
///         buffer.receive_part(0_u16, sum, "hi");
///     });
/// })
/// .join()
/// .expect("producer thread");
///
/// assert_eq!(shared.collected_packets(), vec!["hi"]);
/// ```
#[derive(Debug)]
pub struct SharedReassemblyBuffer<C = Fnv1a64> {
    inner: Arc<RwLock<ReassemblyBuffer<C>>>,
}

impl<C> Clone for SharedReassemblyBuffer<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SharedReassemblyBuffer {
    fn default() -> Self { Self::new(ReassemblyBuffer::new()) }
}

impl<C> From<ReassemblyBuffer<C>> for SharedReassemblyBuffer<C> {
    fn from(buffer: ReassemblyBuffer<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(buffer)),
        }
    }
}

impl<C: Checksum> SharedReassemblyBuffer<C> {
    /// Wrap `buffer` for shared use.
    #[must_use]
    pub fn new(buffer: ReassemblyBuffer<C>) -> Self { Self::from(buffer) }

    /// See [`ReassemblyBuffer::start_packet`].
    pub fn start_packet(&self) { self.write().start_packet(); }

    /// See [`ReassemblyBuffer::receive_part`].
    pub fn receive_part(
        &self,
        sequence_id: impl Into<SequenceId>,
        control_sum: impl Into<ControlSum>,
        data: impl Into<Bytes>,
    ) -> bool {
        self.write().receive_part(sequence_id, control_sum, data)
    }

    /// See [`ReassemblyBuffer::submit`].
    ///
    /// # Errors
    ///
    /// Returns the rejection reported by the inner buffer.
    pub fn submit(
        &self,
        sequence_id: impl Into<SequenceId>,
        control_sum: impl Into<ControlSum>,
        data: impl Into<Bytes>,
    ) -> Result<PartStatus, ReceiveError> {
        self.write().submit(sequence_id, control_sum, data)
    }

    /// Run `f` while holding the write lock.
    ///
    /// Use this to start a packet and submit its fragments without another
    /// producer interleaving a `start_packet` call.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ReassemblyBuffer<C>) -> R) -> R {
        f(&mut self.write())
    }

    /// Run `f` while holding the read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&ReassemblyBuffer<C>) -> R) -> R { f(&self.read()) }

    /// See [`ReassemblyBuffer::collected_packets`].
    #[must_use]
    pub fn collected_packets(&self) -> Vec<Bytes> { self.read().collected_packets() }

    /// See [`ReassemblyBuffer::failed_parts`].
    #[must_use]
    pub fn failed_parts(&self) -> u64 { self.read().failed_parts() }

    /// See [`ReassemblyBuffer::failure_counts`].
    #[must_use]
    pub fn failure_counts(&self) -> FailureCounts { self.read().failure_counts() }

    // Every buffer operation is total, so a panic elsewhere cannot leave the
    // state half-updated; poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, ReassemblyBuffer<C>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ReassemblyBuffer<C>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
