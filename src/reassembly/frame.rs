//! Boundary codec for carrying fragments inside transport frames.
//!
//! A transport collaborator that receives fragments as opaque byte frames can
//! decode them into a [`PartFrame`] and hand the result to
//! [`ReassemblyBuffer::submit_frame`](crate::reassembly::ReassemblyBuffer::submit_frame).
//! Decoding failures belong to the transport; they never reach the buffer's
//! rejection counters.

use bincode::{
    Decode,
    Encode,
    config,
    error::{DecodeError, EncodeError},
};
use thiserror::Error;

use super::{ControlSum, SequenceId};
use crate::checksum::Checksum;

/// Upper bound, in bytes, on the input [`PartFrame::decode`] will read.
///
/// Length prefixes claiming more than this fail to decode instead of
/// allocating the claimed size.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Errors produced while encoding or decoding a [`PartFrame`].
#[derive(Debug, Error)]
pub enum PartFrameError {
    /// Serialisation failed.
    #[error("failed to encode part frame: {0}")]
    Encode(#[from] EncodeError),
    /// The bytes are not a valid part frame.
    #[error("failed to decode part frame: {0}")]
    Decode(#[from] DecodeError),
    /// The frame decoded but left bytes unread.
    #[error("part frame has {trailing} trailing bytes after {consumed} consumed")]
    TrailingBytes {
        /// Bytes consumed by the decoded frame.
        consumed: usize,
        /// Bytes left over.
        trailing: usize,
    },
}

/// A single fragment as carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct PartFrame {
    /// Identifier of the fragment within its packet.
    pub sequence_id: SequenceId,
    /// Control sum claimed by the producer.
    pub control_sum: ControlSum,
    /// Fragment payload.
    pub payload: Vec<u8>,
}

impl PartFrame {
    /// Construct a frame from its raw fields.
    #[must_use]
    pub fn new(sequence_id: SequenceId, control_sum: ControlSum, payload: Vec<u8>) -> Self {
        Self {
            sequence_id,
            control_sum,
            payload,
        }
    }

    /// Construct a frame whose control sum is computed with `checksum`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packet_receiver::{
    ///     checksum::Fnv1a64,
    ///     reassembly::{PartFrame, ReassemblyBuffer, SequenceId},
    /// };
    ///
    /// let frame = PartFrame::seal(&Fnv1a64, SequenceId::new(3), b"hello".to_vec());
    /// let mut buffer = ReassemblyBuffer::new();
    /// buffer.start_packet();
    /// assert!(buffer.submit_frame(frame).is_ok());
    /// ```
    #[must_use]
    pub fn seal(checksum: &impl Checksum, sequence_id: SequenceId, payload: Vec<u8>) -> Self {
        let control_sum = checksum.checksum(&payload);
        Self::new(sequence_id, control_sum, payload)
    }

    /// Encode the frame with bincode's standard configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PartFrameError::Encode`] if serialisation fails.
    pub fn encode(&self) -> Result<Vec<u8>, PartFrameError> {
        Ok(bincode::encode_to_vec(self, config::standard())?)
    }

    /// Decode a frame that occupies all of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PartFrameError::Decode`] for malformed input, including
    /// frames that claim more than [`MAX_FRAME_LEN`] bytes, and
    /// [`PartFrameError::TrailingBytes`] when `bytes` holds more than one
    /// frame.
    pub fn decode(bytes: &[u8]) -> Result<Self, PartFrameError> {
        let config = config::standard().with_limit::<MAX_FRAME_LEN>();
        let (frame, consumed) = bincode::decode_from_slice(bytes, config)?;
        if consumed != bytes.len() {
            return Err(PartFrameError::TrailingBytes {
                consumed,
                trailing: bytes.len() - consumed,
            });
        }
        Ok(frame)
    }
}
