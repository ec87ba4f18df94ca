//! Fragment and packet records owned by the reassembly buffer.

use bytes::{Bytes, BytesMut};

use super::{AssemblyOrder, DuplicatePolicy, PartStatus, SequenceId};

/// One accepted unit of a logical packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    sequence_id: SequenceId,
    payload: Bytes,
}

impl Fragment {
    /// Construct a new [`Fragment`].
    #[must_use]
    pub fn new(sequence_id: SequenceId, payload: impl Into<Bytes>) -> Self {
        Self {
            sequence_id,
            payload: payload.into(),
        }
    }

    /// Identifier supplied by the producer.
    #[must_use]
    pub const fn sequence_id(&self) -> SequenceId { self.sequence_id }

    /// Borrow the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &Bytes { &self.payload }

    /// Consume the fragment, returning the owned payload.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }
}

/// Fragments accepted for one started packet, in acceptance order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogicalPacket {
    fragments: Vec<Fragment>,
}

impl LogicalPacket {
    /// Borrow the accepted fragments in acceptance order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] { &self.fragments }

    /// Number of stored fragments.
    #[must_use]
    pub fn len(&self) -> usize { self.fragments.len() }

    /// Whether no fragment has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.fragments.is_empty() }

    /// Total payload bytes across all stored fragments.
    #[must_use]
    pub fn payload_len(&self) -> usize { self.fragments.iter().map(|f| f.payload.len()).sum() }

    /// Concatenate the stored payloads using `order`.
    ///
    /// A packet holding a single fragment returns that payload without
    /// copying.
    #[must_use]
    pub fn assemble(&self, order: AssemblyOrder) -> Bytes {
        match self.fragments.as_slice() {
            [] => Bytes::new(),
            [only] => only.payload.clone(),
            fragments => {
                let mut ordered: Vec<&Fragment> = fragments.iter().collect();
                if order == AssemblyOrder::SequenceId {
                    ordered.sort_by_key(|fragment| fragment.sequence_id);
                }
                let mut buffer = BytesMut::with_capacity(self.payload_len());
                for fragment in ordered {
                    buffer.extend_from_slice(&fragment.payload);
                }
                buffer.freeze()
            }
        }
    }

    pub(crate) fn accept(&mut self, fragment: Fragment, duplicates: DuplicatePolicy) -> PartStatus {
        if duplicates == DuplicatePolicy::Replace
            && let Some(existing) = self
                .fragments
                .iter_mut()
                .find(|existing| existing.sequence_id == fragment.sequence_id)
        {
            existing.payload = fragment.payload;
            return PartStatus::Replaced;
        }
        self.fragments.push(fragment);
        PartStatus::Appended
    }
}
