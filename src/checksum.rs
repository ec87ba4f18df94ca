//! Integrity functions used to validate fragment payloads.
//!
//! A [`Checksum`] must be a pure, deterministic function of the payload
//! bytes. The buffer is generic over it so producers and receivers can agree
//! on any algorithm without touching the reassembly state machine. Plain
//! closures of type `Fn(&[u8]) -> u64` qualify.

use std::hash::{DefaultHasher, Hasher};

use crate::reassembly::ControlSum;

/// Deterministic integrity function over a fragment payload.
pub trait Checksum {
    /// Compute the control sum for `data`.
    fn checksum(&self, data: &[u8]) -> ControlSum;
}

impl<F> Checksum for F
where
    F: Fn(&[u8]) -> u64,
{
    fn checksum(&self, data: &[u8]) -> ControlSum { ControlSum::new(self(data)) }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
///
/// The default checksum. Its output is fixed by the algorithm, so producers
/// in other processes or languages can compute matching control sums.
///
/// # Examples
///
/// ```
/// use packet_receiver::checksum::{Checksum, Fnv1a64};
/// assert_eq!(Fnv1a64.checksum(b"a").get(), 0xaf63_dc4c_8601_ec8c);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fnv1a64;

impl Checksum for Fnv1a64 {
    fn checksum(&self, data: &[u8]) -> ControlSum {
        let hash = data.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
        });
        ControlSum::new(hash)
    }
}

/// Standard library hasher fed the raw payload bytes.
///
/// [`DefaultHasher::new`] uses fixed keys, so results are deterministic for
/// a given build. The algorithm is not guaranteed across Rust releases; only
/// use it when producer and receiver share a binary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StdHash;

impl Checksum for StdHash {
    fn checksum(&self, data: &[u8]) -> ControlSum {
        let mut hasher = DefaultHasher::new();
        hasher.write(data);
        ControlSum::new(hasher.finish())
    }
}
