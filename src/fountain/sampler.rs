//! Deterministic fragment index selection.
//!
//! For sequence numbers up to the fragment count the selection is the
//! matching singleton, so a receiver that sees every part once in order
//! reconstructs with zero algebra. Beyond that, the part's index set is drawn
//! pseudo-randomly from a seed of `(seq_num, checksum)`: any party holding a
//! part header can recompute exactly which fragments its payload mixes.

use std::collections::BTreeSet;

use super::xoshiro::Xoshiro256;

/// Pick a mix degree in `1..=seq_len` with weight `1/k` for degree `k`.
///
/// The low bias approximates a Soliton distribution: most mixed parts combine
/// few fragments, keeping receiver-side reduction cheap, while occasional
/// high-degree parts cover stragglers.
pub fn choose_degree(seq_len: usize, rng: &mut Xoshiro256) -> usize {
    let total: f64 = (1..=seq_len).map(|k| 1.0 / k as f64).sum();
    let mut target = rng.next_f64() * total;
    for degree in 1..=seq_len {
        target -= 1.0 / degree as f64;
        if target <= 0.0 {
            return degree;
        }
    }
    seq_len
}

/// The set of fragment indexes mixed into part `seq_num` of a session.
///
/// `seq_num` is 1-based; `checksum` is the whole-message CRC-32 every part of
/// the session carries. Deterministic: the same inputs always yield the same
/// set, on both sides of the channel.
#[must_use]
pub fn choose_fragment_indexes(seq_num: u32, seq_len: usize, checksum: u32) -> BTreeSet<usize> {
    debug_assert!(seq_num >= 1);
    debug_assert!(seq_len >= 1);
    if (seq_num as u64) <= seq_len as u64 {
        return BTreeSet::from([(seq_num - 1) as usize]);
    }

    let mut seed = [0u8; 8];
    seed[..4].copy_from_slice(&seq_num.to_be_bytes());
    seed[4..].copy_from_slice(&checksum.to_be_bytes());
    let mut rng = Xoshiro256::from_seed(&seed);

    let degree = choose_degree(seq_len, &mut rng);

    // Removal shuffle: draw `degree` distinct indexes from 0..seq_len.
    let mut remaining: Vec<usize> = (0..seq_len).collect();
    let mut indexes = BTreeSet::new();
    for _ in 0..degree {
        let pick = rng.next_int(0, remaining.len() - 1);
        indexes.insert(remaining.remove(pick));
    }
    indexes
}
