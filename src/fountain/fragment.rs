//! Fragment codec: splitting a message into fixed-size fragments and
//! XOR-mixing fragment subsets.
//!
//! XOR is its own inverse, so a mixed fragment can later be algebraically
//! reduced against known fragments on the receiving side.

use std::collections::BTreeSet;

/// Pick the per-fragment length for a message, bounded by `max_fragment_len`.
///
/// The fragment count is fixed first (`ceil(len / max)`), then the length is
/// spread evenly across that count so the last fragment carries as little
/// zero padding as possible. An empty message still yields length 1 so that
/// every session has at least one fragment.
#[must_use]
pub fn fragment_length(message_len: usize, max_fragment_len: usize) -> usize {
    debug_assert!(max_fragment_len >= 1);
    if message_len == 0 {
        return 1;
    }
    let count = message_len.div_ceil(max_fragment_len);
    message_len.div_ceil(count)
}

/// Number of fragments a message splits into, never less than one.
#[must_use]
pub fn fragment_count(message_len: usize, fragment_len: usize) -> usize {
    debug_assert!(fragment_len >= 1);
    message_len.div_ceil(fragment_len).max(1)
}

/// Split `message` into equal-length fragments, zero-padding the tail.
#[must_use]
pub fn split(message: &[u8], fragment_len: usize) -> Vec<Vec<u8>> {
    let count = fragment_count(message.len(), fragment_len);
    let mut padded = message.to_vec();
    padded.resize(count * fragment_len, 0);
    padded.chunks(fragment_len).map(<[u8]>::to_vec).collect()
}

/// Reassemble fragments in order and truncate the zero padding back to
/// `message_len`.
#[must_use]
pub fn join(fragments: &[Vec<u8>], message_len: usize) -> Vec<u8> {
    let mut message: Vec<u8> = fragments.iter().flatten().copied().collect();
    message.truncate(message_len);
    message
}

/// XOR the fragments selected by `indexes` into a single mixed fragment.
///
/// All fragments share one length; the result has that same length. For a
/// singleton index set this is simply a copy of the selected fragment.
#[must_use]
pub fn mix(fragments: &[Vec<u8>], indexes: &BTreeSet<usize>) -> Vec<u8> {
    let mut mixed = vec![0u8; fragments.first().map_or(0, Vec::len)];
    for &index in indexes {
        xor_into(&mut mixed, &fragments[index]);
    }
    mixed
}

/// XOR `source` into `target` byte-wise. Both slices must be equal length.
pub fn xor_into(target: &mut [u8], source: &[u8]) {
    debug_assert_eq!(target.len(), source.len());
    for (t, s) in target.iter_mut().zip(source) {
        *t ^= s;
    }
}
