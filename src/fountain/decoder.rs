//! Stateful fountain decoder.
//!
//! Ingests parts in any order, deduplicates, and reduces mixed parts against
//! already-known fragments (and against each other) until every fragment of
//! the session is resolved. Reduction is run to a fixed point through a work
//! queue: resolving one fragment can make a previously retained mix
//! reducible, which can resolve another, and so on.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use sha2::{Digest, Sha256};

use crate::core::{DIGEST_SIZE, DecoderError, crc32};

use super::fragment::{join, xor_into};
use super::part::Part;

/// Result of feeding one part to a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// The part was accepted; `newly_resolved` fragments became known.
    ///
    /// A retained mix that could not be reduced yet reports zero.
    Accepted {
        /// Fragments resolved by this part, directly or through reduction.
        newly_resolved: usize,
    },
    /// The part contributed nothing new and was dropped.
    Duplicate,
    /// The part's session-defining fields disagree with the latched session.
    SessionMismatch,
    /// The decoder already reached a terminal state; the part was ignored.
    AlreadyDone,
}

/// Session parameters latched from the first accepted part.
#[derive(Debug, Clone)]
struct Session {
    seq_len: usize,
    message_len: usize,
    checksum: u32,
    digest: [u8; DIGEST_SIZE],
    fragment_len: usize,
}

impl Session {
    fn matches(&self, part: &Part) -> bool {
        self.seq_len == part.seq_len as usize
            && self.message_len == part.message_len as usize
            && self.checksum == part.checksum
            && self.digest == part.digest
            && self.fragment_len == part.data.len()
    }
}

/// Fountain decoder session.
///
/// Construct a fresh decoder per scan; there is intentionally no `reset`, so
/// session latching can never observe stale state.
#[derive(Debug, Default)]
pub struct FountainDecoder {
    session: Option<Session>,
    /// Fragments fully resolved, by fragment index.
    known: BTreeMap<usize, Vec<u8>>,
    /// Retained mixed parts keyed by their still-unknown index set.
    mixed: BTreeMap<BTreeSet<usize>, Vec<u8>>,
    /// Parts awaiting (re-)reduction.
    queue: VecDeque<(BTreeSet<usize>, Vec<u8>)>,
    received_parts: usize,
    result: Option<Result<Vec<u8>, DecoderError>>,
}

impl FountainDecoder {
    /// Create an empty decoder; the first accepted part defines the session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one part.
    ///
    /// Never fails: parts from other sessions, duplicates and post-completion
    /// parts are absorbed without touching decoder state. The only terminal
    /// error is a whole-payload verification failure, reported through
    /// [`result`](Self::result).
    pub fn receive(&mut self, part: &Part) -> ReceiveOutcome {
        if self.result.is_some() {
            return ReceiveOutcome::AlreadyDone;
        }

        match &self.session {
            Some(session) if !session.matches(part) => return ReceiveOutcome::SessionMismatch,
            Some(_) => {}
            None => {
                if part.seq_len == 0 || part.data.is_empty() {
                    return ReceiveOutcome::SessionMismatch;
                }
                self.session = Some(Session {
                    seq_len: part.seq_len as usize,
                    message_len: part.message_len as usize,
                    checksum: part.checksum,
                    digest: part.digest,
                    fragment_len: part.data.len(),
                });
            }
        }

        let mut indexes = part.fragment_indexes();
        let mut data = part.data.clone();
        self.reduce_by_known(&mut indexes, &mut data);

        if indexes.is_empty() {
            return ReceiveOutcome::Duplicate;
        }
        if indexes.len() > 1 && self.mixed.contains_key(&indexes) {
            return ReceiveOutcome::Duplicate;
        }

        let before = self.known.len();
        self.queue.push_back((indexes, data));
        self.run_reduction();
        let newly_resolved = self.known.len() - before;

        self.received_parts += 1;
        self.try_finalize();
        ReceiveOutcome::Accepted { newly_resolved }
    }

    /// XOR out every already-known fragment referenced by `indexes`.
    fn reduce_by_known(&self, indexes: &mut BTreeSet<usize>, data: &mut [u8]) {
        let resolved: Vec<usize> = indexes
            .iter()
            .copied()
            .filter(|i| self.known.contains_key(i))
            .collect();
        for i in resolved {
            xor_into(data, &self.known[&i]);
            indexes.remove(&i);
        }
    }

    /// Drain the work queue, running elimination to a fixed point.
    fn run_reduction(&mut self) {
        while let Some((mut indexes, mut data)) = self.queue.pop_front() {
            self.reduce_by_known(&mut indexes, &mut data);

            match indexes.len() {
                0 => {}
                1 => self.resolve_fragment(&indexes, data),
                _ => self.retain_mixed(indexes, data),
            }
        }
    }

    /// Record a resolved fragment and requeue every retained mix that
    /// referenced it.
    fn resolve_fragment(&mut self, indexes: &BTreeSet<usize>, data: Vec<u8>) {
        let Some(&index) = indexes.first() else {
            return;
        };
        if self.known.contains_key(&index) {
            return;
        }
        self.known.insert(index, data);

        let affected: Vec<BTreeSet<usize>> = self
            .mixed
            .keys()
            .filter(|k| k.contains(&index))
            .cloned()
            .collect();
        for key in affected {
            if let Some(mix) = self.mixed.remove(&key) {
                self.queue.push_back((key, mix));
            }
        }
    }

    /// Retain a still-mixed part, first reducing it by stored strict subsets
    /// and then reducing stored strict supersets by it.
    fn retain_mixed(&mut self, mut indexes: BTreeSet<usize>, mut data: Vec<u8>) {
        loop {
            let subset = self
                .mixed
                .keys()
                .find(|k| k.len() < indexes.len() && k.is_subset(&indexes))
                .cloned();
            let Some(key) = subset else { break };
            xor_into(&mut data, &self.mixed[&key]);
            for i in &key {
                indexes.remove(i);
            }
        }

        if indexes.len() <= 1 {
            // Reduced all the way down; reprocess as a fragment (or drop).
            self.queue.push_back((indexes, data));
            return;
        }
        if self.mixed.contains_key(&indexes) {
            return;
        }

        let supersets: Vec<BTreeSet<usize>> = self
            .mixed
            .keys()
            .filter(|k| k.len() > indexes.len() && indexes.is_subset(k))
            .cloned()
            .collect();
        for key in supersets {
            if let Some(mut mix) = self.mixed.remove(&key) {
                xor_into(&mut mix, &data);
                let remainder: BTreeSet<usize> = key.difference(&indexes).copied().collect();
                self.queue.push_back((remainder, mix));
            }
        }

        self.mixed.insert(indexes, data);
    }

    /// Reassemble and verify once every fragment is known.
    fn try_finalize(&mut self) {
        let Some(session) = &self.session else { return };
        if self.known.len() < session.seq_len {
            return;
        }

        let fragments: Vec<Vec<u8>> = self.known.values().cloned().collect();
        let message = join(&fragments, session.message_len);

        let actual = crc32(&message);
        let verdict = if actual != session.checksum {
            Err(DecoderError::ChecksumMismatch {
                expected: session.checksum,
                actual,
            })
        } else if <[u8; DIGEST_SIZE]>::from(Sha256::digest(&message)) != session.digest {
            Err(DecoderError::DigestMismatch)
        } else {
            Ok(message)
        };

        self.mixed.clear();
        self.queue.clear();
        self.result = Some(verdict);
    }

    /// Terminal result: `None` while gathering, then the reassembled payload
    /// or the verification failure.
    #[must_use]
    pub fn result(&self) -> Option<&Result<Vec<u8>, DecoderError>> {
        self.result.as_ref()
    }

    /// Whether the payload was reassembled and verified.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.result, Some(Ok(_)))
    }

    /// Whether the session ended in terminal verification failure.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.result, Some(Err(_)))
    }

    /// Number of pure fragments the session expects, once known.
    #[must_use]
    pub fn expected_part_count(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.seq_len)
    }

    /// Parts accepted so far (duplicates and mismatches excluded).
    #[must_use]
    pub fn received_part_count(&self) -> usize {
        self.received_parts
    }

    /// Fraction of fragments resolved, in `[0.0, 1.0]`.
    ///
    /// Defined as soon as the session latches, 0 before. Non-decreasing for
    /// the lifetime of the decoder; cheap and side-effect free.
    #[must_use]
    pub fn estimated_percent_complete(&self) -> f64 {
        match &self.session {
            Some(session) => self.known.len() as f64 / session.seq_len as f64,
            None => 0.0,
        }
    }
}
