//! Hash chain used as the draw's pseudo-random stream.
//!
//! The first link is `sha256(seed)`. Every following link hashes the
//! lowercase hex text of the previous digest, not its raw bytes. Each digest
//! is reduced modulo the participant count to give a candidate index.

use std::num::NonZeroU64;

use crate::hash::{digest_mod, sha256};

/// One step of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Zero-based position in the chain.
    pub position: u64,
    pub digest: [u8; 32],
    /// `digest mod participants`.
    pub candidate: u64,
}

impl Link {
    /// Lowercase hex digest, the text hashed into the next link.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Unbounded, deterministic stream of [`Link`]s.
#[derive(Debug, Clone)]
pub struct HashChain {
    modulus: NonZeroU64,
    // Seed bytes for the first link, then the 64-byte hex text of the last
    // digest. Reused in place.
    next_input: Vec<u8>,
    position: u64,
}

impl HashChain {
    /// Start a chain from `seed`.
    pub fn new(seed: &[u8], modulus: NonZeroU64) -> Self {
        Self {
            modulus,
            next_input: seed.to_vec(),
            position: 0,
        }
    }

    /// Produce the next link. The chain never ends.
    pub fn advance(&mut self) -> Link {
        let digest = sha256(&self.next_input);
        let link = Link {
            position: self.position,
            digest,
            candidate: digest_mod(&digest, self.modulus),
        };
        self.next_input.resize(64, 0);
        // 32 bytes always encode into exactly 64 hex characters.
        let _ = hex::encode_to_slice(digest, &mut self.next_input);
        self.position += 1;
        link
    }

    /// Number of links produced so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Iterator for HashChain {
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        Some(self.advance())
    }
}
