use std::num::NonZeroU64;

use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(data);
    let out = h.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Reduce a digest, read as a big-endian 256-bit integer, modulo `modulus`.
pub fn digest_mod(digest: &[u8; 32], modulus: NonZeroU64) -> u64 {
    let m = modulus.get() as u128;
    digest
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m) as u64
}
