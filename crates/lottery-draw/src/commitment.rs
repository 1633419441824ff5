//! Commit/reveal check for pre-announced draw inputs.
//!
//! Before a round the organizers publish `sha256(message)` where the message
//! names the block height whose hash becomes the seed. After the round they
//! reveal the message, and anyone can check it against the commitment.

use std::fmt;

use crate::error::DrawError;
use crate::hash::sha256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Commitment to `message`.
    pub fn of(message: &str) -> Self {
        Self(sha256(message.as_bytes()))
    }

    /// Parse a published digest, with or without a `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, DrawError> {
        let digits = text.strip_prefix("0x").unwrap_or(text);
        let mut digest = [0u8; 32];
        hex::decode_to_slice(digits, &mut digest).map_err(|e| {
            DrawError::InvalidParameter(format!("commitment {text}: {e}"))
        })?;
        Ok(Self(digest))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Check a revealed message against this commitment.
    pub fn verify(&self, message: &str) -> Result<(), DrawError> {
        let computed = Self::of(message);
        if computed != *self {
            return Err(DrawError::CommitmentMismatch {
                expected: self.to_hex(),
                computed: computed.to_hex(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
