//! Published competition rounds.
//!
//! A round bundles everything an auditor needs to recompute a draw: the
//! commitment announced beforehand, the revealed message, the block hash seed,
//! the participant count and the list the organizers published.

use tracing::info;

use crate::commitment::Commitment;
use crate::draw::{draw, DrawParams, FirstDraw, Seed};
use crate::error::DrawError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub name: String,
    /// `sha256(reveal)` published before the round.
    pub commitment: String,
    /// Message naming the block height, revealed after the round.
    pub reveal: String,
    pub block_height: u64,
    /// Hash of the block at `block_height`.
    pub block_hash: String,
    pub participants: u64,
    pub draws: usize,
    pub reserved: Vec<u64>,
    pub first_draw: FirstDraw,
    /// Winner indices as published, sorted ascending.
    pub published: Vec<u64>,
}

const ROUND_ONE_PUBLISHED: [u64; 64] = [
    104, 557, 1261, 1363, 1906, 1981, 2067, 2463, 2841, 3233, 3397, 3424, 4163, 4197, 4546, 4571,
    4818, 5027, 5051, 5085, 5093, 5121, 5618, 5709, 5969, 6057, 6279, 6348, 6556, 6562, 6804, 7216,
    7845, 8272, 8303, 8982, 9583, 9833, 10516, 10750, 11105, 11539, 11748, 12284, 12591, 14682,
    14885, 15416, 15532, 15577, 15879, 15921, 16457, 16502, 16785, 16934, 17042, 17811, 17974,
    18959, 20173, 20312, 20912, 20933,
];

impl Round {
    /// Round one of the mining competition (June 15 - 28).
    /// Indices 1, 2 and 3 are excluded from the draw.
    pub fn first() -> Self {
        Self {
            name: "round-1".to_string(),
            commitment: "0x24f7501665d4f59b7f65c0853f8dd2a68fe528d345ffe63721f391eec711c190"
                .to_string(),
            reveal: "N = 77".to_string(),
            block_height: 77,
            block_hash: "0x73ba270324ee87ed8990acbc316380c584dea21a1b8b87f4e8c363595e08225f"
                .to_string(),
            participants: 21737,
            draws: 64,
            reserved: vec![1, 2, 3],
            first_draw: FirstDraw::Unchecked,
            published: ROUND_ONE_PUBLISHED.to_vec(),
        }
    }

    pub fn params(&self) -> Result<DrawParams, DrawError> {
        let seed = Seed::from_block_hash(&self.block_hash)?;
        Ok(DrawParams::new(seed, self.participants, self.draws)
            .with_reserved(self.reserved.iter().copied())
            .with_first_draw(self.first_draw))
    }

    /// Check the reveal against the commitment, recompute the draw and compare
    /// it with the published list. Returns the recomputed winners.
    pub fn verify(&self) -> Result<Vec<u64>, DrawError> {
        Commitment::from_hex(&self.commitment)?.verify(&self.reveal)?;

        let computed = draw(&self.params()?)?;
        if computed != self.published {
            return Err(DrawError::PublishedMismatch {
                published: self.published.clone(),
                computed,
            });
        }

        info!(round = %self.name, winners = computed.len(), "published result verified");
        Ok(computed)
    }
}
