//! Deterministic draw generator.
//!
//! A draw is a pure function of its [`DrawParams`]: the same seed, participant
//! count, draw count, reserved set and first-draw policy always produce the
//! same sorted winner list. Auditors recompute it from the disclosed seed.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chain::{HashChain, Link};
use crate::error::DrawError;

/// Upper bound on consecutive rehashes spent looking for one free index.
///
/// The bound applies per pick and does not scale with the participant count.
/// A pick that leaves `k` free indices out of `N` needs about `N / k`
/// rehashes, so a valid draw that fills nearly all of a pool larger than
/// about 2^24 can fail with [`DrawError::ChainExhausted`]. Raise it with
/// [`DrawParams::with_max_rehashes`] for such draws.
pub const DEFAULT_MAX_REHASHES: u64 = 1 << 24;

/// How the very first candidate of a draw is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstDraw {
    /// Accept the first candidate without a membership check.
    ///
    /// This is how the published rounds were run. If the first candidate
    /// equals a reserved index it becomes a real winner: filtering only drops
    /// the placeholder, so that index stays in the output.
    #[default]
    Unchecked,
    /// Run the first candidate through the same collision loop as every later
    /// pick, so reserved indices are never published.
    Checked,
}

/// Seed bytes that start the hash chain.
///
/// For block-hash seeds this is the `0x`-prefixed hex text itself; the text is
/// hashed, not the decoded 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(Vec<u8>);

impl Seed {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Build a seed from a disclosed block hash (`0x` + 64 hex digits).
    pub fn from_block_hash(text: &str) -> Result<Self, DrawError> {
        let digits = text
            .strip_prefix("0x")
            .ok_or_else(|| DrawError::MalformedBlockHash(format!("{text}: missing 0x prefix")))?;
        let bytes = hex::decode(digits)
            .map_err(|e| DrawError::MalformedBlockHash(format!("{text}: {e}")))?;
        if bytes.len() != 32 {
            return Err(DrawError::MalformedBlockHash(format!(
                "{text}: expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(text.as_bytes().to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Seed {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Inputs of a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawParams {
    pub seed: Seed,
    /// Valid indices are `0..participants`.
    pub participants: u64,
    /// Number of winners to produce.
    pub draws: usize,
    /// Indices pre-seeded as taken and stripped from the output.
    pub reserved: BTreeSet<u64>,
    pub first_draw: FirstDraw,
    pub max_rehashes: u64,
}

impl DrawParams {
    pub fn new(seed: impl Into<Seed>, participants: u64, draws: usize) -> Self {
        Self {
            seed: seed.into(),
            participants,
            draws,
            reserved: BTreeSet::new(),
            first_draw: FirstDraw::default(),
            max_rehashes: DEFAULT_MAX_REHASHES,
        }
    }

    pub fn with_reserved(mut self, reserved: impl IntoIterator<Item = u64>) -> Self {
        self.reserved = reserved.into_iter().collect();
        self
    }

    pub fn with_first_draw(mut self, first_draw: FirstDraw) -> Self {
        self.first_draw = first_draw;
        self
    }

    pub fn with_max_rehashes(mut self, max_rehashes: u64) -> Self {
        self.max_rehashes = max_rehashes;
        self
    }

    /// Check the preconditions that guarantee the draw terminates.
    pub fn validate(&self) -> Result<(), DrawError> {
        if self.seed.is_empty() {
            return Err(DrawError::EmptySeed);
        }
        if self.participants == 0 {
            return Err(DrawError::InvalidParameter(
                "participant count must be positive".to_string(),
            ));
        }
        if self.draws == 0 {
            return Err(DrawError::InvalidParameter(
                "draw count must be positive".to_string(),
            ));
        }
        if self.max_rehashes == 0 {
            return Err(DrawError::InvalidParameter(
                "max_rehashes must be positive".to_string(),
            ));
        }
        if let Some(&out) = self.reserved.iter().find(|&&r| r >= self.participants) {
            return Err(DrawError::InvalidParameter(format!(
                "reserved index {out} is outside 0..{}",
                self.participants
            )));
        }
        let needed = (self.draws as u64).checked_add(self.reserved.len() as u64);
        match needed {
            Some(n) if n <= self.participants => Ok(()),
            _ => Err(DrawError::InvalidParameter(format!(
                "{} draws plus {} reserved exceed {} participants",
                self.draws,
                self.reserved.len(),
                self.participants
            ))),
        }
    }
}

/// One link of the chain as consumed by a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub link: Link,
    /// Whether the candidate became a winner.
    pub accepted: bool,
}

/// Winners plus the audit trail that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Sorted ascending, reserved placeholders removed.
    pub winners: Vec<u64>,
    /// Every link consumed, in chain order.
    pub transcript: Vec<Step>,
}

impl DrawOutcome {
    /// Hashes computed after the one over the seed.
    pub fn rehashes(&self) -> u64 {
        (self.transcript.len() as u64).saturating_sub(1)
    }

    /// Winners in the order they were drawn, before sorting.
    pub fn draw_order(&self) -> Vec<u64> {
        self.transcript
            .iter()
            .filter(|s| s.accepted)
            .map(|s| s.link.candidate)
            .collect()
    }
}

/// Run a draw and return the sorted winner indices.
///
/// Only the drawn indices are kept; chain links are dropped as soon as they
/// are checked.
pub fn draw(params: &DrawParams) -> Result<Vec<u64>, DrawError> {
    run(params, None)
}

/// Run a draw and keep every chain link it consumed.
pub fn draw_with_transcript(params: &DrawParams) -> Result<DrawOutcome, DrawError> {
    let mut transcript = Vec::with_capacity(params.draws.min(1024));
    let winners = run(params, Some(&mut transcript))?;
    Ok(DrawOutcome {
        winners,
        transcript,
    })
}

fn run(
    params: &DrawParams,
    mut transcript: Option<&mut Vec<Step>>,
) -> Result<Vec<u64>, DrawError> {
    params.validate()?;
    let modulus = NonZeroU64::new(params.participants).ok_or_else(|| {
        DrawError::InvalidParameter("participant count must be positive".to_string())
    })?;

    let mut chain = HashChain::new(params.seed.as_bytes(), modulus);
    let mut taken: HashSet<u64> = params.reserved.iter().copied().collect();
    let mut drawn: Vec<u64> = Vec::with_capacity(params.draws.min(1024));

    for pick in 0..params.draws {
        let unchecked = pick == 0 && params.first_draw == FirstDraw::Unchecked;
        let mut streak = 0u64;
        loop {
            let link = chain.advance();
            let candidate = link.candidate;
            let accepted = unchecked || !taken.contains(&candidate);

            if let Some(t) = transcript.as_mut() {
                t.push(Step { link, accepted });
            }

            if accepted {
                if unchecked && params.reserved.contains(&candidate) {
                    warn!(candidate, "unchecked first draw landed on a reserved index");
                }
                taken.insert(candidate);
                drawn.push(candidate);
                break;
            }

            debug!(position = link.position, candidate, "collision, rehashing");
            if streak == params.max_rehashes {
                return Err(DrawError::ChainExhausted {
                    drawn: drawn.len(),
                    rehashes: streak,
                });
            }
            streak += 1;
        }
    }

    // Reserved placeholders only ever lived in `taken`, so filtering them out
    // leaves exactly the drawn indices.
    drawn.sort_unstable();

    info!(
        seed = %params.seed,
        participants = params.participants,
        winners = drawn.len(),
        links = chain.position(),
        "draw complete"
    );

    Ok(drawn)
}
