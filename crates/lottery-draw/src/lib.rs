#![forbid(unsafe_code)]

//! lottery-draw: deterministic, publicly reproducible lottery draws
//!
//! Winners are derived from a disclosed seed (a block hash) by iterated
//! SHA-256 hashing. Anyone holding the seed and the participant count can
//! recompute the published list bit for bit.

pub mod chain;
pub mod commitment;
pub mod config;
pub mod draw;
pub mod error;
pub mod hash;
pub mod round;

#[cfg(test)]
mod proptests;

pub use commitment::Commitment;
pub use config::{ConfigError, DrawConfig};
pub use draw::{draw, draw_with_transcript, DrawOutcome, DrawParams, FirstDraw, Seed, Step};
pub use error::DrawError;
pub use round::Round;
