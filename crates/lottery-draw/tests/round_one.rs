//! Recompute the round-one lottery from its disclosed inputs.

use lottery_draw::{
    draw, draw_with_transcript, Commitment, DrawConfig, DrawParams, FirstDraw, Round, Seed,
};

const BLOCK_77_HASH: &str = "0x73ba270324ee87ed8990acbc316380c584dea21a1b8b87f4e8c363595e08225f";

const PUBLISHED: [u64; 64] = [
    104, 557, 1261, 1363, 1906, 1981, 2067, 2463, 2841, 3233, 3397, 3424, 4163, 4197, 4546, 4571,
    4818, 5027, 5051, 5085, 5093, 5121, 5618, 5709, 5969, 6057, 6279, 6348, 6556, 6562, 6804, 7216,
    7845, 8272, 8303, 8982, 9583, 9833, 10516, 10750, 11105, 11539, 11748, 12284, 12591, 14682,
    14885, 15416, 15532, 15577, 15879, 15921, 16457, 16502, 16785, 16934, 17042, 17811, 17974,
    18959, 20173, 20312, 20912, 20933,
];

#[test]
fn reproduces_published_list() {
    let params = DrawParams::new(Seed::from_block_hash(BLOCK_77_HASH).unwrap(), 21737, 64)
        .with_reserved([1, 2, 3]);
    assert_eq!(draw(&params).unwrap(), PUBLISHED.to_vec());
}

#[test]
fn published_run_had_no_collisions() {
    let params = DrawParams::new(BLOCK_77_HASH, 21737, 64).with_reserved([1, 2, 3]);
    let outcome = draw_with_transcript(&params).unwrap();

    assert_eq!(outcome.transcript.len(), 64);
    assert!(outcome.transcript.iter().all(|s| s.accepted));
    assert_eq!(outcome.rehashes(), 63);

    let checked = params.clone().with_first_draw(FirstDraw::Checked);
    assert_eq!(draw(&checked).unwrap(), outcome.winners);
}

#[test]
fn commitment_and_round_record_agree() {
    let round = Round::first();
    assert_eq!(round.block_hash, BLOCK_77_HASH);
    assert_eq!(round.block_height, 77);
    assert!(Commitment::from_hex(&round.commitment)
        .unwrap()
        .verify(&round.reveal)
        .is_ok());
    assert_eq!(round.verify().unwrap(), PUBLISHED.to_vec());
}

#[test]
fn default_config_runs_round_one() {
    let config = DrawConfig::default();
    config.validate().unwrap();
    let winners = draw(&config.params()).unwrap();
    assert_eq!(Some(winners), config.published);
}

#[test]
fn output_format_matches_publication() {
    let winners = draw(&DrawConfig::default().params()).unwrap();
    let printed = format!("{:?}", winners);
    assert!(printed.starts_with("[104, 557, 1261, "));
    assert!(printed.ends_with(", 20912, 20933]"));
}
