
#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    use crate::chain::HashChain;
    use crate::draw::{draw, draw_with_transcript, DrawParams, FirstDraw};
    use crate::error::DrawError;

    fn seed_strategy() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 1..64)
    }

    fn policy_strategy() -> impl Strategy<Value = FirstDraw> {
        prop_oneof![Just(FirstDraw::Unchecked), Just(FirstDraw::Checked)]
    }

    proptest! {
        #[test]
        fn test_draw_determinism(
            seed in seed_strategy(),
            participants in 16u64..5000,
            draws in 1usize..12,
            policy in policy_strategy()
        ) {
            let params = DrawParams::new(seed, participants, draws)
                .with_reserved([1, 2, 3])
                .with_first_draw(policy);
            let a = draw_with_transcript(&params).unwrap();
            let b = draw_with_transcript(&params).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn test_winners_unique_sorted_in_range(
            seed in seed_strategy(),
            participants in 16u64..5000,
            draws in 1usize..12,
            policy in policy_strategy()
        ) {
            let params = DrawParams::new(seed, participants, draws)
                .with_reserved([1, 2, 3])
                .with_first_draw(policy);
            let winners = draw(&params).unwrap();

            prop_assert_eq!(winners.len(), draws);
            prop_assert!(winners.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(winners.iter().all(|&w| w < participants));
        }

        #[test]
        fn test_checked_never_publishes_reserved(
            seed in seed_strategy(),
            participants in 8u64..64,
            draws in 1usize..4,
            reserved in prop::collection::btree_set(0u64..8, 0..4)
        ) {
            let params = DrawParams::new(seed, participants, draws)
                .with_reserved(reserved.iter().copied())
                .with_first_draw(FirstDraw::Checked);
            let winners = draw(&params).unwrap();
            prop_assert!(winners.iter().all(|w| !reserved.contains(w)));
        }

        #[test]
        fn test_unchecked_only_first_draw_may_hit_reserved(
            seed in seed_strategy(),
            participants in 8u64..64,
            draws in 1usize..4,
            reserved in prop::collection::btree_set(0u64..8, 0..4)
        ) {
            let params = DrawParams::new(seed.clone(), participants, draws)
                .with_reserved(reserved.iter().copied());
            let outcome = draw_with_transcript(&params).unwrap();
            let order = outcome.draw_order();

            prop_assert!(order[1..].iter().all(|w| !reserved.contains(w)));
            let modulus = std::num::NonZeroU64::new(participants).unwrap();
            let first = HashChain::new(&seed, modulus).next().unwrap();
            prop_assert_eq!(order[0], first.candidate);
        }

        #[test]
        fn test_full_capacity_takes_every_free_index(
            seed in seed_strategy(),
            participants in 4u64..40,
        ) {
            let reserved: BTreeSet<u64> = [1, 2, 3].into_iter().collect();
            let draws = (participants - 3) as usize;
            let params = DrawParams::new(seed, participants, draws)
                .with_reserved(reserved.iter().copied())
                .with_first_draw(FirstDraw::Checked);
            let winners = draw(&params).unwrap();
            let expected: Vec<u64> = (0..participants).filter(|i| !reserved.contains(i)).collect();
            prop_assert_eq!(winners, expected);
        }

        #[test]
        fn test_over_capacity_rejected(
            seed in seed_strategy(),
            participants in 4u64..1000,
            extra in 1usize..10
        ) {
            let draws = participants as usize - 3 + extra;
            let params = DrawParams::new(seed, participants, draws).with_reserved([1, 2, 3]);
            prop_assert!(matches!(draw(&params), Err(DrawError::InvalidParameter(_))));
        }
    }
}
