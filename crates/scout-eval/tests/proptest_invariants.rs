use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scout_eval::{create_shuffled_folds, hit_rate_at_k, ndcg_at_k, precision_recall_f1};

fn fold_case() -> impl Strategy<Value = (Vec<u32>, usize)> {
    (1usize..60).prop_flat_map(|len| (Just((0..len as u32).collect::<Vec<u32>>()), 1..=len))
}

fn keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{0,2}", 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn folds_partition_the_data_exactly((data, n_folds) in fold_case(), seed in any::<u64>()) {
        let folds = create_shuffled_folds(&data, n_folds, &mut StdRng::seed_from_u64(seed))
            .expect("n_folds within bounds");
        prop_assert_eq!(folds.len(), n_folds);

        let mut tested: Vec<u32> = folds.iter().flat_map(|f| f.test.iter().copied()).collect();
        tested.sort_unstable();
        prop_assert_eq!(&tested, &data);

        for fold in &folds {
            prop_assert_eq!(fold.train.len() + fold.test.len(), data.len());
            prop_assert!(fold.train.iter().all(|x| !fold.test.contains(x)));
        }
    }

    #[test]
    fn ndcg_stays_in_unit_interval(predictions in keys(), truth in keys(), k in 0usize..15) {
        let ndcg = ndcg_at_k(&predictions, &truth, k);
        prop_assert!((0.0..=1.0).contains(&ndcg));
    }

    #[test]
    fn hit_rate_and_set_scores_are_bounded(predictions in keys(), truth in keys(), k in 0usize..15) {
        let hit_rate = hit_rate_at_k(&predictions, &truth, k);
        prop_assert!((0.0..=1.0).contains(&hit_rate));

        let scores = precision_recall_f1(&predictions, &truth);
        for v in [scores.precision, scores.recall, scores.f1] {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}
