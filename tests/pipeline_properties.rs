//! Property-based tests for IntervalPipeline
//!
//! Chains several stages and checks them against the scalar path.

use almanac_map::core::{
    build_initial_intervals, is_disjoint, lowest_start, total_length, Interval, IntervalPipeline,
    PipelineError, Rule, RuleTable,
};
use proptest::prelude::*;

/// Generate a table with arbitrary, possibly overlapping rules
fn arb_table() -> impl Strategy<Value = RuleTable> {
    prop::collection::vec((0i64..1500, 0i64..1500, 1i64..150), 0..6).prop_map(|raw| {
        let rules = raw
            .into_iter()
            .map(|(dest, src, len)| Rule::new(dest, src, len).unwrap())
            .collect();
        RuleTable::new("arb", rules)
    })
}

/// Generate a table that permutes consecutive blocks of `[base, base + n)`
///
/// Such a table is a bijection, like the tables of a real almanac, so
/// disjoint inputs must stay disjoint.
fn arb_permutation_table() -> impl Strategy<Value = RuleTable> {
    (0i64..500, prop::collection::vec(1i64..60, 1..8))
        .prop_flat_map(|(base, lengths)| {
            let order: Vec<usize> = (0..lengths.len()).collect();
            (Just(base), Just(lengths), Just(order).prop_shuffle(), any::<bool>())
        })
        .prop_map(|(base, lengths, order, reverse_listing)| {
            let mut sources = Vec::with_capacity(lengths.len());
            let mut cursor = base;
            for &len in &lengths {
                sources.push(cursor);
                cursor += len;
            }

            let mut rules = Vec::with_capacity(lengths.len());
            let mut dest = base;
            for &block in &order {
                rules.push(Rule::new(dest, sources[block], lengths[block]).unwrap());
                dest += lengths[block];
            }
            if reverse_listing {
                rules.reverse();
            }
            RuleTable::new("perm", rules)
        })
}

/// Generate pairwise disjoint intervals
fn arb_disjoint_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec((0i64..40, 1i64..80), 1..8).prop_map(|gaps| {
        let mut cursor = 0;
        gaps.into_iter()
            .map(|(gap, len)| {
                let iv = Interval::new(cursor + gap, len).unwrap();
                cursor = iv.end();
                iv
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Total length survives any number of stages
    #[test]
    fn prop_run_preserves_coverage(
        tables in prop::collection::vec(arb_table(), 0..5),
        seeds in arb_disjoint_intervals(),
    ) {
        let pipeline = IntervalPipeline::new(tables);
        let out = pipeline.run(seeds.clone());
        prop_assert_eq!(total_length(&out), total_length(&seeds));
    }

    /// Range pipeline and scalar pipeline agree on every single value
    #[test]
    fn prop_oracle_agreement(
        tables in prop::collection::vec(arb_table(), 0..5),
        x in 0i64..2000,
    ) {
        let pipeline = IntervalPipeline::new(tables);
        let out = pipeline.run(vec![Interval::point(x).unwrap()]);
        prop_assert_eq!(lowest_start(&out), Ok(pipeline.map_value(x)));
    }

    /// Bijective stages keep disjoint sets disjoint
    #[test]
    fn prop_permutation_stages_stay_disjoint(
        tables in prop::collection::vec(arb_permutation_table(), 1..5),
        seeds in arb_disjoint_intervals(),
    ) {
        let pipeline = IntervalPipeline::new(tables);
        let out = pipeline.run(seeds.clone());
        prop_assert!(is_disjoint(&out), "overlap in {:?}", out);
        prop_assert_eq!(total_length(&out), total_length(&seeds));
    }

    /// Lowest start of a range run equals the brute-force scalar minimum
    #[test]
    fn prop_lowest_matches_brute_force(
        tables in prop::collection::vec(arb_table(), 1..4),
        seeds in arb_disjoint_intervals(),
    ) {
        let pipeline = IntervalPipeline::new(tables);
        let brute = seeds
            .iter()
            .flat_map(|iv| iv.start()..iv.end())
            .map(|x| pipeline.map_value(x))
            .min();
        prop_assert_eq!(lowest_start(&pipeline.run(seeds)).ok(), brute);
    }

    /// Parallel run produces the same multiset as the sequential one
    #[test]
    fn prop_parallel_matches_sequential(
        tables in prop::collection::vec(arb_table(), 0..4),
        seeds in arb_disjoint_intervals(),
        threads in 1usize..4,
    ) {
        let pipeline = IntervalPipeline::new(tables);
        let mut sequential = pipeline.run(seeds.clone());
        let mut parallel = pipeline.run_parallel(seeds, threads).unwrap();
        sequential.sort();
        parallel.sort();
        prop_assert_eq!(sequential, parallel);
    }
}

#[test]
fn test_empty_pipeline_returns_input() {
    let seeds = build_initial_intervals(&[79, 14, 55, 13]).unwrap();
    assert_eq!(IntervalPipeline::default().run(seeds.clone()), seeds);
}

#[test]
fn test_lowest_start_on_empty_set_fails() {
    let out = IntervalPipeline::default().run(Vec::new());
    assert_eq!(lowest_start(&out), Err(PipelineError::EmptyIntervalSet));
}

#[test]
fn test_build_initial_intervals_errors() {
    assert_eq!(build_initial_intervals(&[1, 2, 3]), Err(PipelineError::UnpairedSeed(3)));
    assert_eq!(
        build_initial_intervals(&[i64::MAX, 5]),
        Err(PipelineError::InvalidInterval { start: i64::MAX, length: 5 })
    );
}
