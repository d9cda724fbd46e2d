//! Scenario and property tests for the analysis filter.

use std::collections::HashSet;

use geomon_core::{Analysis, AnalysisFilter, DataSeries, DataSeriesContext, Filter, Temporality};
use proptest::prelude::*;

fn series(id: u64, temporality: Temporality, data_sets: &[u64]) -> DataSeries {
    DataSeries::new(id, format!("DS{id}"), temporality, data_sets.iter().copied())
}

fn run(analyses: &[Analysis], data_series: &[DataSeries]) -> Vec<DataSeries> {
    AnalysisFilter::new().apply(analyses, &DataSeriesContext::new(data_series))
}

#[test]
fn test_static_series_excluded_even_when_id_matches() {
    let data_series = vec![
        series(1, Temporality::Dynamic, &[10]),
        series(2, Temporality::Static, &[20]),
    ];

    let output = run(&[Analysis::new(1, "a", 20)], &data_series);
    assert!(output.is_empty());
}

#[test]
fn test_duplicate_data_set_ids_across_series() {
    let data_series = vec![
        series(1, Temporality::Dynamic, &[1]),
        series(2, Temporality::Dynamic, &[1]),
    ];
    let analyses = vec![Analysis::new(1, "a", 1), Analysis::new(2, "b", 1)];

    let output = run(&analyses, &data_series);
    assert_eq!(output, vec![data_series[0].clone(), data_series[1].clone()]);
}

#[test]
fn test_unmatched_analysis_is_not_an_error() {
    let data_series = vec![series(1, Temporality::Dynamic, &[1, 2, 3])];

    let output = run(&[Analysis::new(1, "a", 99)], &data_series);
    assert!(output.is_empty());
}

#[test]
fn test_pool_from_persistence_json() {
    let data_series: Vec<DataSeries> = serde_json::from_str(
        r#"[
            {"id": 1, "name": "fires", "temporality": "DYNAMIC", "data_sets": [{"id": 7}]},
            {"id": 2, "name": "states", "temporality": "STATIC", "data_sets": [{"id": 8}]},
            {"id": 3, "name": "risk", "temporality": "DYNAMIC", "data_sets": [{"id": 8}]}
        ]"#,
    )
    .unwrap();
    let analyses: Vec<Analysis> = serde_json::from_str(
        r#"[{"id": 1, "dataset_output_id": 8}, {"id": 2, "dataset_output_id": 7}]"#,
    )
    .unwrap();

    let output = run(&analyses, &data_series);
    let names: Vec<&str> = output.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["risk", "fires"]);
}

fn series_strategy() -> impl Strategy<Value = Vec<DataSeries>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(0u64..20, 0..4)),
        0..12,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (is_static, data_sets))| {
                let temporality = if is_static { Temporality::Static } else { Temporality::Dynamic };
                series(i as u64, temporality, &data_sets)
            })
            .collect()
    })
}

fn analyses_strategy() -> impl Strategy<Value = Vec<Analysis>> {
    prop::collection::vec(0u64..20, 0..12).prop_map(|outputs| {
        outputs
            .into_iter()
            .enumerate()
            .map(|(i, output)| Analysis::new(i as u64, format!("analysis-{i}"), output))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_output_is_bounded_and_unique(
        data_series in series_strategy(),
        analyses in analyses_strategy(),
    ) {
        let output = run(&analyses, &data_series);
        let non_static = data_series.iter().filter(|s| !s.is_static()).count();

        prop_assert!(output.len() <= analyses.len());
        prop_assert!(output.len() <= non_static);

        let unique: HashSet<u64> = output.iter().map(|s| s.id).collect();
        prop_assert_eq!(unique.len(), output.len());
        prop_assert!(output.iter().all(|s| !s.is_static()));
    }

    #[test]
    fn prop_apply_is_idempotent(
        data_series in series_strategy(),
        analyses in analyses_strategy(),
    ) {
        let snapshot = data_series.clone();

        let first = run(&analyses, &data_series);
        let second = run(&analyses, &data_series);

        prop_assert_eq!(first, second);
        prop_assert_eq!(data_series, snapshot);
    }

    #[test]
    fn prop_disjoint_claims_all_match(count in 0usize..10) {
        // One dynamic series per analysis, each holding a distinct data set
        let data_series: Vec<DataSeries> = (0..count as u64)
            .map(|i| series(i, Temporality::Dynamic, &[100 + i]))
            .collect();
        let analyses: Vec<Analysis> = (0..count as u64)
            .rev()
            .map(|i| Analysis::new(i, "a", 100 + i))
            .collect();

        let output = run(&analyses, &data_series);
        let expected: Vec<u64> = (0..count as u64).rev().collect();

        prop_assert_eq!(output.iter().map(|s| s.id).collect::<Vec<_>>(), expected);
    }
}
