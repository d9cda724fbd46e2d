//! # Analysis Filter
//!
//! Selects, from a pool of data series, the series produced by a list of
//! analyses.
//!
//! Each analysis claims the first non-static series that holds its output
//! data set. A claimed series leaves the pool, so it is returned at most once
//! and a later analysis pointing at the same data set finds nothing.

use tracing::{debug, trace};
use crate::filter::Filter;
use crate::model::{Analysis, DataSeries};

/// Candidate data series for [`AnalysisFilter`]
#[derive(Debug, Clone, Copy)]
pub struct DataSeriesContext<'a> {
    pub data_series: &'a [DataSeries],
}

impl<'a> DataSeriesContext<'a> {
    pub fn new(data_series: &'a [DataSeries]) -> Self {
        Self { data_series }
    }
}

/// Filters data series down to those generated by analyses
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisFilter;

impl AnalysisFilter {
    pub fn new() -> Self {
        Self
    }
}

impl<'a> Filter<Analysis, DataSeriesContext<'a>> for AnalysisFilter {
    type Output = Vec<DataSeries>;

    fn apply(&self, analyses: &[Analysis], context: &DataSeriesContext<'a>) -> Vec<DataSeries> {
        // Working copy: static series can never be an analysis output
        let mut pool: Vec<DataSeries> = context
            .data_series
            .iter()
            .filter(|series| !series.is_static())
            .cloned()
            .collect();

        let mut output = Vec::with_capacity(analyses.len().min(pool.len()));

        for analysis in analyses {
            let position = pool
                .iter()
                .position(|series| series.contains_data_set(analysis.dataset_output_id));

            match position {
                Some(index) => {
                    // `remove` keeps the scan order of the remaining candidates
                    let series = pool.remove(index);
                    debug!(
                        analysis_id = analysis.id,
                        data_series_id = series.id,
                        dataset_output_id = analysis.dataset_output_id,
                        "Analysis claimed data series"
                    );
                    output.push(series);
                }
                None => {
                    trace!(
                        analysis_id = analysis.id,
                        dataset_output_id = analysis.dataset_output_id,
                        "No unclaimed data series for analysis"
                    );
                }
            }
        }

        debug!(
            analyses = analyses.len(),
            candidates = context.data_series.len(),
            matched = output.len(),
            "Analysis filter applied"
        );

        output
    }
}
