//! Concrete filters

pub mod analysis;

pub use analysis::{AnalysisFilter, DataSeriesContext};
