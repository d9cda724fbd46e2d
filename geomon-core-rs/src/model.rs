//! In-memory records handed over by the persistence layer.
//!
//! These values are built per request and never mutated by the core.

use serde::{Serialize, Deserialize};

/// Identifier of a persisted entity
pub type Id = u64;

/// How the data of a series evolves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Temporality {
    /// Data that does not change, e.g. a municipality boundary layer
    Static,
    /// Data that is collected or produced over time
    Dynamic,
}

/// An individually identified unit within a data series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    pub id: Id,
}

impl DataSet {
    pub fn new(id: Id) -> Self {
        Self { id }
    }
}

/// A named collection of data sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSeries {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    pub temporality: Temporality,
    #[serde(default)]
    pub data_sets: Vec<DataSet>,
}

impl DataSeries {
    /// Creates a series from the ids of its data sets
    pub fn new<S, I>(id: Id, name: S, temporality: Temporality, data_set_ids: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = Id>,
    {
        Self {
            id,
            name: name.into(),
            temporality,
            data_sets: data_set_ids.into_iter().map(DataSet::new).collect(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.temporality == Temporality::Static
    }

    /// Returns true if one of the data sets has the given id
    pub fn contains_data_set(&self, data_set_id: Id) -> bool {
        self.data_sets.iter().any(|data_set| data_set.id == data_set_id)
    }
}

/// A computation whose declared output is one data set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    pub dataset_output_id: Id,
}

impl Analysis {
    pub fn new<S: Into<String>>(id: Id, name: S, dataset_output_id: Id) -> Self {
        Self {
            id,
            name: name.into(),
            dataset_output_id,
        }
    }
}
