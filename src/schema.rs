use serde::{Deserialize, Serialize};

use crate::encoding::FeatureVector;

/// The ordered list of feature-column names the trained model expects.
///
/// Loaded once at startup from the schema artifact and read-only
/// afterwards. The column order here is the column order the model was
/// trained with; [`align`](Self::align) is the only way feature values
/// reach the model, so the order can never drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSchema {
    columns: Vec<String>,
}

impl ModelSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// The expected columns, in model order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Reindexes a feature mapping into the model's column order.
    ///
    /// Columns absent from `features` are filled with 0; keys in
    /// `features` that the schema does not list are dropped silently.
    /// The encoder may emit keys in any order or as a superset/subset of
    /// the training columns, so this step runs on every prediction.
    pub fn align(&self, features: &FeatureVector) -> Vec<f32> {
        self.columns
            .iter()
            .map(|name| features.get(name).unwrap_or(0.0))
            .collect()
    }
}

impl From<Vec<String>> for ModelSchema {
    fn from(columns: Vec<String>) -> Self {
        Self::new(columns)
    }
}
