use std::collections::HashMap;
use std::sync::Arc;

use ndarray::{Array2, ArrayViewD};
use ort::session::Session;
use ort::value::Tensor;

use super::error::PredictorError;

/// The classifier capability: anything that maps an aligned feature
/// vector to the probability of the positive ("adopted") class.
///
/// The predictor only talks to this trait, so any binary-classification
/// backend substitutes without touching the rest of the crate; tests
/// inject in-memory implementations.
pub trait ProbabilityModel: Send + Sync {
    /// Probability mass assigned to the positive class, in [0, 1].
    ///
    /// `features` is already in the model's column order (see
    /// [`ModelSchema::align`](crate::ModelSchema::align)).
    fn predict_probability(&self, features: &[f32]) -> Result<f64, PredictorError>;
}

/// A [`ProbabilityModel`] backed by an ONNX binary-classification graph.
///
/// Expects one `f32` input tensor of shape `[1, n_features]`. Exported
/// classifiers usually declare two outputs, the predicted label first
/// and the per-class probabilities after it; the probability tensor is
/// located by scanning the outputs back to front for one that extracts
/// as `f32`.
pub struct OnnxModel {
    session: Arc<Session>,
    input_name: String,
}

impl OnnxModel {
    pub fn new(session: Session) -> Result<Self, PredictorError> {
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| PredictorError::ModelError("model graph declares no inputs".into()))?;
        Ok(Self {
            session: Arc::new(session),
            input_name,
        })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl ProbabilityModel for OnnxModel {
    fn predict_probability(&self, features: &[f32]) -> Result<f64, PredictorError> {
        let input_array = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| {
                PredictorError::PredictionError(format!("Failed to create input array: {}", e))
            })?;
        let input_dyn = input_array.into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input).map_err(|e| {
                PredictorError::PredictionError(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self.session.run(input_tensors).map_err(|e| {
            PredictorError::PredictionError(format!("Failed to run model: {}", e))
        })?;

        let num_outputs = self.session.outputs.len();
        for index in (0..num_outputs).rev() {
            if let Ok(view) = outputs[index].try_extract_tensor::<f32>() {
                let probability = positive_class_probability(&view)?;
                return Ok(f64::from(probability.clamp(0.0, 1.0)));
            }
        }

        Err(PredictorError::PredictionError(
            "model produced no float probability output".into(),
        ))
    }
}

fn positive_class_probability(view: &ArrayViewD<'_, f32>) -> Result<f32, PredictorError> {
    match view.shape() {
        [1, 2] => Ok(view[[0, 1]]),
        [2] => Ok(view[[1]]),
        shape => Err(PredictorError::PredictionError(format!(
            "unexpected probability tensor shape {:?}; expected [1, 2] for a binary classifier",
            shape
        ))),
    }
}
