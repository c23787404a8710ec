mod builder;
mod error;
mod model;
mod predictor;

pub use builder::PredictorBuilder;
pub use error::PredictorError;
pub use model::{OnnxModel, ProbabilityModel};
pub use predictor::{AdoptionTier, Prediction, Predictor};

/// Information about the current state and configuration of a predictor
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Path to the classifier graph artifact
    pub model_path: String,
    /// Path to the feature-schema artifact
    pub schema_path: String,
    /// Number of feature columns the model expects
    pub num_features: usize,
    /// The expected feature columns, in model order
    pub feature_names: Vec<String>,
}
