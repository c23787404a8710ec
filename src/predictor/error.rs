use std::fmt;

use ort::Error as OrtError;

use crate::artifacts::ArtifactError;

/// Represents the different types of errors that can occur in the predictor.
#[derive(Debug)]
pub enum PredictorError {
    /// A required startup artifact (classifier graph or feature schema)
    /// could not be located or deserialized. Fatal: no predictor can be
    /// built in this state.
    MissingArtifact(String),
    /// Error occurred during the build phase
    BuildError(String),
    /// The loaded model graph does not look like a binary classifier
    ModelError(String),
    /// Error occurred while making predictions
    PredictionError(String),
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArtifact(msg) => write!(f, "Missing artifact: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
        }
    }
}

impl std::error::Error for PredictorError {}

impl From<OrtError> for PredictorError {
    fn from(err: OrtError) -> Self {
        PredictorError::BuildError(err.to_string())
    }
}

impl From<ArtifactError> for PredictorError {
    fn from(err: ArtifactError) -> Self {
        let message = err.to_string();
        match err {
            ArtifactError::Missing { .. } => PredictorError::MissingArtifact(message),
            _ => PredictorError::BuildError(message),
        }
    }
}
