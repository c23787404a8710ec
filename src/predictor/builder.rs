use std::fs;
use std::sync::Arc;

use log::{error, info};
use ort::session::Session;

use super::error::PredictorError;
use super::model::{OnnxModel, ProbabilityModel};
use super::predictor::Predictor;
use crate::artifacts::{verify_sidecar, ArtifactStore};
use crate::runtime::{create_session_builder, RuntimeConfig};
use crate::schema::ModelSchema;

/// A builder for constructing a Predictor with a fluent interface.
#[derive(Default)]
pub struct PredictorBuilder {
    model_path: Option<String>,
    schema_path: Option<String>,
    model: Option<Arc<dyn ProbabilityModel>>,
    schema: Option<ModelSchema>,
    runtime_config: RuntimeConfig,
}

impl PredictorBuilder {
    /// Creates a new empty PredictorBuilder with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            schema_path: None,
            model: None,
            schema: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Loads both startup artifacts from an [`ArtifactStore`].
    ///
    /// # Errors
    /// * `MissingArtifact` if the classifier graph or the feature schema
    ///   is absent — the store's message names the missing artifact and
    ///   points at the training step
    /// * `BuildError` if an artifact fails its checksum, fails to parse,
    ///   or the model artifacts are already set
    pub fn with_artifacts(mut self, store: &ArtifactStore) -> Result<Self, PredictorError> {
        if self.model.is_some() {
            return Err(PredictorError::BuildError(
                "Model and schema already set".to_string(),
            ));
        }

        let model_path = store.ensure_model()?;
        let schema = store.load_schema()?;

        self.load_onnx_model(
            &model_path.to_string_lossy(),
            &store.schema_path().to_string_lossy(),
            schema,
        )?;
        Ok(self)
    }

    /// Loads the classifier graph and feature schema from explicit paths.
    ///
    /// # Errors
    /// * `BuildError` if either path is empty or artifacts are already set
    /// * `MissingArtifact` if either file does not exist
    /// * `BuildError` if the schema is not a JSON array of column names
    pub fn with_custom_artifacts(
        mut self,
        model_path: &str,
        schema_path: &str,
    ) -> Result<Self, PredictorError> {
        if model_path.is_empty() || schema_path.is_empty() {
            return Err(PredictorError::BuildError(
                "Model and schema paths cannot be empty".to_string(),
            ));
        }
        if self.model.is_some() {
            return Err(PredictorError::BuildError(
                "Model and schema already set".to_string(),
            ));
        }

        if !std::path::Path::new(model_path).exists() {
            return Err(PredictorError::MissingArtifact(format!(
                "classifier model not found at {}; run the training step first to produce it",
                model_path
            )));
        }
        if !std::path::Path::new(schema_path).exists() {
            return Err(PredictorError::MissingArtifact(format!(
                "feature schema not found at {}; run the training step first to produce it",
                schema_path
            )));
        }

        // Same integrity semantics as store-resolved artifacts.
        verify_sidecar(std::path::Path::new(model_path))?;
        verify_sidecar(std::path::Path::new(schema_path))?;

        let bytes = fs::read(schema_path).map_err(|e| {
            PredictorError::BuildError(format!("Failed to read schema file: {}", e))
        })?;
        let columns: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| {
            PredictorError::BuildError(format!("Failed to parse schema file: {}", e))
        })?;
        if columns.is_empty() {
            return Err(PredictorError::BuildError(
                "Schema lists no columns".to_string(),
            ));
        }

        self.load_onnx_model(model_path, schema_path, ModelSchema::new(columns))?;
        Ok(self)
    }

    /// Injects a classifier and schema directly, bypassing artifact
    /// loading. This is the seam for substituting a non-ONNX backend or
    /// a mock model in tests.
    pub fn with_model(
        mut self,
        model: Arc<dyn ProbabilityModel>,
        schema: ModelSchema,
    ) -> Result<Self, PredictorError> {
        if self.model.is_some() {
            return Err(PredictorError::BuildError(
                "Model and schema already set".to_string(),
            ));
        }
        if schema.is_empty() {
            return Err(PredictorError::BuildError(
                "Schema lists no columns".to_string(),
            ));
        }

        self.model = Some(model);
        self.schema = Some(schema);
        self.model_path = Some("<in-memory>".to_string());
        self.schema_path = Some("<in-memory>".to_string());
        Ok(self)
    }

    fn load_onnx_model(
        &mut self,
        model_path: &str,
        schema_path: &str,
        schema: ModelSchema,
    ) -> Result<(), PredictorError> {
        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(model_path)
            .map_err(|e| {
                error!("Failed to load model graph: {}", e);
                PredictorError::BuildError(format!("Failed to load model graph: {}", e))
            })?;

        Self::validate_model(&session)?;
        info!("Model graph validated successfully ({} schema columns)", schema.len());

        self.model = Some(Arc::new(OnnxModel::new(session)?));
        self.schema = Some(schema);
        self.model_path = Some(model_path.to_string());
        self.schema_path = Some(schema_path.to_string());
        Ok(())
    }

    /// Builds and returns the final Predictor instance
    ///
    /// # Errors
    /// * `BuildError` if no model and schema have been loaded
    pub fn build(self) -> Result<Predictor, PredictorError> {
        let model = self.model.ok_or_else(|| {
            PredictorError::BuildError("No classifier model loaded".to_string())
        })?;
        let schema = self.schema.ok_or_else(|| {
            PredictorError::BuildError("No feature schema loaded".to_string())
        })?;

        Ok(Predictor {
            model_path: self.model_path.unwrap_or_else(|| "<in-memory>".to_string()),
            schema_path: self.schema_path.unwrap_or_else(|| "<in-memory>".to_string()),
            model,
            schema,
        })
    }

    /// Validates that the loaded graph has the shape of a classifier:
    /// exactly one input tensor and at least one output.
    fn validate_model(session: &Session) -> Result<(), PredictorError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(PredictorError::ModelError(format!(
                "Model must have exactly 1 input (the feature vector), found {}",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(PredictorError::ModelError(
                "Model must have at least 1 output for class probabilities".to_string(),
            ));
        }

        Ok(())
    }
}
