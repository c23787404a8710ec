use std::fs;
use std::sync::Arc;

use pawcast::{ModelSchema, Predictor, PredictorError, ProbabilityModel};

struct Half;

impl ProbabilityModel for Half {
    fn predict_probability(&self, _features: &[f32]) -> Result<f64, PredictorError> {
        Ok(0.5)
    }
}

#[test]
fn test_empty_paths() {
    // Test empty model path
    let result = Predictor::builder().with_custom_artifacts("", "schema.json");
    assert!(matches!(result, Err(PredictorError::BuildError(_))));

    // Test empty schema path
    let result = Predictor::builder().with_custom_artifacts("model.onnx", "");
    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_nonexistent_model_path() {
    let result = Predictor::builder().with_custom_artifacts(
        "/tmp/pawcast-tests/does-not-exist/adoption_model.onnx",
        "/tmp/pawcast-tests/does-not-exist/model_features.json",
    );
    assert!(matches!(result, Err(PredictorError::MissingArtifact(_))));
}

#[test]
fn test_nonexistent_schema_path() {
    let dir = std::env::temp_dir().join("pawcast-tests").join("custom-no-schema");
    fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("adoption_model.onnx");
    fs::write(&model_path, b"placeholder bytes").unwrap();

    let result = Predictor::builder().with_custom_artifacts(
        model_path.to_str().unwrap(),
        dir.join("model_features.json").to_str().unwrap(),
    );
    match result {
        Err(PredictorError::MissingArtifact(message)) => {
            assert!(message.contains("feature schema"));
        }
        other => panic!("expected MissingArtifact, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_custom_paths_respect_checksum_sidecars() {
    let dir = std::env::temp_dir().join("pawcast-tests").join("custom-sidecar");
    fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("adoption_model.onnx");
    let schema_path = dir.join("model_features.json");
    fs::write(&model_path, b"placeholder bytes").unwrap();
    fs::write(&schema_path, br#"["a"]"#).unwrap();
    // A sidecar that cannot match the model bytes.
    let mut sidecar = model_path.clone().into_os_string();
    sidecar.push(".sha256");
    fs::write(sidecar, "0".repeat(64)).unwrap();

    let result = Predictor::builder().with_custom_artifacts(
        model_path.to_str().unwrap(),
        schema_path.to_str().unwrap(),
    );
    match result {
        Err(PredictorError::BuildError(message)) => {
            assert!(message.contains("checksum mismatch"), "{}", message);
        }
        other => panic!("expected BuildError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_build_without_model() {
    let result = Predictor::builder().build();
    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_custom_artifacts_after_injection() {
    let schema = ModelSchema::new(vec!["a".to_string()]);
    let result = Predictor::builder()
        .with_model(Arc::new(Half), schema)
        .unwrap()
        .with_custom_artifacts("model.onnx", "schema.json");
    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_error_messages_name_the_missing_artifact() {
    let result = Predictor::builder().with_custom_artifacts(
        "/tmp/pawcast-tests/does-not-exist/adoption_model.onnx",
        "/tmp/pawcast-tests/does-not-exist/model_features.json",
    );
    let err = match result {
        Err(err) => err,
        Ok(_) => panic!("expected an error"),
    };
    let message = err.to_string();
    assert!(message.contains("classifier model"));
    assert!(message.contains("training step"));
}
