use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::schema::ModelSchema;

/// File name of the serialized classifier graph inside an artifact directory.
pub const MODEL_FILE: &str = "adoption_model.onnx";
/// File name of the ordered feature-column list inside an artifact directory.
pub const SCHEMA_FILE: &str = "model_features.json";

/// Which of the two startup artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Schema,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "classifier model"),
            Self::Schema => write!(f, "feature schema"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found at {path:?}; run the training step first to produce it")]
    Missing { kind: ArtifactKind, path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("checksum mismatch for {path:?}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    #[error("schema artifact is not a JSON array of column names: {0}")]
    SchemaFormat(#[from] serde_json::Error),
    #[error("schema artifact lists no columns")]
    EmptySchema,
}

/// Resolves and loads the two startup artifacts a predictor needs: the
/// trained classifier graph and the feature-column schema.
///
/// Both are produced by an offline training step; this store never
/// writes them. An optional `<file>.sha256` sidecar next to an artifact
/// pins its expected digest and is checked on load.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a store over the default artifact directory.
    pub fn new_default() -> Self {
        Self::new(Self::default_dir())
    }

    /// Returns the default artifact directory path.
    pub fn default_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("PAWCAST_MODEL_DIR") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("pawcast").join("model");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir
                .join(".local")
                .join("share")
                .join("pawcast")
                .join("model");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("pawcast").join("model")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.dir.join(SCHEMA_FILE)
    }

    /// True when both artifacts are present on disk.
    pub fn is_available(&self) -> bool {
        let model_path = self.model_path();
        let schema_path = self.schema_path();
        log::info!("Checking artifact availability:");
        log::info!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::info!("  Schema path: {:?} (exists: {})", schema_path, schema_path.exists());
        model_path.exists() && schema_path.exists()
    }

    /// Resolves the classifier graph, verifying any checksum sidecar.
    pub fn ensure_model(&self) -> Result<PathBuf, ArtifactError> {
        let path = self.model_path();
        if !path.exists() {
            return Err(ArtifactError::Missing {
                kind: ArtifactKind::Model,
                path,
            });
        }
        self.verify_sidecar(&path)?;
        Ok(path)
    }

    /// Resolves the schema file, verifying any checksum sidecar.
    pub fn ensure_schema(&self) -> Result<PathBuf, ArtifactError> {
        let path = self.schema_path();
        if !path.exists() {
            return Err(ArtifactError::Missing {
                kind: ArtifactKind::Schema,
                path,
            });
        }
        self.verify_sidecar(&path)?;
        Ok(path)
    }

    /// Loads and parses the feature-column schema.
    pub fn load_schema(&self) -> Result<ModelSchema, ArtifactError> {
        let path = self.ensure_schema()?;
        let bytes = fs::read(&path)?;
        let columns: Vec<String> = serde_json::from_slice(&bytes)?;
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }
        log::info!("Schema loaded: {} columns from {:?}", columns.len(), path);
        Ok(ModelSchema::new(columns))
    }

    /// Checks a `<file>.sha256` sidecar if one exists; no sidecar, no check.
    fn verify_sidecar(&self, path: &Path) -> Result<(), ArtifactError> {
        verify_sidecar(path)
    }
}

/// Checks an artifact against its `<file>.sha256` sidecar if one exists;
/// no sidecar, no check. Every loading path runs this, whether the
/// artifact was resolved through a store or named explicitly.
pub(crate) fn verify_sidecar(path: &Path) -> Result<(), ArtifactError> {
    let sidecar = sidecar_path(path);
    if !sidecar.exists() {
        return Ok(());
    }

    let expected = fs::read_to_string(&sidecar)?
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let actual = format!("{:x}", hasher.finalize());

    log::info!("Verifying {:?} against sidecar {:?}", path, sidecar);
    log::info!("  Calculated hash: {}", actual);
    log::info!("  Expected hash:   {}", expected);

    if actual != expected {
        return Err(ArtifactError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".sha256");
    PathBuf::from(name)
}
