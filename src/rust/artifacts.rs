use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::classifier::{ArtifactKind, ClassifierError, CountVectorizer, LinearModel, Model};
#[cfg(feature = "onnx")]
use crate::classifier::OnnxModel;
#[cfg(feature = "onnx")]
use crate::runtime::RuntimeConfig;

/// Environment variable overriding the artifact directory.
pub const ARTIFACTS_ENV: &str = "MSGCLASS_ARTIFACTS";
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const MODEL_FILE: &str = "model.json";
pub const ONNX_MODEL_FILE: &str = "model.onnx";

/// Locates and reads the two artifacts exported by the training process.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    vectorizer_path: Option<PathBuf>,
    model_path: Option<PathBuf>,
    vectorizer_sha256: Option<String>,
    model_sha256: Option<String>,
    #[cfg(feature = "onnx")]
    runtime_config: RuntimeConfig,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
            vectorizer_path: None,
            model_path: None,
            vectorizer_sha256: None,
            model_sha256: None,
            #[cfg(feature = "onnx")]
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Creates a store over the default artifacts directory
    pub fn discover() -> Self {
        Self::new(Self::get_default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn get_default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(ARTIFACTS_ENV) {
            return PathBuf::from(path);
        }

        // 2. Artifacts shipped next to the working directory
        let local = PathBuf::from("artifacts");
        if local.is_dir() {
            return local;
        }

        // 3. Platform data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("msgclass").join("artifacts");
        }

        local
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn with_vectorizer_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.vectorizer_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_model_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.model_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Pins the vectorizer to a SHA-256 digest (hex).
    pub fn with_vectorizer_sha256(mut self, hash: impl Into<String>) -> Self {
        self.vectorizer_sha256 = Some(hash.into());
        self
    }

    /// Pins the model to a SHA-256 digest (hex).
    pub fn with_model_sha256(mut self, hash: impl Into<String>) -> Self {
        self.model_sha256 = Some(hash.into());
        self
    }

    #[cfg(feature = "onnx")]
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    pub fn get_vectorizer_path(&self) -> PathBuf {
        self.vectorizer_path
            .clone()
            .unwrap_or_else(|| self.artifacts_dir.join(VECTORIZER_FILE))
    }

    /// The JSON model wins over an ONNX model in the same directory.
    pub fn get_model_path(&self) -> PathBuf {
        if let Some(path) = &self.model_path {
            return path.clone();
        }
        let json = self.artifacts_dir.join(MODEL_FILE);
        let onnx = self.artifacts_dir.join(ONNX_MODEL_FILE);
        if !json.exists() && onnx.exists() {
            onnx
        } else {
            json
        }
    }

    pub fn is_present(&self) -> bool {
        let vectorizer_path = self.get_vectorizer_path();
        let model_path = self.get_model_path();
        log::debug!("Checking artifacts:");
        log::debug!("  Vectorizer path: {:?} (exists: {})", vectorizer_path, vectorizer_path.exists());
        log::debug!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        vectorizer_path.is_file() && model_path.is_file()
    }

    fn read_artifact(
        &self,
        kind: ArtifactKind,
        path: &Path,
        expected_hash: Option<&str>,
    ) -> Result<Vec<u8>, ClassifierError> {
        log::info!("Reading {} artifact from {:?}", kind, path);
        let bytes = fs::read(path).map_err(|e| {
            log::error!("Failed to read {} artifact {:?}: {}", kind, path, e);
            ClassifierError::ArtifactMissing { kind, path: path.to_path_buf() }
        })?;
        log::debug!("Read {} bytes", bytes.len());

        if let Some(expected) = expected_hash {
            let actual = sha256_hex(&bytes);
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                log::error!("{} hash mismatch: expected {}, got {}", kind, expected, actual);
                return Err(ClassifierError::invalid(
                    kind,
                    format!("hash mismatch: expected {}, got {}", expected, actual),
                ));
            }
            log::info!("{} artifact verified", kind);
        }
        Ok(bytes)
    }

    /// Reads (and verifies) the vectorizer bytes without parsing them.
    pub(crate) fn read_vectorizer(&self) -> Result<Vec<u8>, ClassifierError> {
        self.read_artifact(
            ArtifactKind::Vectorizer,
            &self.get_vectorizer_path(),
            self.vectorizer_sha256.as_deref(),
        )
    }

    /// Reads (and verifies) the model bytes without parsing them.
    pub(crate) fn read_model(&self) -> Result<Vec<u8>, ClassifierError> {
        self.read_artifact(ArtifactKind::Model, &self.get_model_path(), self.model_sha256.as_deref())
    }

    pub(crate) fn parse_model(&self, bytes: &[u8]) -> Result<Box<dyn Model>, ClassifierError> {
        let is_onnx = self.get_model_path().extension().is_some_and(|ext| ext == "onnx");
        if is_onnx {
            return self.load_onnx(bytes);
        }
        Ok(Box::new(LinearModel::from_slice(bytes)?))
    }

    pub fn load_vectorizer(&self) -> Result<CountVectorizer, ClassifierError> {
        CountVectorizer::from_slice(&self.read_vectorizer()?)
    }

    pub fn load_model(&self) -> Result<Box<dyn Model>, ClassifierError> {
        self.parse_model(&self.read_model()?)
    }

    #[cfg(feature = "onnx")]
    fn load_onnx(&self, bytes: &[u8]) -> Result<Box<dyn Model>, ClassifierError> {
        Ok(Box::new(OnnxModel::from_memory(bytes, &self.runtime_config)?))
    }

    #[cfg(not(feature = "onnx"))]
    fn load_onnx(&self, _bytes: &[u8]) -> Result<Box<dyn Model>, ClassifierError> {
        Err(ClassifierError::invalid(
            ArtifactKind::Model,
            "ONNX models require building with the `onnx` feature",
        ))
    }
}

/// Hex SHA-256 digest of a file's contents, for pinning artifacts.
pub fn file_sha256<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    Ok(sha256_hex(&fs::read(path)?))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
