mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod error;
mod model;
#[cfg(feature = "onnx")]
mod onnx;
mod utils;
mod vectorizer;

use std::path::PathBuf;

pub use builder::ClassifierBuilder;
pub use classifier::Classifier;
pub use error::{ArtifactKind, ClassifierError};
pub use model::{LinearModel, Model};
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
pub use vectorizer::{CountVectorizer, Norm, Vectorizer};

/// Describes a loaded classifier.
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Where the vectorizer was read from, if it came from disk
    pub vectorizer_path: Option<PathBuf>,
    /// Where the model was read from, if it came from disk
    pub model_path: Option<PathBuf>,
    pub vocabulary_size: usize,
    pub n_features: usize,
    pub classes: Vec<i64>,
}
