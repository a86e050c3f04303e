use std::path::PathBuf;

use log::debug;

use super::error::ClassifierError;
use super::model::Model;
use super::vectorizer::Vectorizer;
use super::{ClassifierBuilder, ClassifierInfo};
use crate::artifacts::ArtifactStore;

/// The loaded vectorizer and model, ready to classify messages.
///
/// Both artifacts are read once when the classifier is built and never
/// change afterwards, so a `Classifier` can be shared freely.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use msgclass::{resolve, ArtifactStore, Classifier};
///
/// let classifier = Classifier::load(&ArtifactStore::new("artifacts"))?;
/// let label = classifier.classify("Your OTP is 482913")?;
/// println!("{}", resolve(label));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    vectorizer: Box<dyn Vectorizer>,
    model: Box<dyn Model>,
    vectorizer_path: Option<PathBuf>,
    model_path: Option<PathBuf>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    pub(crate) fn new(
        vectorizer: Box<dyn Vectorizer>,
        model: Box<dyn Model>,
        vectorizer_path: Option<PathBuf>,
        model_path: Option<PathBuf>,
    ) -> Self {
        Self { vectorizer, model, vectorizer_path, model_path }
    }

    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Loads both artifacts from the store
    pub fn load(store: &ArtifactStore) -> Result<Self, ClassifierError> {
        Self::builder().with_artifact_store(store.clone()).build()
    }

    /// Returns information about the loaded artifacts
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            vectorizer_path: self.vectorizer_path.clone(),
            model_path: self.model_path.clone(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            n_features: self.vectorizer.n_features(),
            classes: self.model.classes(),
        }
    }

    /// Predicts the integer label for a message
    ///
    /// # Errors
    /// - `EmptyInput` if the message is empty or whitespace only
    /// - `ClassificationError` if vectorization or prediction fails
    pub fn classify(&self, message: &str) -> Result<i64, ClassifierError> {
        if message.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let features = self.vectorizer.transform(message)?;
        let label = self.model.predict(&features)?;
        debug!("Classified {:?} as label {}", message, label);
        Ok(label)
    }
}
