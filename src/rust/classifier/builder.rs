use std::path::PathBuf;

use log::{error, info};

use super::classifier::Classifier;
use super::error::{ArtifactKind, ClassifierError};
use super::model::Model;
use super::vectorizer::{CountVectorizer, Vectorizer};
use crate::artifacts::ArtifactStore;

/// A builder for constructing a Classifier with a fluent interface.
///
/// Anything not supplied directly is read from the artifact store; without a
/// store the default artifacts directory is used.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    store: Option<ArtifactStore>,
    vectorizer: Option<Box<dyn Vectorizer>>,
    model: Option<Box<dyn Model>>,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance
    ///
    /// # Example
    /// ```
    /// use msgclass::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads missing artifacts from the given store
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use msgclass::{ArtifactStore, Classifier};
    ///
    /// let classifier = Classifier::builder()
    ///     .with_artifact_store(ArtifactStore::new("artifacts"))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_artifact_store(mut self, store: ArtifactStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses an already constructed vectorizer instead of reading one from disk
    pub fn with_vectorizer(mut self, vectorizer: impl Vectorizer + 'static) -> Self {
        self.vectorizer = Some(Box::new(vectorizer));
        self
    }

    /// Uses an already constructed model instead of reading one from disk
    pub fn with_model(mut self, model: impl Model + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Loads whatever is still missing and validates the pair
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier if successful, or:
    ///   - `ArtifactMissing` if an artifact file cannot be read
    ///   - `ArtifactInvalid` if an artifact is malformed, fails hash verification,
    ///     the vectorizer has no learned vocabulary, or the model expects a
    ///     different number of features than the vectorizer produces
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let store = self.store.unwrap_or_else(ArtifactStore::discover);

        // Both files are read before either is parsed, so a missing file is
        // reported ahead of a malformed one.
        let vectorizer_bytes = match self.vectorizer {
            Some(_) => None,
            None => Some(store.read_vectorizer()?),
        };
        let model_bytes = match self.model {
            Some(_) => None,
            None => Some(store.read_model()?),
        };

        let (vectorizer, vectorizer_path): (Box<dyn Vectorizer>, Option<PathBuf>) =
            match (self.vectorizer, vectorizer_bytes) {
                (Some(vectorizer), _) => (vectorizer, None),
                (None, bytes) => (
                    Box::new(CountVectorizer::from_slice(&bytes.unwrap_or_default())?),
                    Some(store.get_vectorizer_path()),
                ),
            };
        let (model, model_path) = match (self.model, model_bytes) {
            (Some(model), _) => (model, None),
            (None, bytes) => (
                store.parse_model(&bytes.unwrap_or_default())?,
                Some(store.get_model_path()),
            ),
        };

        Self::validate(vectorizer.as_ref(), model.as_ref())?;
        info!(
            "Classifier ready: {} vocabulary terms, {} classes",
            vectorizer.vocabulary_size(),
            model.classes().len()
        );

        Ok(Classifier::new(vectorizer, model, vectorizer_path, model_path))
    }

    /// Validates that the vectorizer is fitted and matches the model's input width
    fn validate(vectorizer: &dyn Vectorizer, model: &dyn Model) -> Result<(), ClassifierError> {
        if vectorizer.vocabulary_size() == 0 {
            error!("The vectorizer is not properly fitted");
            return Err(ClassifierError::invalid(
                ArtifactKind::Vectorizer,
                "the vectorizer is not fitted (no learned vocabulary)",
            ));
        }

        if let Some(expected) = model.n_features() {
            if expected != vectorizer.n_features() {
                error!(
                    "Model expects {} features, vectorizer produces {}",
                    expected,
                    vectorizer.n_features()
                );
                return Err(ClassifierError::invalid(
                    ArtifactKind::Model,
                    format!(
                        "model expects {} features but the vectorizer produces {}",
                        expected,
                        vectorizer.n_features()
                    ),
                ));
            }
        }

        Ok(())
    }
}
