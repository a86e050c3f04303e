use std::fmt;
use std::path::PathBuf;

/// Which of the two pre-built artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Vectorizer,
    Model,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vectorizer => write!(f, "vectorizer"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Represents the different types of errors that can occur in the message classifier.
///
/// Artifact errors are raised while loading and are fatal for the process.
/// The remaining variants are raised per request and leave the classifier usable.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// An artifact file could not be located or read
    #[error("Required {kind} artifact is missing: {}", .path.display())]
    ArtifactMissing { kind: ArtifactKind, path: PathBuf },
    /// An artifact was read but is malformed, unfitted or fails verification
    #[error("Invalid {kind} artifact: {reason}")]
    ArtifactInvalid { kind: ArtifactKind, reason: String },
    /// The message was empty or whitespace only
    #[error("Please enter a valid message")]
    EmptyInput,
    /// Vectorization or prediction failed for a single message
    #[error("Error during classification: {0}")]
    ClassificationError(String),
    /// A caller supplied parameter is out of range
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ClassifierError {
    pub(crate) fn invalid(kind: ArtifactKind, reason: impl Into<String>) -> Self {
        Self::ArtifactInvalid { kind, reason: reason.into() }
    }

    /// Returns true for startup errors that must halt the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ArtifactMissing { .. } | Self::ArtifactInvalid { .. })
    }
}

#[cfg(feature = "onnx")]
impl From<ort::Error> for ClassifierError {
    fn from(err: ort::Error) -> Self {
        ClassifierError::ClassificationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let missing = ClassifierError::ArtifactMissing {
            kind: ArtifactKind::Model,
            path: PathBuf::from("model.json"),
        };
        assert!(missing.is_fatal());
        assert!(ClassifierError::invalid(ArtifactKind::Vectorizer, "empty vocabulary").is_fatal());
        assert!(!ClassifierError::EmptyInput.is_fatal());
        assert!(!ClassifierError::ClassificationError("shape".into()).is_fatal());
    }

    #[test]
    fn test_display_names_artifact() {
        let err = ClassifierError::ArtifactMissing {
            kind: ArtifactKind::Vectorizer,
            path: PathBuf::from("/tmp/vectorizer.json"),
        };
        assert_eq!(
            err.to_string(),
            "Required vectorizer artifact is missing: /tmp/vectorizer.json"
        );
    }
}
