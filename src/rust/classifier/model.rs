use std::fmt;

use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::error::{ArtifactKind, ClassifierError};
use super::utils::argmax;

/// A pre-trained model mapping a feature vector to one integer label.
pub trait Model: fmt::Debug + Send + Sync {
    /// Expected feature vector length, when the model knows it.
    fn n_features(&self) -> Option<usize>;

    /// Labels the model can emit, in decision-function order. Empty when unknown.
    fn classes(&self) -> Vec<i64> {
        Vec::new()
    }

    /// Predicts the label for a single feature vector.
    fn predict(&self, features: &Array1<f32>) -> Result<i64, ClassifierError>;
}

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    classes: Vec<i64>,
    coef: Vec<Vec<f32>>,
    #[serde(default)]
    intercept: Vec<f32>,
}

/// Linear decision function `coef · x + intercept`.
///
/// This covers the exports of logistic regression, linear SVMs and
/// multinomial naive Bayes (log probabilities as `coef`, class log priors as
/// `intercept`). A binary export has a single row and two classes.
#[derive(Debug, Clone)]
pub struct LinearModel {
    classes: Vec<i64>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl LinearModel {
    /// Builds a model from its parts. An empty `intercept` means all zeros.
    pub fn new(
        classes: Vec<i64>,
        coef: Vec<Vec<f32>>,
        intercept: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        let invalid = |reason: String| ClassifierError::invalid(ArtifactKind::Model, reason);

        if classes.is_empty() {
            return Err(invalid("model has no classes".to_string()));
        }
        let rows = coef.len();
        let binary = rows == 1 && classes.len() == 2;
        if !binary && rows != classes.len() {
            return Err(invalid(format!(
                "coef has {} rows but model has {} classes",
                rows,
                classes.len()
            )));
        }
        let width = coef.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(invalid("coef rows are empty".to_string()));
        }
        if let Some(row) = coef.iter().position(|r| r.len() != width) {
            return Err(invalid(format!(
                "coef row {} has {} weights, expected {}",
                row,
                coef[row].len(),
                width
            )));
        }
        let intercept = if intercept.is_empty() {
            Array1::zeros(rows)
        } else if intercept.len() == rows {
            Array1::from(intercept)
        } else {
            return Err(invalid(format!(
                "intercept has {} values, expected {}",
                intercept.len(),
                rows
            )));
        };

        let flat: Vec<f32> = coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((rows, width), flat)
            .map_err(|e| invalid(format!("failed to shape coef: {}", e)))?;

        Ok(Self { classes, coef, intercept })
    }

    /// Parses a JSON model artifact.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let artifact: LinearArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ClassifierError::invalid(ArtifactKind::Model, e.to_string()))?;
        Self::new(artifact.classes, artifact.coef, artifact.intercept)
    }

    /// Raw decision scores, one per coef row.
    pub fn decision_function(&self, features: &Array1<f32>) -> Result<Array1<f32>, ClassifierError> {
        if features.len() != self.coef.ncols() {
            return Err(ClassificationErrorKind::ShapeMismatch {
                expected: self.coef.ncols(),
                actual: features.len(),
            }
            .into());
        }
        let scores = self.coef.dot(features) + &self.intercept;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ClassificationErrorKind::NonFinite.into());
        }
        Ok(scores)
    }
}

enum ClassificationErrorKind {
    ShapeMismatch { expected: usize, actual: usize },
    NonFinite,
}

impl From<ClassificationErrorKind> for ClassifierError {
    fn from(kind: ClassificationErrorKind) -> Self {
        let msg = match kind {
            ClassificationErrorKind::ShapeMismatch { expected, actual } => format!(
                "feature vector has {} entries but the model expects {}",
                actual, expected
            ),
            ClassificationErrorKind::NonFinite => "model produced a non-finite score".to_string(),
        };
        ClassifierError::ClassificationError(msg)
    }
}

impl Model for LinearModel {
    fn n_features(&self) -> Option<usize> {
        Some(self.coef.ncols())
    }

    fn classes(&self) -> Vec<i64> {
        self.classes.clone()
    }

    fn predict(&self, features: &Array1<f32>) -> Result<i64, ClassifierError> {
        let scores = self.decision_function(features)?;
        if self.coef.nrows() == 1 && self.classes.len() == 2 {
            return Ok(if scores[0] > 0.0 { self.classes[1] } else { self.classes[0] });
        }
        argmax(&scores)
            .map(|i| self.classes[i])
            .ok_or_else(|| ClassifierError::ClassificationError("model produced no scores".into()))
    }
}
