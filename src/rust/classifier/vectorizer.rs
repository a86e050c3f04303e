use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use ndarray::Array1;
use regex::Regex;
use serde::Deserialize;

use super::error::{ArtifactKind, ClassifierError};
use super::utils::normalize_vector;

/// Turns raw text into a fixed-length feature vector.
///
/// Implementations are fitted offline and read-only afterwards.
pub trait Vectorizer: fmt::Debug + Send + Sync {
    /// Number of terms learned during fitting. Zero means the vectorizer is unfitted.
    fn vocabulary_size(&self) -> usize;

    /// Length of the vectors produced by [`Vectorizer::transform`].
    fn n_features(&self) -> usize {
        self.vocabulary_size()
    }

    /// Converts one message into its feature vector.
    fn transform(&self, text: &str) -> Result<Array1<f32>, ClassifierError>;
}

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk layout written by the training process.
#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    #[serde(default)]
    vocabulary: HashMap<String, usize>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_token_pattern")]
    token_pattern: String,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    stop_words: Option<Vec<String>>,
    #[serde(default)]
    binary: bool,
    #[serde(default)]
    idf: Option<Vec<f32>>,
    #[serde(default)]
    norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Bag-of-words vectorizer with optional TF-IDF weighting.
///
/// Counts how often each vocabulary term (or n-gram) occurs in the message.
/// Terms outside the vocabulary are ignored.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    idf: Option<Array1<f32>>,
    norm: Option<Norm>,
}

impl CountVectorizer {
    /// Builds a plain count vectorizer over the given terms, indexed in order.
    ///
    /// # Example
    /// ```
    /// use msgclass::{CountVectorizer, Vectorizer};
    ///
    /// let vectorizer = CountVectorizer::from_vocabulary(["bill", "otp"]).unwrap();
    /// let features = vectorizer.transform("Your OTP for the bill is 1234").unwrap();
    /// assert_eq!(features.to_vec(), vec![1.0, 1.0]);
    /// ```
    pub fn from_vocabulary<I, S>(terms: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = HashMap::new();
        for term in terms {
            let next = vocabulary.len();
            vocabulary.entry(term.into()).or_insert(next);
        }
        Self::from_artifact(VectorizerArtifact {
            vocabulary,
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: None,
            binary: false,
            idf: None,
            norm: None,
        })
    }

    /// Parses a JSON vectorizer artifact.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let artifact: VectorizerArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ClassifierError::invalid(ArtifactKind::Vectorizer, e.to_string()))?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ClassifierError> {
        let invalid = |reason: String| ClassifierError::invalid(ArtifactKind::Vectorizer, reason);

        if artifact.vocabulary.is_empty() {
            return Err(invalid(
                "the vectorizer is not fitted (no learned vocabulary)".to_string(),
            ));
        }

        let size = artifact.vocabulary.len();
        let mut seen = HashSet::with_capacity(size);
        for (term, &index) in &artifact.vocabulary {
            if index >= size {
                return Err(invalid(format!(
                    "term '{}' has index {} outside vocabulary of {} terms",
                    term, index, size
                )));
            }
            if !seen.insert(index) {
                return Err(invalid(format!("index {} is assigned to more than one term", index)));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!("invalid ngram_range ({}, {})", min_n, max_n)));
        }

        let token_pattern = Regex::new(&artifact.token_pattern)
            .map_err(|e| invalid(format!("invalid token_pattern: {}", e)))?;
        if token_pattern.captures_len() > 2 {
            return Err(invalid("token_pattern may contain at most one capture group".to_string()));
        }

        let idf = match artifact.idf {
            Some(idf) if idf.len() != size => {
                return Err(invalid(format!(
                    "idf has {} weights but vocabulary has {} terms",
                    idf.len(),
                    size
                )));
            }
            Some(idf) => Some(Array1::from(idf)),
            None => None,
        };

        let stop_words = artifact
            .stop_words
            .unwrap_or_default()
            .into_iter()
            .map(|w| if artifact.lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            vocabulary: artifact.vocabulary,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            stop_words,
            binary: artifact.binary,
            idf,
            norm: artifact.norm,
        })
    }

    /// Splits text into the terms that get looked up in the vocabulary.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase { text.to_lowercase() } else { text.to_string() };

        let tokens: Vec<String> = if self.token_pattern.captures_len() == 2 {
            self.token_pattern
                .captures_iter(&text)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str().to_string())
                .collect()
        };
        let tokens: Vec<String> = tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        if max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Vectorizer for CountVectorizer {
    fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, text: &str) -> Result<Array1<f32>, ClassifierError> {
        let mut features = Array1::<f32>::zeros(self.n_features());
        let mut matched = 0usize;
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                features[index] += 1.0;
                matched += 1;
            }
        }
        debug!("Vectorized message: {} vocabulary hits", matched);

        if self.binary {
            features.mapv_inplace(|x| x.min(1.0));
        }
        if let Some(idf) = &self.idf {
            features = features * idf;
        }
        let features = match self.norm {
            Some(Norm::L2) => normalize_vector(&features),
            Some(Norm::L1) => {
                let total: f32 = features.iter().map(|x| x.abs()).sum();
                if total > 1e-10 { features / total } else { features }
            }
            None => features,
        };

        if features.iter().any(|x| !x.is_finite()) {
            return Err(ClassifierError::ClassificationError(
                "vectorizer produced non-finite features".to_string(),
            ));
        }
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_case() {
        let v = CountVectorizer::from_vocabulary(["pay", "bill", "now"]).unwrap();
        let x = v.transform("PAY your Bill, pay it NOW").unwrap();
        assert_eq!(x.to_vec(), vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_single_char_tokens_ignored() {
        let v = CountVectorizer::from_vocabulary(["a", "ok"]).unwrap();
        let x = v.transform("a ok").unwrap();
        assert_eq!(x.to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_unfitted_vectorizer_rejected() {
        let err = CountVectorizer::from_slice(br#"{"lowercase": true}"#).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::ArtifactInvalid { kind: ArtifactKind::Vectorizer, .. }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = CountVectorizer::from_slice(b"not json").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_index_out_of_range_rejected() {
        let err = CountVectorizer::from_slice(br#"{"vocabulary": {"bill": 0, "otp": 5}}"#).unwrap_err();
        assert!(err.to_string().contains("outside vocabulary"));
    }

    #[test]
    fn test_bigrams_and_stop_words() {
        let v = CountVectorizer::from_slice(
            br#"{
                "vocabulary": {"pay": 0, "bill": 1, "pay bill": 2},
                "ngram_range": [1, 2],
                "stop_words": ["your"]
            }"#,
        )
        .unwrap();
        assert_eq!(v.analyze("pay your bill"), vec!["pay", "bill", "pay bill"]);
        assert_eq!(v.transform("pay your bill").unwrap().to_vec(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_tfidf_l2() {
        let v = CountVectorizer::from_slice(
            br#"{
                "vocabulary": {"otp": 0, "code": 1},
                "idf": [3.0, 4.0],
                "norm": "l2"
            }"#,
        )
        .unwrap();
        let x = v.transform("otp code").unwrap();
        assert!((x[0] - 0.6).abs() < 1e-6);
        assert!((x[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_idf_length_mismatch() {
        let err = CountVectorizer::from_slice(br#"{"vocabulary": {"otp": 0}, "idf": [1.0, 2.0]}"#)
            .unwrap_err();
        assert!(matches!(err, ClassifierError::ArtifactInvalid { .. }));
    }

    #[test]
    fn test_binary_counts() {
        let v = CountVectorizer::from_slice(br#"{"vocabulary": {"spam": 0}, "binary": true}"#).unwrap();
        assert_eq!(v.transform("spam spam spam").unwrap().to_vec(), vec![1.0]);
    }
}
