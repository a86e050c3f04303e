//! One request end to end: classify, resolve, advise.

use log::info;
use serde::Serialize;

use crate::advisor::{advise_with, OtpExpiry, Suggestion};
use crate::category::{resolve, Category};
use crate::classifier::{Classifier, ClassifierError};

/// Anything that can turn a message into a model label.
pub trait LabelPredictor {
    fn classify(&self, message: &str) -> Result<i64, ClassifierError>;
}

impl LabelPredictor for Classifier {
    fn classify(&self, message: &str) -> Result<i64, ClassifierError> {
        Classifier::classify(self, message)
    }
}

impl<P: LabelPredictor + ?Sized> LabelPredictor for &P {
    fn classify(&self, message: &str) -> Result<i64, ClassifierError> {
        (**self).classify(message)
    }
}

/// The response to a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub label: i64,
    pub category: Category,
    pub suggestion: Suggestion,
}

/// Owns the predictor and the per-process advice settings.
#[derive(Debug)]
pub struct Pipeline<P = Classifier> {
    predictor: P,
    otp_expiry: OtpExpiry,
}

impl<P: LabelPredictor> Pipeline<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor, otp_expiry: OtpExpiry::default() }
    }

    pub fn with_otp_expiry(mut self, expiry: OtpExpiry) -> Self {
        self.otp_expiry = expiry;
        self
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn otp_expiry(&self) -> OtpExpiry {
        self.otp_expiry
    }

    /// Handles one message. Blank messages are rejected before the predictor runs.
    pub fn handle(&self, message: &str) -> Result<Outcome, ClassifierError> {
        if message.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let label = self.predictor.classify(message)?;
        let category = resolve(label);
        info!("Message classified as {} (label {})", category, label);

        Ok(Outcome {
            label,
            category,
            suggestion: advise_with(category, message, self.otp_expiry),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedPredictor {
        label: i64,
        calls: Cell<usize>,
    }

    impl FixedPredictor {
        fn new(label: i64) -> Self {
            Self { label, calls: Cell::new(0) }
        }
    }

    impl LabelPredictor for FixedPredictor {
        fn classify(&self, _message: &str) -> Result<i64, ClassifierError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.label)
        }
    }

    struct FailingPredictor;

    impl LabelPredictor for FailingPredictor {
        fn classify(&self, _message: &str) -> Result<i64, ClassifierError> {
            Err(ClassifierError::ClassificationError("shape mismatch".into()))
        }
    }

    #[test]
    fn test_blank_message_skips_predictor() {
        let pipeline = Pipeline::new(FixedPredictor::new(6));
        for message in ["", "   ", "\n\t"] {
            assert!(matches!(pipeline.handle(message), Err(ClassifierError::EmptyInput)));
        }
        assert_eq!(pipeline.predictor().calls.get(), 0);
    }

    #[test]
    fn test_handle_resolves_and_advises() {
        let pipeline = Pipeline::new(FixedPredictor::new(6));
        let outcome = pipeline.handle("Please pay your bill").unwrap();
        assert_eq!(outcome.category, Category::Transactional);
        assert_eq!(
            outcome.suggestion.advice_text.as_deref(),
            Some("Offer discounts for frequent bill payers.")
        );
        assert_eq!(pipeline.predictor().calls.get(), 1);
    }

    #[test]
    fn test_unknown_label() {
        let outcome = Pipeline::new(FixedPredictor::new(9)).handle("hello").unwrap();
        assert_eq!(outcome.category, Category::Unknown);
        assert!(outcome.suggestion.is_empty());
    }

    #[test]
    fn test_otp_expiry_setting() {
        let pipeline = Pipeline::new(FixedPredictor::new(2)).with_otp_expiry(OtpExpiry::clamped(45));
        let outcome = pipeline.handle("otp 1234").unwrap();
        assert_eq!(outcome.suggestion.extra.unwrap().expiry_minutes.minutes(), 30);
    }

    #[test]
    fn test_failure_does_not_poison_pipeline() {
        let pipeline = Pipeline::new(FailingPredictor);
        assert!(pipeline.handle("first").is_err());
        let err = pipeline.handle("second").unwrap_err();
        assert!(!err.is_fatal());
    }
}
