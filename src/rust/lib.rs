//! Classifies short messages (SMS, notifications) into fixed categories and
//! suggests a follow-up action for each.
//!
//! A vectorizer and a linear model, both fitted offline, are loaded once from
//! an artifacts directory. Every message then goes through
//! classify → [`resolve`] → [`advise`].
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use msgclass::{ArtifactStore, Classifier, Pipeline};
//!
//! let classifier = Classifier::load(&ArtifactStore::new("artifacts"))?;
//! let pipeline = Pipeline::new(classifier);
//!
//! let outcome = pipeline.handle("Your electricity bill of Rs 840 is due")?;
//! println!("Category: {}", outcome.category);
//! if let Some(advice) = &outcome.suggestion.advice_text {
//!     println!("Suggested Action: {}", advice);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # In-memory artifacts
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use msgclass::{Category, Classifier, CountVectorizer, LinearModel, Pipeline};
//!
//! let classifier = Classifier::builder()
//!     .with_vectorizer(CountVectorizer::from_vocabulary(["otp", "parcel"])?)
//!     .with_model(LinearModel::new(
//!         vec![2, 1],
//!         vec![vec![1.0, 0.0], vec![0.0, 1.0]],
//!         vec![],
//!     )?)
//!     .build()?;
//!
//! let outcome = Pipeline::new(classifier).handle("Your parcel is out for delivery")?;
//! assert_eq!(outcome.category, Category::Logistic);
//! # Ok(())
//! # }
//! ```

pub mod advisor;
pub mod artifacts;
pub mod category;
pub mod classifier;
pub mod pipeline;
pub mod render;
#[cfg(feature = "onnx")]
mod runtime;

pub use advisor::{advise, advise_with, ActionButton, Notice, NoticeLevel, OtpExpiry, OtpOptions, Suggestion};
pub use artifacts::ArtifactStore;
pub use category::{resolve, Category};
pub use classifier::{
    ArtifactKind, Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, CountVectorizer,
    LinearModel, Model, Vectorizer,
};
#[cfg(feature = "onnx")]
pub use classifier::OnnxModel;
pub use pipeline::{LabelPredictor, Outcome, Pipeline};
#[cfg(feature = "onnx")]
pub use runtime::{Optimization, RuntimeConfig};

/// Initializes `env_logger`, logging warnings and above unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
