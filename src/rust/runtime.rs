//! ONNX Runtime settings for converted models.

use std::sync::OnceLock;

use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::Result as OrtResult;

static ENVIRONMENT: OnceLock<bool> = OnceLock::new();

/// Graph optimizations applied when an ONNX model is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Optimization {
    Disabled,
    Basic,
    Extended,
    #[default]
    All,
}

impl From<Optimization> for GraphOptimizationLevel {
    fn from(optimization: Optimization) -> Self {
        match optimization {
            Optimization::Disabled => GraphOptimizationLevel::Disable,
            Optimization::Basic => GraphOptimizationLevel::Level1,
            Optimization::Extended => GraphOptimizationLevel::Level2,
            Optimization::All => GraphOptimizationLevel::Level3,
        }
    }
}

/// How an ONNX model session is executed.
///
/// Messages are scored one at a time, so a single thread is the default;
/// `threads == 0` leaves the choice to ONNX Runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub threads: usize,
    pub optimization: Optimization,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { threads: 1, optimization: Optimization::default() }
    }
}

impl RuntimeConfig {
    /// A session builder carrying these settings, ready for `commit_from_memory`.
    pub fn session_builder(&self) -> OrtResult<SessionBuilder> {
        environment_ready();
        let mut builder = Session::builder()?
            .with_optimization_level(self.optimization.into())?;
        if self.threads > 0 {
            builder = builder.with_intra_threads(self.threads)?;
        }
        Ok(builder)
    }
}

/// Commits the process-wide environment on first use. A failed commit is
/// logged once; the session builder then reports the underlying error.
fn environment_ready() -> bool {
    *ENVIRONMENT.get_or_init(|| match ort::init().with_name("msgclass").commit() {
        Ok(_) => true,
        Err(e) => {
            log::warn!("ONNX Runtime environment unavailable: {}", e);
            false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_committed_once() {
        assert_eq!(environment_ready(), environment_ready());
    }

    #[test]
    fn test_optimization_mapping() {
        assert!(matches!(
            GraphOptimizationLevel::from(Optimization::Disabled),
            GraphOptimizationLevel::Disable
        ));
        assert!(matches!(
            GraphOptimizationLevel::from(RuntimeConfig::default().optimization),
            GraphOptimizationLevel::Level3
        ));
    }

    #[test]
    fn test_session_builder() {
        let config = RuntimeConfig { threads: 2, optimization: Optimization::Basic };
        assert!(config.session_builder().is_ok());
        assert!(RuntimeConfig { threads: 0, ..config }.session_builder().is_ok());
    }
}
