use std::collections::HashMap;

use log::info;
use ndarray::{Array1, Axis};
use ort::session::Session;
use ort::value::Tensor;

use super::error::{ArtifactKind, ClassifierError};
use super::model::Model;
use crate::runtime::RuntimeConfig;

/// A converted classifier executed through ONNX Runtime.
///
/// The graph takes one float input of shape `[1, n_features]` and emits the
/// predicted label as an int64 tensor on its first output.
#[derive(Debug)]
pub struct OnnxModel {
    session: Session,
    input_name: String,
}

impl OnnxModel {
    pub fn from_memory(bytes: &[u8], config: &RuntimeConfig) -> Result<Self, ClassifierError> {
        let invalid = |reason: String| ClassifierError::invalid(ArtifactKind::Model, reason);

        let session = config
            .session_builder()
            .and_then(|builder| builder.commit_from_memory(bytes))
            .map_err(|e| invalid(format!("failed to load ONNX model: {}", e)))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| invalid("ONNX model has no inputs".to_string()))?;
        if session.outputs.is_empty() {
            return Err(invalid("ONNX model has no outputs".to_string()));
        }
        info!("ONNX model loaded (input '{}')", input_name);

        Ok(Self { session, input_name })
    }
}

impl Model for OnnxModel {
    fn n_features(&self) -> Option<usize> {
        None
    }

    fn predict(&self, features: &Array1<f32>) -> Result<i64, ClassifierError> {
        let batch = features.clone().insert_axis(Axis(0));

        let mut inputs = HashMap::new();
        inputs.insert(self.input_name.as_str(), Tensor::from_array(batch)?);

        let outputs = self.session.run(inputs)?;
        let labels = outputs[0].try_extract_tensor::<i64>()?;
        labels.iter().next().copied().ok_or_else(|| {
            ClassifierError::ClassificationError("ONNX model returned no label".to_string())
        })
    }
}
