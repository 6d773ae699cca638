//! Declarative preprocessing steps.

use crate::common::*;

/// A preprocessing step a downstream consumer applies to retrieved samples.
///
/// Adapters only declare the steps; applying them is out of scope here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformStep {
    /// Convert raw sample bytes to a float tensor scaled to `[0, 1]`.
    ToTensor,
    /// Channel-wise normalization with the given statistics.
    Normalize { mean: Vec<f64>, std: Vec<f64> },
}
