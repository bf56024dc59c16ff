use serde::{Serialize, Deserialize};

/// Per-layer scalar activation, resolved once at network construction.
/// A closed variant set instead of raw function pointers; the reference
/// network uses `Sigmoid` everywhere, `Identity` exists for pass-through
/// layers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f32) -> f32 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative expressed in terms of the *already-computed output*:
    /// for sigmoid, σ'(a) = a·(1−a). Callers must pass the layer's
    /// post-activation value, never the pre-activation sum.
    pub fn derivative_from_output(&self, a: f32) -> f32 {
        match self {
            ActivationFunction::Sigmoid => a * (1.0 - a),
            ActivationFunction::Identity => 1.0,
        }
    }
}
