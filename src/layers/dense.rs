use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::math::tensor::{Tensor, TensorRead, TensorWrite};

/// One transformation stage: `neurons = act(prev · weights + biases)`.
///
/// `neurons` and `biases` are 1×size rows; `weights` is input_size×size, so
/// its row count always equals the previous layer's width. The input layer
/// is not a `Layer` — the network keeps a bare activation row for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub neurons: Tensor,
    pub weights: Tensor,
    pub biases: Tensor,
    pub activator: ActivationFunction,
}

impl Layer {
    /// Zero-parameter layer; call `randomize` before training.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            size,
            neurons: Tensor::matrix(1, size),
            weights: Tensor::matrix(input_size, size),
            biases: Tensor::matrix(1, size),
            activator: activation,
        }
    }

    /// Uniform draws in `[low, high)` for weights and biases; the activation
    /// row is left untouched.
    pub fn randomize(&mut self, rng: &mut impl Rng, low: f32, high: f32) {
        self.weights.randomize(rng, low, high);
        self.biases.randomize(rng, low, high);
    }

    /// One gradient-descent update from the matching gradient-network layer:
    /// `p -= rate · g` for every weight and bias.
    pub fn apply_gradients(&mut self, grad: &Layer, rate: f32) {
        for j in 0..self.weights.rows() {
            for k in 0..self.weights.cols() {
                *self.weights.at2_mut(j, k) -= rate * grad.weights.at2(j, k);
            }
        }
        for j in 0..self.biases.cols() {
            *self.biases.at2_mut(0, j) -= rate * grad.biases.at2(0, j);
        }
    }
}
