use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::math::ops;
use crate::math::tensor::{Tensor, TensorRead, TensorWrite};

/// A feedforward network built from an architecture: ordered positive layer
/// widths, input first, at least two entries. The input layer is a bare
/// activation row; every subsequent width becomes a [`Layer`] with weights,
/// biases, and a sigmoid activation.
///
/// A second instance with the same architecture serves as the gradient
/// accumulator for [`finite_diff`](Network::finite_diff) and
/// [`backprop`](Network::backprop): its weight/bias cells hold ∂C/∂p and its
/// activation rows hold the per-sample ∂C/∂a scratch values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    arch: Vec<usize>,
    input: Tensor,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a zero-parameter network; see [`randomize`](Network::randomize).
    pub fn new(arch: &[usize]) -> Network {
        assert!(
            arch.len() >= 2,
            "network: architecture needs an input and an output width, got {:?}",
            arch
        );
        assert!(
            arch.iter().all(|&w| w > 0),
            "network: zero-width layer in {:?}",
            arch
        );
        let layers = arch
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], ActivationFunction::Sigmoid))
            .collect();
        Network {
            arch: arch.to_vec(),
            input: Tensor::matrix(1, arch[0]),
            layers,
        }
    }

    pub fn arch(&self) -> &[usize] {
        &self.arch
    }

    /// The input register: populate this 1×arch[0] row before `forward`.
    pub fn input_mut(&mut self) -> &mut Tensor {
        &mut self.input
    }

    /// The final layer's activation row after `forward`.
    pub fn output(&self) -> &Tensor {
        &self.layers[self.layers.len() - 1].neurons
    }

    /// Independent uniform draws for every weight and bias; activation rows
    /// are untouched.
    pub fn randomize(&mut self, rng: &mut impl Rng, low: f32, high: f32) {
        for layer in &mut self.layers {
            layer.randomize(rng, low, high);
        }
    }

    /// Constant-fills every buffer, activation rows included. Zeroing a
    /// gradient accumulator between steps goes through here.
    pub fn fill(&mut self, value: f32) {
        self.input.fill(value);
        for layer in &mut self.layers {
            layer.neurons.fill(value);
            layer.weights.fill(value);
            layer.biases.fill(value);
        }
    }

    /// Propagates the current input activation through every layer in order:
    /// `a_i = act(a_{i−1} · w_i + b_i)`. Pure in the parameters and input;
    /// the only effect is on the layers' activation rows.
    pub fn forward(&mut self) {
        for i in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            let prev = if i == 0 { &self.input } else { &done[i - 1].neurons };
            let layer = &mut rest[0];
            ops::mat_mul(&mut layer.neurons, prev, &layer.weights);
            ops::add_assign(&mut layer.neurons, &layer.biases);
            let act = layer.activator;
            ops::activate(&mut layer.neurons, |x| act.function(x));
        }
    }

    /// Sets the input row, runs `forward`, and returns the output row.
    pub fn predict(&mut self, input: &[f32]) -> Vec<f32> {
        assert_eq!(
            input.len(),
            self.arch[0],
            "predict: {} inputs for an input width of {}",
            input.len(),
            self.arch[0]
        );
        for (j, &x) in input.iter().enumerate() {
            *self.input.at2_mut(0, j) = x;
        }
        self.forward();
        let out = self.output();
        (0..out.cols()).map(|j| out.at2(0, j)).collect()
    }

    /// Mean squared error over the rows of `target`, a [N × (in+out)] view
    /// whose rows are input features followed by expected outputs. Squared
    /// error is summed over output units and rows, then divided by the row
    /// count only.
    pub fn cost(&mut self, target: &impl TensorRead) -> f32 {
        let nin = self.arch[0];
        let nout = self.arch[self.arch.len() - 1];
        assert_eq!(
            target.cols(),
            nin + nout,
            "cost: target rows carry {} columns, expected {}",
            target.cols(),
            nin + nout
        );
        let samples = target.rows();

        let mut cost = 0.0;
        for i in 0..samples {
            let row = target.row(i);
            let x = row.slice(0, nin);
            let y = row.slice(nin, nout);

            ops::copy(&mut self.input, &x);
            self.forward();

            let out = self.output();
            for j in 0..nout {
                cost += MseLoss::term(out.at2(0, j), y.at1(j));
            }
        }
        cost / samples as f32
    }

    /// Numerical gradient estimate: one-sided forward difference of the cost
    /// for every weight and bias, against a single baseline cost computed
    /// once up front. The shared baseline biases the estimate by O(eps) but
    /// halves the cost evaluations; it is kept deliberately — this estimator
    /// is the correctness oracle for `backprop`, and its tolerances are
    /// calibrated against exactly this form.
    ///
    /// Traversal order is fixed: layer ascending, weight row then column,
    /// then bias column. O(parameters × rows × forward); not a training path
    /// for anything beyond toy datasets.
    pub fn finite_diff(&mut self, grad: &mut Network, target: &impl TensorRead, eps: f32) {
        assert_eq!(
            self.arch, grad.arch,
            "finite_diff: gradient network architecture {:?} does not match {:?}",
            grad.arch, self.arch
        );
        let baseline = self.cost(target);

        for l in 0..self.layers.len() {
            for j in 0..self.arch[l] {
                for k in 0..self.arch[l + 1] {
                    let saved = self.layers[l].weights.at2(j, k);
                    *self.layers[l].weights.at2_mut(j, k) = saved + eps;
                    let perturbed = self.cost(target);
                    *grad.layers[l].weights.at2_mut(j, k) = (perturbed - baseline) / eps;
                    *self.layers[l].weights.at2_mut(j, k) = saved;
                }
            }
            for j in 0..self.arch[l + 1] {
                let saved = self.layers[l].biases.at2(0, j);
                *self.layers[l].biases.at2_mut(0, j) = saved + eps;
                let perturbed = self.cost(target);
                *grad.layers[l].biases.at2_mut(0, j) = (perturbed - baseline) / eps;
                *self.layers[l].biases.at2_mut(0, j) = saved;
            }
        }
    }

    /// Analytic reverse-mode gradient of the cost, accumulated over every
    /// row of `target` and averaged at the end. Full batch: one call walks
    /// the entire dataset.
    ///
    /// The gradient network's activation rows serve as per-unit ∂C/∂a
    /// accumulators. For each sample: forward, seed the output row with the
    /// squared-error derivative, then walk layers back to front — each
    /// unit's `delta` feeds its bias gradient, its incoming weight gradients
    /// (scaled by the previous activation), and the previous layer's ∂C/∂a
    /// accumulator (scaled by the weight), which must happen before that
    /// layer is processed.
    pub fn backprop(&mut self, grad: &mut Network, target: &impl TensorRead) {
        assert_eq!(
            self.arch, grad.arch,
            "backprop: gradient network architecture {:?} does not match {:?}",
            grad.arch, self.arch
        );
        let nin = self.arch[0];
        let nout = self.arch[self.arch.len() - 1];
        assert_eq!(
            target.cols(),
            nin + nout,
            "backprop: target rows carry {} columns, expected {}",
            target.cols(),
            nin + nout
        );
        let samples = target.rows();

        grad.fill(0.0);

        for i in 0..samples {
            let row = target.row(i);
            let x = row.slice(0, nin);
            let y = row.slice(nin, nout);

            ops::copy(&mut self.input, &x);
            self.forward();

            // ∂C/∂a accumulators start clean for every sample
            grad.input.fill(0.0);
            for layer in &mut grad.layers {
                layer.neurons.fill(0.0);
            }

            let last = self.layers.len() - 1;
            let out = &self.layers[last].neurons;
            for j in 0..nout {
                *grad.layers[last].neurons.at2_mut(0, j) =
                    MseLoss::derivative(out.at2(0, j), y.at1(j));
            }

            for l in (0..self.layers.len()).rev() {
                let (g_done, g_rest) = grad.layers.split_at_mut(l);
                let g_layer = &mut g_rest[0];
                let layer = &self.layers[l];
                let prev = if l == 0 { &self.input } else { &self.layers[l - 1].neurons };

                for j in 0..layer.size {
                    let a = layer.neurons.at2(0, j);
                    let dc_da = g_layer.neurons.at2(0, j);
                    let delta = dc_da * layer.activator.derivative_from_output(a);

                    *g_layer.biases.at2_mut(0, j) += delta;

                    for k in 0..prev.cols() {
                        let w = layer.weights.at2(k, j);
                        *g_layer.weights.at2_mut(k, j) += delta * prev.at2(0, k);
                        if l == 0 {
                            *grad.input.at2_mut(0, k) += delta * w;
                        } else {
                            *g_done[l - 1].neurons.at2_mut(0, k) += delta * w;
                        }
                    }
                }
            }
        }

        // mean gradient over the dataset
        for layer in &mut grad.layers {
            for j in 0..layer.weights.rows() {
                for k in 0..layer.weights.cols() {
                    *layer.weights.at2_mut(j, k) /= samples as f32;
                }
            }
            for j in 0..layer.biases.cols() {
                *layer.biases.at2_mut(0, j) /= samples as f32;
            }
        }
    }

    /// Serializes the network (architecture and parameters) to a
    /// pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by
    /// `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tensor::TensorView;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    static XOR_TABLE: [f32; 12] = [
        0.0, 0.0, 0.0,
        0.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 0.0,
    ];

    fn xor_target() -> TensorView<'static> {
        TensorView::matrix(&XOR_TABLE, 4, 3, 3, 1)
    }

    #[test]
    fn layer_shapes_satisfy_the_architecture_relations() {
        let nn = Network::new(&[3, 5, 2]);
        assert_eq!(nn.layers.len(), 2);
        assert_eq!(nn.layers[0].weights.shape(), &[3, 5]);
        assert_eq!(nn.layers[0].neurons.shape(), &[1, 5]);
        assert_eq!(nn.layers[1].weights.shape(), &[5, 2]);
        assert_eq!(nn.layers[1].biases.shape(), &[1, 2]);
    }

    #[test]
    #[should_panic(expected = "architecture")]
    fn single_width_architecture_is_rejected() {
        Network::new(&[2]);
    }

    #[test]
    fn identity_network_passes_the_input_through() {
        let mut nn = Network::new(&[1, 1]);
        nn.layers[0].activator = ActivationFunction::Identity;
        *nn.layers[0].weights.at2_mut(0, 0) = 1.0;
        let out = nn.predict(&[0.42]);
        assert_eq!(out, vec![0.42]);
    }

    #[test]
    fn forward_is_deterministic_in_input_and_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut nn = Network::new(&[2, 2, 1]);
        nn.randomize(&mut rng, 0.0, 1.0);
        let a = nn.predict(&[1.0, 0.0]);
        let b = nn.predict(&[1.0, 0.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn cost_is_zero_for_a_perfect_constant_fit() {
        // one sample, label 0.5; force the output to exactly 0.5
        let table: [f32; 2] = [0.3, 0.5];
        let target = TensorView::matrix(&table, 1, 2, 2, 1);
        let mut nn = Network::new(&[1, 1]);
        nn.layers[0].activator = ActivationFunction::Identity;
        *nn.layers[0].biases.at2_mut(0, 0) = 0.5;
        assert_eq!(nn.cost(&target), 0.0);
    }

    #[test]
    fn cost_averages_over_rows_not_output_units() {
        // two outputs, each off by 1.0: cost must be 2.0, not 1.0
        let table: [f32; 3] = [0.0, 1.0, 1.0];
        let target = TensorView::matrix(&table, 1, 3, 3, 1);
        let mut nn = Network::new(&[1, 2]);
        nn.layers[0].activator = ActivationFunction::Identity;
        let cost = nn.cost(&target);
        assert!((cost - 2.0).abs() < 1e-6);
    }

    #[test]
    fn backprop_agrees_with_finite_difference_on_xor() {
        let target = xor_target();
        let mut rng = StdRng::seed_from_u64(17);
        let mut nn = Network::new(&[2, 2, 1]);
        nn.randomize(&mut rng, 0.0, 1.0);

        let mut fd = Network::new(&[2, 2, 1]);
        let mut bp = Network::new(&[2, 2, 1]);
        nn.finite_diff(&mut fd, &target, 1e-3);
        nn.backprop(&mut bp, &target);

        for l in 0..nn.layers.len() {
            for j in 0..fd.layers[l].weights.rows() {
                for k in 0..fd.layers[l].weights.cols() {
                    let d = (fd.layers[l].weights.at2(j, k) - bp.layers[l].weights.at2(j, k)).abs();
                    assert!(d < 1e-2, "weight gradient [{l}][{j}][{k}] differs by {d}");
                }
            }
            for j in 0..fd.layers[l].biases.cols() {
                let d = (fd.layers[l].biases.at2(0, j) - bp.layers[l].biases.at2(0, j)).abs();
                assert!(d < 1e-2, "bias gradient [{l}][{j}] differs by {d}");
            }
        }
    }

    #[test]
    fn finite_diff_leaves_parameters_untouched() {
        let target = xor_target();
        let mut rng = StdRng::seed_from_u64(5);
        let mut nn = Network::new(&[2, 2, 1]);
        nn.randomize(&mut rng, 0.0, 1.0);
        let before = nn.clone();

        let mut grad = Network::new(&[2, 2, 1]);
        nn.finite_diff(&mut grad, &target, 1e-3);

        for l in 0..nn.layers.len() {
            assert_eq!(nn.layers[l].weights, before.layers[l].weights);
            assert_eq!(nn.layers[l].biases, before.layers[l].biases);
        }
    }

    #[test]
    fn json_round_trip_preserves_parameters() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut nn = Network::new(&[2, 3, 1]);
        nn.randomize(&mut rng, -1.0, 1.0);

        let dir = std::env::temp_dir().join("magnetite-nn-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("net.json");
        let path = path.to_str().unwrap();

        nn.save_json(path).unwrap();
        let mut loaded = Network::load_json(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded.arch(), nn.arch());
        assert_eq!(nn.predict(&[0.5, -0.5]), loaded.predict(&[0.5, -0.5]));
    }
}
