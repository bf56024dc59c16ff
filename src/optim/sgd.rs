use crate::network::network::Network;

/// Plain gradient descent: `param -= learning_rate · grad` for every weight
/// and bias. No momentum, no adaptive scaling.
pub struct Sgd {
    pub learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update from a gradient network of identical architecture.
    /// The update is in place and atomic with respect to the epoch loop: no
    /// caller observes a partially-updated parameter set.
    pub fn step(&self, network: &mut Network, grad: &Network) {
        assert_eq!(
            network.arch(),
            grad.arch(),
            "sgd: gradient network architecture {:?} does not match {:?}",
            grad.arch(),
            network.arch()
        );
        for (layer, g) in network.layers.iter_mut().zip(grad.layers.iter()) {
            layer.apply_gradients(g, self.learning_rate);
        }
    }
}
