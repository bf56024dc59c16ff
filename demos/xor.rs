use rand::SeedableRng;
use rand::rngs::StdRng;

use magnetite_nn::{
    GradientMethod, Network, Sgd, TensorView, TrainConfig, train_network,
};

fn main() {
    // one row per sample: two inputs followed by the expected output
    static XOR_TRAIN: [f32; 12] = [
        0.0, 0.0, 0.0,
        0.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 0.0,
    ];
    let target = TensorView::matrix(&XOR_TRAIN, 4, 3, 3, 1);

    let mut rng = StdRng::seed_from_u64(0);
    let mut network = Network::new(&[2, 2, 1]);
    network.randomize(&mut rng, 0.0, 1.0);

    let optimizer = Sgd::new(0.1);
    let config = TrainConfig::new(1_000_000, GradientMethod::Backprop);
    let cost = train_network(&mut network, &target, &optimizer, &config);
    println!("final cost = {cost:.6}");

    for a in 0..2u32 {
        for b in 0..2u32 {
            let out = network.predict(&[a as f32, b as f32]);
            println!("{a} ^ {b} -> {:.4}", out[0]);
        }
    }
}
