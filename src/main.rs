// Demo driver: trains a [2, 2, 1] network on a 2-input boolean gate with
// both gradient estimators and prints the learned truth table.
//
//   cargo run --release            # xor
//   cargo run --release -- or      # or | and | xor

use std::env;
use std::process;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use magnetite_nn::{
    GradientMethod, Network, Sgd, TensorView, TrainConfig, train_network,
};

const FEATURES: usize = 2;
const LABELS: usize = 1;

// one row per sample: [x0, x1, label]
static OR_TRAIN: [f32; 12] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 1.0,
];

static AND_TRAIN: [f32; 12] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    1.0, 0.0, 0.0,
    1.0, 1.0, 1.0,
];

static XOR_TRAIN: [f32; 12] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 0.0,
];

fn main() {
    let gate = env::args().nth(1).unwrap_or_else(|| "xor".to_string());
    let table: &[f32; 12] = match gate.as_str() {
        "or" => &OR_TRAIN,
        "and" => &AND_TRAIN,
        "xor" => &XOR_TRAIN,
        other => {
            eprintln!("unknown gate '{other}', expected one of: or, and, xor");
            process::exit(1);
        }
    };

    let row_width = FEATURES + LABELS;
    let target = TensorView::matrix(table, 4, row_width, row_width, 1);

    run(
        "finite diff",
        GradientMethod::FiniteDiff { eps: 1e-3 },
        100_000,
        &target,
    );
    run("backprop", GradientMethod::Backprop, 1_000_000, &target);
}

fn run(label: &str, method: GradientMethod, epochs: usize, target: &TensorView) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut network = Network::new(&[2, 2, 1]);
    network.randomize(&mut rng, 0.0, 1.0);

    let optimizer = Sgd::new(0.1);
    let config = TrainConfig::new(epochs, method);

    let t_start = Instant::now();
    let cost = train_network(&mut network, target, &optimizer, &config);
    let elapsed = t_start.elapsed().as_secs_f64();

    println!("{label}: cost({cost:.6}), epochs({epochs}), time({elapsed:.3}s)");
    println!("-----------------");
    for a in 0..2u32 {
        for b in 0..2u32 {
            let out = network.predict(&[a as f32, b as f32]);
            println!("{a} {b} = {:.6}", out[0]);
        }
    }
}
