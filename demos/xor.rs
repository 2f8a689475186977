use gradfit::train::train_loop;
use gradfit::{ConstantRate, Network};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> gradfit::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut network = Network::new(&[2, 3, 3, 1], &mut rng)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let mut schedule = ConstantRate::new(0.1);
    let report = train_loop(&mut network, &inputs, &expected_outputs, &mut schedule, 30_000, 0)?;

    for stats in report.history.iter().step_by(3000) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }
    println!("Final loss after {} epochs: {:.6}", report.epochs_run, report.final_loss);

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.forward(input)?[0]);
    }
    Ok(())
}
