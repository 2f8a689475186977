//! Command-line front end: reads a tab-separated dataset from stdin, builds or
//! loads a network, then optionally trains it, prints its outputs and loss,
//! and saves the weights.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use gradfit::{read_dataset, Network, ScheduleConfig, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Long options that are also accepted with a single leading dash.
const SINGLE_DASH_LONG: &[&str] = &[
    "size", "train", "forward", "loss", "iterations", "config", "seed", "log-level",
];

#[derive(Parser, Debug)]
#[command(name = "gradfit")]
#[command(about = "Train and evaluate sigmoid networks on tab-separated data from stdin", long_about = None)]
struct Cli {
    /// Layer widths, comma separated (e.g. 2,3,1)
    #[arg(long, value_delimiter = ',')]
    size: Option<Vec<usize>>,

    /// Load weights from this file instead of initializing randomly
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Write the final weights to this file
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Train on the dataset
    #[arg(long)]
    train: bool,

    /// Print the network output for every dataset row
    #[arg(long)]
    forward: bool,

    /// Print the mean squared error over the dataset
    #[arg(long)]
    loss: bool,

    /// Training epochs
    #[arg(long, default_value_t = 1024)]
    iterations: usize,

    /// JSON training configuration; replaces --iterations and the default rate
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for weight initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.strip_prefix('-') {
            Some(name) if !name.starts_with('-') && SINGLE_DASH_LONG.contains(&name) => format!("-{arg}"),
            _ => arg,
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.iterations == 0 {
        bail!("-iterations must be positive");
    }

    let dataset = read_dataset(io::stdin().lock()).context("reading dataset from stdin")?;
    let inputs = dataset.features().to_vec();
    let targets = dataset.label_rows();

    let mut network = match (&cli.input, &cli.size) {
        (Some(path), _) => Network::load(path)
            .with_context(|| format!("loading weights from {}", path.display()))?,
        (None, sizes) => {
            let sizes = sizes.clone().unwrap_or_else(|| vec![dataset.arity(), 1]);
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Network::new(&sizes, &mut rng)?
        }
    };
    info!(layers = ?network.layer_sizes(), rows = dataset.len(), "network ready");

    if cli.train {
        let config = match &cli.config {
            Some(path) => TrainConfig::load_json(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => TrainConfig::new(cli.iterations, ScheduleConfig::Constant { rate: 0.1 }),
        };
        let report = gradfit::train_network(&mut network, &inputs, &targets, &config)?;
        info!(epochs = report.epochs_run, loss = report.final_loss, "training complete");
    }

    if cli.forward {
        for input in &inputs {
            let output = network.forward(input)?;
            let line: Vec<String> = output.iter().map(|v| v.to_string()).collect();
            println!("{}", line.join("\t"));
        }
    }

    if cli.loss {
        println!("{}", network.mean_squared_error(&inputs, &targets)?);
    }

    if let Some(path) = &cli.output {
        network
            .save(path)
            .with_context(|| format!("saving weights to {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let normalized = normalize_args(args(&["gradfit", "-size", "2,3,1", "-train", "-iterations", "5", "-o", "w.tsv"]));
        let cli = Cli::parse_from(normalized);
        assert_eq!(cli.size, Some(vec![2, 3, 1]));
        assert!(cli.train);
        assert_eq!(cli.iterations, 5);
        assert_eq!(cli.output, Some(PathBuf::from("w.tsv")));
        assert!(!cli.forward);
    }

    #[test]
    fn double_dash_flags_pass_through() {
        let normalized = normalize_args(args(&["gradfit", "--forward", "--loss", "-i", "in.tsv"]));
        assert_eq!(normalized, args(&["gradfit", "--forward", "--loss", "-i", "in.tsv"]));
        let cli = Cli::parse_from(normalized);
        assert!(cli.forward && cli.loss);
        assert_eq!(cli.input, Some(PathBuf::from("in.tsv")));
        assert_eq!(cli.iterations, 1024);
    }
}
