use std::collections::BTreeMap;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use crate::error::{FitError, Result};
use crate::network::network::Network;

/// One skip-gram training pair: `label` is 1.0 for a real neighbour and 0.0
/// for a negative sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub center: usize,
    pub context: usize,
    pub label: f64,
}

/// Builds skip-gram samples from a token-id sequence.
///
/// Negative contexts are drawn in proportion to each token's corpus
/// frequency.
pub struct SkipGramSampler {
    sequence: Vec<usize>,
    window: usize,
    negative_samples: usize,
    tokens: Vec<usize>,
    frequencies: WeightedIndex<usize>,
}

impl SkipGramSampler {
    pub fn new(sequence: Vec<usize>, window: usize, negative_samples: usize) -> Result<SkipGramSampler> {
        if sequence.is_empty() {
            return Err(FitError::InvalidArgument("token sequence must not be empty".into()));
        }
        if window == 0 {
            return Err(FitError::InvalidArgument("window must be at least 1".into()));
        }

        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for &token in &sequence {
            *counts.entry(token).or_insert(0) += 1;
        }
        let tokens: Vec<usize> = counts.keys().copied().collect();
        let frequencies = WeightedIndex::new(counts.values().copied())
            .map_err(|e| FitError::InvalidArgument(format!("frequency table: {e}")))?;

        Ok(SkipGramSampler {
            sequence,
            window,
            negative_samples,
            tokens,
            frequencies,
        })
    }

    /// Largest token id in the sequence.
    pub fn max_token(&self) -> usize {
        self.tokens[self.tokens.len() - 1]
    }

    /// Every positive pair within the window plus `negative_samples` random
    /// contexts per center position.
    pub fn samples<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Sample> {
        let n = self.sequence.len();
        let mut samples = Vec::new();

        for (i, &center) in self.sequence.iter().enumerate() {
            let lo = i.saturating_sub(self.window);
            let hi = (i + self.window).min(n - 1);
            for j in (lo..=hi).filter(|&j| j != i) {
                samples.push(Sample { center, context: self.sequence[j], label: 1.0 });
            }

            for _ in 0..self.negative_samples {
                let context = self.tokens[self.frequencies.sample(rng)];
                samples.push(Sample { center, context, label: 0.0 });
            }
        }

        samples
    }
}

/// One pass of skip-gram training: each sample becomes a backpropagation call
/// with a one-hot center as input and the one-hot context scaled by the label
/// as target. The network must be `vocab x ... x vocab`. Returns the mean
/// pre-update loss, or `InvalidArgument` if the pass has no samples.
pub fn train_embeddings<R: Rng + ?Sized>(
    network: &mut Network,
    sampler: &SkipGramSampler,
    learning_rate: f64,
    rng: &mut R,
) -> Result<f64> {
    let vocab = network.input_size();
    if network.output_size() != vocab {
        return Err(FitError::dimension("embedding output width", vocab, network.output_size()));
    }
    if sampler.max_token() >= vocab {
        return Err(FitError::IndexOutOfBounds { index: sampler.max_token(), len: vocab });
    }

    let samples = sampler.samples(rng);
    if samples.is_empty() {
        return Err(FitError::InvalidArgument(
            "sequence yields no samples: it needs two tokens or negative_samples > 0".into(),
        ));
    }
    let mut total_loss = 0.0;
    for sample in &samples {
        let input = one_hot(sample.center, vocab, 1.0);
        let target = one_hot(sample.context, vocab, sample.label);
        total_loss += network.backpropagation(&input, &target, learning_rate)?;
    }

    debug!(samples = samples.len(), "embedding pass finished");
    Ok(total_loss / samples.len() as f64)
}

fn one_hot(index: usize, len: usize, value: f64) -> Vec<f64> {
    let mut v = vec![0.0; len];
    v[index] = value;
    v
}
