// Skip-gram sampling and embedding training.

use gradfit::embedding::{train_embeddings, SkipGramSampler};
use gradfit::{FitError, Network};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn positives_cover_the_window() {
    let sampler = SkipGramSampler::new(vec![0, 1, 2, 1, 0, 2], 1, 2).unwrap();
    let samples = sampler.samples(&mut StdRng::seed_from_u64(5));
    assert_eq!(samples.len(), 10 + 6 * 2);

    let positives: Vec<(usize, usize)> = samples
        .iter()
        .filter(|s| s.label == 1.0)
        .map(|s| (s.center, s.context))
        .collect();
    assert_eq!(
        positives,
        vec![(0, 1), (1, 0), (1, 2), (2, 1), (2, 1), (1, 2), (1, 0), (0, 1), (0, 2), (2, 0)]
    );
    assert!(samples.iter().all(|s| s.context <= 2));
}

#[test]
fn negatives_follow_token_frequency() {
    let mut sequence = vec![0; 9];
    sequence.push(1);
    let sampler = SkipGramSampler::new(sequence, 1, 100).unwrap();
    let samples = sampler.samples(&mut StdRng::seed_from_u64(17));
    let negatives: Vec<_> = samples.iter().filter(|s| s.label == 0.0).collect();
    assert_eq!(negatives.len(), 1000);
    let common = negatives.iter().filter(|s| s.context == 0).count();
    assert!(common > 800, "only {common} of 1000 negatives were the frequent token");
}

#[test]
fn sampling_is_reproducible_with_a_seed() {
    let sampler = SkipGramSampler::new(vec![3, 1, 4, 1, 5, 9, 2, 6], 2, 3).unwrap();
    let a = sampler.samples(&mut StdRng::seed_from_u64(8));
    let b = sampler.samples(&mut StdRng::seed_from_u64(8));
    assert_eq!(a, b);
}

#[test]
fn sampler_rejects_empty_sequence_and_zero_window() {
    assert!(matches!(SkipGramSampler::new(vec![], 1, 1), Err(FitError::InvalidArgument(_))));
    assert!(matches!(SkipGramSampler::new(vec![0, 1], 0, 1), Err(FitError::InvalidArgument(_))));
}

#[test]
fn training_pass_updates_the_network() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut net = Network::new(&[4, 2, 4], &mut rng).unwrap();
    let before = net.clone();
    let sampler = SkipGramSampler::new(vec![0, 1, 2, 3, 2, 1, 0], 1, 1).unwrap();

    let loss = train_embeddings(&mut net, &sampler, 0.1, &mut rng).unwrap();
    assert!(loss.is_finite() && loss >= 0.0);
    assert_ne!(net, before);
}

#[test]
fn token_outside_vocabulary_is_rejected() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut net = Network::new(&[3, 2, 3], &mut rng).unwrap();
    let sampler = SkipGramSampler::new(vec![0, 1, 5], 1, 0).unwrap();
    match train_embeddings(&mut net, &sampler, 0.1, &mut rng) {
        Err(FitError::IndexOutOfBounds { index, len }) => {
            assert_eq!(index, 5);
            assert_eq!(len, 3);
        }
        other => panic!("expected IndexOutOfBounds, got {other:?}"),
    }
}

#[test]
fn embedding_network_must_be_square() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut net = Network::new(&[3, 2, 4], &mut rng).unwrap();
    let sampler = SkipGramSampler::new(vec![0, 1, 2], 1, 0).unwrap();
    assert!(matches!(
        train_embeddings(&mut net, &sampler, 0.1, &mut rng),
        Err(FitError::DimensionMismatch { .. })
    ));
}

#[test]
fn pass_without_samples_is_rejected() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut net = Network::new(&[2, 2, 2], &mut rng).unwrap();
    let before = net.clone();
    let sampler = SkipGramSampler::new(vec![1], 2, 0).unwrap();
    assert!(matches!(
        train_embeddings(&mut net, &sampler, 0.1, &mut rng),
        Err(FitError::InvalidArgument(_))
    ));
    assert_eq!(net, before);
}
