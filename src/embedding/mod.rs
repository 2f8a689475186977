pub mod skipgram;

pub use skipgram::{train_embeddings, Sample, SkipGramSampler};
