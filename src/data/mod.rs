pub mod dataset;
pub mod tsv;

pub use dataset::Dataset;
pub use tsv::read_dataset;
