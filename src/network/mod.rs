pub mod network;
pub mod trace;
pub mod persist;

pub use network::Network;
pub use trace::ActivationTrace;
pub use persist::{read_weights, write_weights};
