pub mod loss_fn;
pub mod mse;
pub mod mae;
pub mod bce;

pub use loss_fn::Loss;
pub use mse::MseLoss;
pub use mae::MaeLoss;
pub use bce::BceLoss;
