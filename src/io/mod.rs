//! Dataset loading for offline replay.

pub mod replay;

pub use replay::{ReplayDataset, load_extrinsic};
