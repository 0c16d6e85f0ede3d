pub mod implementations;
pub mod optimization;
pub mod traits;

pub use implementations::{NeverReorder, UniformRandomPolicy};
pub use traits::OrderPolicy;
