pub mod config;
pub mod engine;
pub mod sampler;

pub use config::OptimizerParams;
pub use engine::{evaluate_baseline, DayRecord, PolicySimulation};
pub use sampler::DemandSampler;
