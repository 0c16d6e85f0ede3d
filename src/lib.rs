//! Stochastic reorder planning for a single inventory item.
//!
//! Given a demand history and today's stock, Monte Carlo Tree Search over a
//! discretized set of order quantities finds the next-period order that keeps
//! expected holding plus stockout cost low over a fixed horizon. Future demand
//! is bootstrapped from the history; no distribution is fitted.
//!
//! The flow is: [`io::Dataset`] → [`model::DemandProfile`] →
//! [`optimizer::InventoryOptimizer`] (search + never-reorder baseline) →
//! [`report::OptimizationReport`].

pub mod error;
pub mod io;
pub mod model;
pub mod optimizer;
pub mod report;
pub mod search;
pub mod simulation;
pub mod strategy;
pub mod telemetry;

pub use error::{Error, Result};
pub use optimizer::{InventoryOptimizer, OptimizationRun};
pub use simulation::OptimizerParams;
