pub mod dataset;
pub mod demand;
pub mod reporting;

pub use dataset::{Column, Dataset};
