pub mod bullwhip;
pub mod interpretation;
pub mod result;

pub use bullwhip::{bullwhip_reduction, BullwhipReduction};
pub use interpretation::{interpret_or_fallback, Interpreter, ResultSummary, TemplateInterpreter};
pub use result::{
    ExpectedSavings, ExplainedReport, OptimalAction, OptimizationReport, SimulationStats,
};
