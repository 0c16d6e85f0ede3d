// src/report/interpretation.rs

//! Boundary to the explanatory-text collaborator.
//!
//! The numeric report is final before any text is requested. Text generation
//! is bounded by a timeout and replaced by a fixed template on failure, so it
//! can never hold back or fail an optimization.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::report::result::OptimizationReport;

/// Human-readable digest of a report, handed to interpreters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub recommended_action: String,
    pub cost_savings: String,
    pub bullwhip_reduction: String,
    pub safety_stock: String,
}

impl ResultSummary {
    pub fn from_report(report: &OptimizationReport) -> Self {
        let action = &report.optimal_action;
        Self {
            recommended_action: format!(
                "Order {:.0} units when stock drops to {:.0}",
                action.order_quantity, action.reorder_point
            ),
            cost_savings: format!("{:.2}", report.expected_savings.amount),
            bullwhip_reduction: format!(
                "{:.1}%",
                report.bullwhip_reduction.improvement_percentage
            ),
            safety_stock: format!("{:.0} units", action.safety_stock),
        }
    }

    /// The deterministic one-line fallback.
    pub fn fallback_text(&self) -> String {
        format!(
            "Recommended: {}. Expected savings: {}.",
            self.recommended_action, self.cost_savings
        )
    }
}

/// Produces free text explaining a report. The text is never read back.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, summary: &ResultSummary, query: &str) -> Result<String>;
}

/// Offline interpreter that fills a fixed explanation template.
#[derive(Debug, Clone, Default)]
pub struct TemplateInterpreter;

#[async_trait]
impl Interpreter for TemplateInterpreter {
    async fn interpret(&self, summary: &ResultSummary, query: &str) -> Result<String> {
        let mut text = String::new();
        if !query.trim().is_empty() {
            text.push_str(&format!("Question: {}\n\n", query.trim()));
        }
        text.push_str(&format!("1. Action: {}.\n", summary.recommended_action));
        text.push_str(&format!(
            "2. Expected savings versus never reordering: {}.\n",
            summary.cost_savings
        ));
        text.push_str(&format!(
            "3. Order variability reduction (Bullwhip): {}.\n",
            summary.bullwhip_reduction
        ));
        text.push_str(&format!(
            "4. Keep about {} as safety stock and review the plan as new sales data arrives.",
            summary.safety_stock
        ));
        Ok(text)
    }
}

/// Asks `interpreter` for an explanation, bounded by `timeout`.
///
/// Errors and timeouts are logged and answered with
/// [`ResultSummary::fallback_text`].
pub async fn interpret_or_fallback(
    interpreter: &dyn Interpreter,
    report: &OptimizationReport,
    query: &str,
    timeout: Duration,
) -> String {
    let summary = ResultSummary::from_report(report);

    match tokio::time::timeout(timeout, interpreter.interpret(&summary, query)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(error = %e, "interpretation failed, using template summary");
            summary.fallback_text()
        }
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "interpretation timed out, using template summary"
            );
            summary.fallback_text()
        }
    }
}
