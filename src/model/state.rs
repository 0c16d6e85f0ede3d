// src/model/state.rs

use serde::Serialize;

/// Per-unit cost rates charged by the transition model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRates {
    /// Currency per unit left on hand at the end of a day.
    pub holding: f64,
    /// Currency per unit of unmet demand.
    pub stockout: f64,
}

impl CostRates {
    pub fn new(holding: f64, stockout: f64) -> Self {
        Self { holding, stockout }
    }
}

/// Immutable snapshot of the simulated inventory at the start of a day.
///
/// Only produced by [`InventoryState::transition`] (or [`InventoryState::initial`]);
/// nothing mutates a state in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryState {
    pub current_stock: f64,
    pub day: u32,
    pub cumulative_cost: f64,
}

/// Everything that happened during one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayOutcome {
    pub received: f64,
    pub fulfilled: f64,
    pub stockout: f64,
    pub ending_stock: f64,
    pub day_cost: f64,
}

impl InventoryState {
    /// Day-zero state with no accumulated cost.
    pub fn initial(current_stock: f64) -> Self {
        Self {
            current_stock: current_stock.max(0.0),
            day: 0,
            cumulative_cost: 0.0,
        }
    }

    /// True once the planning horizon has been reached.
    pub fn is_terminal(&self, horizon: u32) -> bool {
        self.day >= horizon
    }

    /// Simulates one day and returns the successor state.
    pub fn transition(&self, order_qty: f64, demand: f64, costs: &CostRates) -> InventoryState {
        self.step(order_qty, demand, costs).0
    }

    /// Simulates one day: the order arrives instantly, demand is served from
    /// what is on hand, unmet demand is lost (no backorders).
    ///
    /// Returns the successor state together with the day's breakdown.
    pub fn step(
        &self,
        order_qty: f64,
        demand: f64,
        costs: &CostRates,
    ) -> (InventoryState, DayOutcome) {
        let received = self.current_stock + order_qty.max(0.0);
        let demand = demand.max(0.0);

        let fulfilled = demand.min(received);
        let stockout = (demand - received).max(0.0);
        let ending_stock = (received - demand).max(0.0);

        let day_cost = costs.holding * ending_stock + costs.stockout * stockout;

        let next = InventoryState {
            current_stock: ending_stock,
            day: self.day + 1,
            cumulative_cost: self.cumulative_cost + day_cost,
        };

        let outcome = DayOutcome {
            received,
            fulfilled,
            stockout,
            ending_stock,
            day_cost,
        };

        (next, outcome)
    }
}
