// src/strategy/traits.rs

use std::fmt::Debug;

use rand::RngCore;

use crate::model::{ActionSpace, InventoryState};

/// Decides how much to order on a simulated day.
///
/// Policies drive the fast simulations around the search (random rollouts,
/// the never-reorder baseline); the search itself chooses by UCB1.
pub trait OrderPolicy: Debug {
    /// Calculates today's order quantity.
    ///
    /// # Arguments
    /// * `state` - Inventory at the start of the day.
    /// * `actions` - The run's candidate order quantities.
    /// * `rng` - The run's random source; policies must not use any other.
    fn order_quantity(
        &mut self,
        state: &InventoryState,
        actions: &ActionSpace,
        rng: &mut dyn RngCore,
    ) -> f64;
}
