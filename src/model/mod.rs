pub mod action_space;
pub mod demand;
pub mod state;

pub use action_space::ActionSpace;
pub use demand::DemandProfile;
pub use state::{CostRates, DayOutcome, InventoryState};
