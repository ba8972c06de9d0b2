//! Per-tick simulation passes and the engine that drives them

pub mod actions;
pub mod colony;
pub mod combat;
pub mod environment;
pub mod tick;
pub mod vitals;

pub use actions::execute_survivor_actions;
pub use colony::{Colony, TickReport};
pub use combat::{resolve_survivor_attacks, run_mob_actions};
pub use environment::{regrow_trees, spawn_mobs};
pub use tick::{run_simulation_tick, SimulationEvent, TickPass, PIPELINE};
pub use vitals::update_vitals;
