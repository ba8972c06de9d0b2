//! Decision making - oracles and the single-flight dispatcher

pub mod apply;
pub mod dispatcher;
pub mod heuristic;
pub mod oracle;

pub use apply::apply_decision;
pub use dispatcher::{select_candidate, Dispatcher, Selection};
pub use heuristic::HeuristicOracle;
pub use oracle::{DecisionOracle, DecisionRequest, DecisionResponse, ScriptedOracle};
