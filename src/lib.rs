//! Castaway - island survival colony simulation
//!
//! Survivors gather, craft, build and fight on a grid island while a
//! pluggable decision oracle picks their next action, one request at a time.

pub mod core;
pub mod crafting;
pub mod decision;
pub mod ecs;
pub mod entity;
pub mod llm;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod ui;
pub mod world;
