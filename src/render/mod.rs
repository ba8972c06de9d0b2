//! Rendering for colony snapshots
//!
//! Sinks observe a [`WorldSnapshot`] after every tick.
//! This module is READ-ONLY - it never modifies simulation state.

pub mod text;

use crate::core::error::Result;
use crate::ecs::snapshot::WorldSnapshot;

pub use text::TextRenderer;

/// Receives the world after each tick
pub trait RenderSink: Send {
    fn render(&mut self, snapshot: &WorldSnapshot) -> Result<()>;
}

/// Discards every snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _snapshot: &WorldSnapshot) -> Result<()> {
        Ok(())
    }
}
