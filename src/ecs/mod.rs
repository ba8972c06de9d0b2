//! The world aggregate and its read-only snapshot

pub mod snapshot;
pub mod world;

pub use snapshot::WorldSnapshot;
pub use world::World;
