//! ECS systems that operate on the arena each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! work). They own no state; everything lives in components or is passed in
//! by the engine.

pub mod ballistics;
pub mod cleanup;
pub mod decision;
pub mod physics;
pub mod pickups;
pub mod population;
pub mod sensors;
pub mod snapshot;
