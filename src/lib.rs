//! Ecosystem Simulation Engine
//!
//! Predator/prey population simulation on a bounded 2D grid. Agents move,
//! flee, hunt, age, starve, and reproduce by local per-tick rules; the
//! emergent population dynamics are consumed by an external display layer
//! through the reporting accessors.

pub mod components;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod movement;
pub mod perception;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{ConfigError, PredatorConfig, PreyConfig, WorldConfig};
pub use grid::Grid;
pub use world::{PopulationCount, PositionExport, SimulationWorld, TickSummary};
