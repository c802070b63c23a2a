//! ECS components for ecosystem agents.

use serde::{Deserialize, Serialize};

// ============================================================================
// Identity Components
// ============================================================================

/// Stable agent identifier. Assigned 1..N at world creation, then allocated
/// monotonically for newborns; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

// ============================================================================
// Spatial Components
// ============================================================================

/// Grid position. Signed so candidate moves may step out of bounds before
/// the legality check rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

// ============================================================================
// Species Components
// ============================================================================

/// Kind tag used for behavior dispatch and perception filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
}

/// Attributes shared by every agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Agent {
    /// Tick interval: the agent acts only when `tick % speed == 0`.
    pub speed: u64,
    /// Detection radius, inclusive.
    pub visibility: f64,
    /// Probability per eligible tick of entering "wants to mate".
    pub gestation_chance: f64,
    pub gestation_active: bool,
    /// Offspring spawned per successful mating.
    pub litter_size: u32,
    /// Counts down every tick; reaching 0 kills the agent.
    pub age: u32,
}

/// Predator-only extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hunter {
    pub hunting: bool,
    /// Counts down every tick, clamped to `max_hunger`; reaching 0 kills.
    pub hunger: u32,
    /// Hunger at or below this starts hunting.
    pub hunger_low: u32,
    /// Hunger at or above this stops hunting.
    pub hunger_high: u32,
    /// Hunger gained per kill.
    pub kill_reward: u32,
    pub max_hunger: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_offset() {
        let pos = Position::new(3, 4);
        assert_eq!(pos.offset(1, 0), Position::new(4, 4));
        assert_eq!(pos.offset(0, -1), Position::new(3, 3));
    }

    #[test]
    fn test_agent_ids_order() {
        assert!(AgentId(2) < AgentId(10));
    }
}
