//! Per-species behavior systems, run once per agent per tick.

pub mod predator;
pub mod prey;

use std::collections::BTreeMap;

use hecs::{Entity, World};

use crate::components::{Agent, AgentId, Hunter, Position, Species};

pub use predator::predator_act;
pub use prey::prey_act;

/// What a single agent's tick amounted to, tallied by the step orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActOutcome {
    Survived,
    AgedOut,
    Starved,
    /// Mating contact; carries the litter size.
    Bred(u32),
    /// Predation contact; the prey was removed.
    Killed,
}

/// Insert one litter of newborns: copies of the parent at its current
/// position, ages reset, identifiers allocated from the monotonic counter.
pub(crate) fn spawn_litter(
    world: &mut World,
    directory: &mut BTreeMap<AgentId, Entity>,
    next_agent_id: &mut u64,
    species: Species,
    parent: Agent,
    hunter: Option<Hunter>,
    position: Position,
    newborn_age: u32,
) -> u32 {
    for _ in 0..parent.litter_size {
        let newborn = Agent {
            age: newborn_age,
            ..parent
        };
        let id = AgentId(*next_agent_id);
        *next_agent_id += 1;
        let entity = match hunter {
            Some(state) => world.spawn((position, species, newborn, state)),
            None => world.spawn((position, species, newborn)),
        };
        let _ = directory.insert(id, entity);
    }
    parent.litter_size
}
