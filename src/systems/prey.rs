//! Prey behavior.
//!
//! Per active tick, in order: flee the nearest visible predator, otherwise
//! roll for wanting to mate and wander, otherwise chase a mate and reproduce
//! on contact. Aging runs every tick regardless of speed gating.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{Agent, AgentId, Position, Species};
use crate::grid::Grid;
use crate::movement::{random_step, step_toward, Heading};
use crate::perception::find_nearest;
use crate::systems::{spawn_litter, ActOutcome};

#[allow(clippy::too_many_arguments)]
pub fn prey_act(
    world: &mut World,
    directory: &mut BTreeMap<AgentId, Entity>,
    grid: &Grid,
    rng: &mut impl Rng,
    tick: u64,
    newborn_age: u32,
    next_agent_id: &mut u64,
    id: AgentId,
) -> ActOutcome {
    let Some(&entity) = directory.get(&id) else {
        return ActOutcome::Survived;
    };

    // Aging runs every tick, gated behavior only on active ticks.
    {
        let Ok(mut agent) = world.get::<&mut Agent>(entity) else {
            return ActOutcome::Survived;
        };
        agent.age = agent.age.saturating_sub(1);
        if agent.age == 0 {
            drop(agent);
            let _ = world.despawn(entity);
            let _ = directory.remove(&id);
            return ActOutcome::AgedOut;
        }
    }

    let Ok(agent) = world.get::<&Agent>(entity).map(|a| *a) else {
        return ActOutcome::Survived;
    };
    if tick % agent.speed != 0 {
        return ActOutcome::Survived;
    }
    let Ok(pos) = world.get::<&Position>(entity).map(|p| *p) else {
        return ActOutcome::Survived;
    };

    // Fleeing takes precedence over everything else.
    if let Some(threat) = find_nearest(
        world,
        directory,
        id,
        pos,
        agent.visibility,
        Species::Predator,
    ) {
        let next = step_toward(pos, threat.position, grid, Heading::Away, rng);
        set_position(world, entity, next);
        return ActOutcome::Survived;
    }

    if !agent.gestation_active {
        let wants_mate = rng.gen::<f64>() < agent.gestation_chance;
        if wants_mate {
            if let Ok(mut agent) = world.get::<&mut Agent>(entity) {
                agent.gestation_active = true;
            }
        }
        let next = random_step(pos, grid, rng);
        set_position(world, entity, next);
        return ActOutcome::Survived;
    }

    // Wants to mate: chase the nearest partner, reproduce on contact.
    match find_nearest(world, directory, id, pos, agent.visibility, Species::Prey) {
        None => {
            let next = random_step(pos, grid, rng);
            set_position(world, entity, next);
            ActOutcome::Survived
        }
        Some(partner) => {
            let next = step_toward(pos, partner.position, grid, Heading::Toward, rng);
            set_position(world, entity, next);
            if next != partner.position {
                return ActOutcome::Survived;
            }
            if let Ok(mut agent) = world.get::<&mut Agent>(entity) {
                agent.gestation_active = false;
            }
            let parent = Agent {
                gestation_active: false,
                ..agent
            };
            let litter = spawn_litter(
                world,
                directory,
                next_agent_id,
                Species::Prey,
                parent,
                None,
                next,
                newborn_age,
            );
            ActOutcome::Bred(litter)
        }
    }
}

fn set_position(world: &mut World, entity: Entity, next: Position) {
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = next;
    }
}
