//! Predator behavior.
//!
//! Aging and hunger upkeep run every tick; starvation and old age both
//! remove the agent before any gated behavior. On active ticks the predator
//! either manages mating while idle or chases the nearest prey while
//! hunting, killing on contact.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{Agent, AgentId, Hunter, Position, Species};
use crate::grid::Grid;
use crate::movement::{step_toward, Heading};
use crate::perception::find_nearest;
use crate::systems::{spawn_litter, ActOutcome};

#[allow(clippy::too_many_arguments)]
pub fn predator_act(
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

    // Upkeep runs every tick: age down, hunger down (clamped from above).
    // Death stops the tick before any gated behavior.
    let aged_out = {
        let Ok(mut agent) = world.get::<&mut Agent>(entity) else {
            return ActOutcome::Survived;
        };
        agent.age = agent.age.saturating_sub(1);
        agent.age == 0
    };
    let starved = {
        let Ok(mut hunter) = world.get::<&mut Hunter>(entity) else {
            return ActOutcome::Survived;
        };
        hunter.hunger = hunter.hunger.saturating_sub(1).min(hunter.max_hunger);
        hunter.hunger == 0
    };
    if aged_out || starved {
        let _ = world.despawn(entity);
        let _ = directory.remove(&id);
        return if aged_out {
            ActOutcome::AgedOut
        } else {
            ActOutcome::Starved
        };
    }

    let Ok(agent) = world.get::<&Agent>(entity).map(|a| *a) else {
        return ActOutcome::Survived;
    };
    if tick % agent.speed != 0 {
        return ActOutcome::Survived;
    }
    let Ok(hunter) = world.get::<&Hunter>(entity).map(|h| *h) else {
        return ActOutcome::Survived;
    };
    let Ok(pos) = world.get::<&Position>(entity).map(|p| *p) else {
        return ActOutcome::Survived;
    };

    if !hunter.hunting {
        // The switch to hunting only affects future ticks; this tick still
        // runs under not-hunting rules.
        if hunter.hunger <= hunter.hunger_low {
            if let Ok(mut state) = world.get::<&mut Hunter>(entity) {
                state.hunting = true;
            }
        }
        if agent.gestation_active {
            if let Some(partner) = find_nearest(
                world,
                directory,
                id,
                pos,
                agent.visibility,
                Species::Predator,
            ) {
                let next = step_toward(pos, partner.position, grid, Heading::Toward, rng);
                set_position(world, entity, next);
                if next == partner.position {
                    if let Ok(mut agent) = world.get::<&mut Agent>(entity) {
                        agent.gestation_active = false;
                    }
                    let parent = Agent {
                        gestation_active: false,
                        ..agent
                    };
                    let Ok(state) = world.get::<&Hunter>(entity).map(|h| *h) else {
                        return ActOutcome::Survived;
                    };
                    let litter = spawn_litter(
                        world,
                        directory,
                        next_agent_id,
                        Species::Predator,
                        parent,
                        Some(state),
                        next,
                        newborn_age,
                    );
                    return ActOutcome::Bred(litter);
                }
            }
            // No partner in sight: stay put this tick.
        } else if rng.gen::<f64>() < agent.gestation_chance {
            if let Ok(mut agent) = world.get::<&mut Agent>(entity) {
                agent.gestation_active = true;
            }
        }
        ActOutcome::Survived
    } else {
        // Stopping the hunt only affects future ticks.
        if hunter.hunger >= hunter.hunger_high {
            if let Ok(mut state) = world.get::<&mut Hunter>(entity) {
                state.hunting = false;
            }
        }
        if let Some(quarry) = find_nearest(world, directory, id, pos, agent.visibility, Species::Prey)
        {
            let next = step_toward(pos, quarry.position, grid, Heading::Toward, rng);
            set_position(world, entity, next);
            if next == quarry.position {
                let _ = world.despawn(quarry.entity);
                let _ = directory.remove(&quarry.id);
                if let Ok(mut state) = world.get::<&mut Hunter>(entity) {
                    state.hunger = (state.hunger + state.kill_reward).min(state.max_hunger);
                }
                return ActOutcome::Killed;
            }
        }
        ActOutcome::Survived
    }
}

fn set_position(world: &mut World, entity: Entity, next: Position) {
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = next;
    }
}
