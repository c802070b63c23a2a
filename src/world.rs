//! Simulation world - main orchestrator.
//!
//! Owns the agent registry (hecs world plus the id directory), the occupancy
//! grid, the tick counter, and the seeded RNG every randomized call draws
//! from. Agents are processed strictly sequentially in ascending-id order;
//! an agent acting later in a tick observes the mutations made by earlier
//! agents, which is part of the engine's contract.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::components::{Agent, AgentId, Hunter, Position, Species};
use crate::config::{ConfigError, WorldConfig};
use crate::grid::Grid;
use crate::systems::{self, ActOutcome};

/// Counts produced by one tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TickSummary {
    pub births: u32,
    pub natural_deaths: u32,
    pub starvations: u32,
    pub kills: u32,
    pub population: u32,
}

/// Live population counts, plus the average prey speed (lower is faster),
/// tracked for natural-selection studies.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PopulationCount {
    pub prey: u32,
    pub predators: u32,
    pub avg_prey_speed: f64,
}

/// Per-species coordinate lists in registry order, for the display layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PositionExport {
    pub prey: Vec<(i32, i32)>,
    pub predators: Vec<(i32, i32)>,
}

pub struct SimulationWorld {
    pub world: World,
    /// Id -> entity directory; its ascending-id order is the registry
    /// iteration order everywhere.
    pub directory: BTreeMap<AgentId, Entity>,
    pub grid: Grid,
    pub config: WorldConfig,
    pub tick: u64,
    next_agent_id: u64,
    rng: StdRng,
}

impl SimulationWorld {
    /// Create a world and place the configured populations at uniformly
    /// random legal positions (collisions permitted).
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut sim = Self {
            world: World::new(),
            directory: BTreeMap::new(),
            grid: Grid::new(config.width, config.height),
            config,
            tick: 0,
            next_agent_id: 1,
            rng: StdRng::seed_from_u64(seed),
        };

        for _ in 0..sim.config.prey.count {
            let pos = sim.random_position();
            let speed = sim
                .rng
                .gen_range(sim.config.prey.speed_min..=sim.config.prey.speed_max);
            let _ = sim.spawn_prey(pos, speed);
        }
        for _ in 0..sim.config.predators.count {
            let pos = sim.random_position();
            let _ = sim.spawn_predator(pos);
        }
        sim.grid.rebuild(&sim.world, &sim.directory);

        info!(
            width = sim.config.width,
            height = sim.config.height,
            prey = sim.config.prey.count,
            predators = sim.config.predators.count,
            "world initialized"
        );
        Ok(sim)
    }

    /// Spawn one prey from the configured template. Used for initial
    /// placement; tests use it to build exact scenarios.
    pub fn spawn_prey(&mut self, pos: Position, speed: u64) -> AgentId {
        let template = &self.config.prey;
        let agent = Agent {
            speed,
            visibility: template.visibility,
            gestation_chance: template.gestation_chance,
            gestation_active: template.gestation_active,
            litter_size: template.litter_size,
            age: template.initial_age,
        };
        self.insert(Species::Prey, agent, None, pos)
    }

    /// Spawn one predator from the configured template.
    pub fn spawn_predator(&mut self, pos: Position) -> AgentId {
        let template = &self.config.predators;
        let agent = Agent {
            speed: template.speed,
            visibility: template.visibility,
            gestation_chance: template.gestation_chance,
            gestation_active: template.gestation_active,
            litter_size: template.litter_size,
            age: template.initial_age,
        };
        let hunter = Hunter {
            hunting: template.hunting,
            hunger: template.initial_hunger,
            hunger_low: template.hunger_low,
            hunger_high: template.hunger_high,
            kill_reward: template.kill_reward,
            max_hunger: template.max_hunger,
        };
        self.insert(Species::Predator, agent, Some(hunter), pos)
    }

    /// Run one simulation tick.
    ///
    /// Takes a snapshot of live ids, runs each still-present agent's state
    /// machine against the live registry, then rebuilds occupancy from the
    /// final positions.
    pub fn step(&mut self) -> TickSummary {
        let tick = self.tick;
        let ids: Vec<AgentId> = self.directory.keys().copied().collect();
        let mut summary = TickSummary::default();

        for id in ids {
            // Skip agents removed earlier in this tick, e.g. by predation.
            let Some(&entity) = self.directory.get(&id) else {
                continue;
            };
            let Ok(species) = self.world.get::<&Species>(entity).map(|s| *s) else {
                continue;
            };
            let outcome = match species {
                Species::Prey => systems::prey_act(
                    &mut self.world,
                    &mut self.directory,
                    &self.grid,
                    &mut self.rng,
                    tick,
                    self.config.prey.initial_age,
                    &mut self.next_agent_id,
                    id,
                ),
                Species::Predator => systems::predator_act(
                    &mut self.world,
                    &mut self.directory,
                    &self.grid,
                    &mut self.rng,
                    tick,
                    self.config.predators.initial_age,
                    &mut self.next_agent_id,
                    id,
                ),
            };
            match outcome {
                ActOutcome::Survived => {}
                ActOutcome::AgedOut => summary.natural_deaths += 1,
                ActOutcome::Starved => summary.starvations += 1,
                ActOutcome::Bred(litter) => summary.births += litter,
                ActOutcome::Killed => summary.kills += 1,
            }
        }

        self.grid.rebuild(&self.world, &self.directory);
        self.tick += 1;
        summary.population = self.directory.len() as u32;
        debug!(
            tick,
            births = summary.births,
            deaths = summary.natural_deaths + summary.starvations + summary.kills,
            population = summary.population,
            "tick complete"
        );
        summary
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent_count(&self) -> usize {
        self.directory.len()
    }

    /// Live counts per species and the average prey speed. The divisor is
    /// clamped to 0.1 so an empty prey population reports 0 instead of
    /// dividing by zero.
    pub fn count_populations(&self) -> PopulationCount {
        let mut prey = 0u32;
        let mut predators = 0u32;
        let mut speed_total = 0u64;
        for &entity in self.directory.values() {
            let Ok(species) = self.world.get::<&Species>(entity) else {
                continue;
            };
            match *species {
                Species::Prey => {
                    prey += 1;
                    if let Ok(agent) = self.world.get::<&Agent>(entity) {
                        speed_total += agent.speed;
                    }
                }
                Species::Predator => predators += 1,
            }
        }
        PopulationCount {
            prey,
            predators,
            avg_prey_speed: speed_total as f64 / (prey as f64).max(0.1),
        }
    }

    /// Coordinates of every live agent, split per species, in registry order.
    pub fn export_positions(&self) -> PositionExport {
        let mut export = PositionExport::default();
        for &entity in self.directory.values() {
            let (Ok(species), Ok(pos)) = (
                self.world.get::<&Species>(entity),
                self.world.get::<&Position>(entity),
            ) else {
                continue;
            };
            match *species {
                Species::Prey => export.prey.push((pos.x, pos.y)),
                Species::Predator => export.predators.push((pos.x, pos.y)),
            }
        }
        export
    }

    fn random_position(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0..self.config.width),
            self.rng.gen_range(0..self.config.height),
        )
    }

    fn insert(
        &mut self,
        species: Species,
        agent: Agent,
        hunter: Option<Hunter>,
        pos: Position,
    ) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        let entity = match hunter {
            Some(state) => self.world.spawn((pos, species, agent, state)),
            None => self.world.spawn((pos, species, agent)),
        };
        let _ = self.directory.insert(id, entity);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PredatorConfig, PreyConfig};

    fn small_config(prey: u32, predators: u32) -> WorldConfig {
        WorldConfig {
            width: 20,
            height: 20,
            prey: PreyConfig {
                count: prey,
                ..PreyConfig::default()
            },
            predators: PredatorConfig {
                count: predators,
                ..PredatorConfig::default()
            },
        }
    }

    fn empty_world() -> SimulationWorld {
        SimulationWorld::new(small_config(0, 0), 1).unwrap()
    }

    #[test]
    fn test_initial_population_and_ids() {
        let sim = SimulationWorld::new(small_config(10, 3), 42).unwrap();
        assert_eq!(sim.agent_count(), 13);
        // Prey get 1..=10, predators 11..=13.
        assert!(sim.directory.contains_key(&AgentId(1)));
        assert!(sim.directory.contains_key(&AgentId(13)));
        let counts = sim.count_populations();
        assert_eq!(counts.prey, 10);
        assert_eq!(counts.predators, 3);
    }

    #[test]
    fn test_initial_positions_in_bounds_and_speeds_in_range() {
        let sim = SimulationWorld::new(small_config(30, 5), 7).unwrap();
        for &entity in sim.directory.values() {
            let pos = *sim.world.get::<&Position>(entity).unwrap();
            assert!(sim.grid.is_legal(pos));
        }
        for (_, (agent, species)) in sim.world.query::<(&Agent, &Species)>().iter() {
            if *species == Species::Prey {
                assert!((2..=9).contains(&agent.speed));
            } else {
                assert_eq!(agent.speed, 4);
            }
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = small_config(1, 1);
        config.height = 0;
        assert!(SimulationWorld::new(config, 1).is_err());
    }

    #[test]
    fn test_positions_stay_in_bounds_across_steps() {
        let mut sim = SimulationWorld::new(small_config(40, 6), 99).unwrap();
        for _ in 0..200 {
            let _ = sim.step();
            for &entity in sim.directory.values() {
                let pos = *sim.world.get::<&Position>(entity).unwrap();
                assert!(sim.grid.is_legal(pos));
            }
        }
    }

    #[test]
    fn test_grid_matches_registry_after_step() {
        let mut sim = SimulationWorld::new(small_config(15, 2), 5).unwrap();
        let _ = sim.step();
        // Every live agent's cell holds an id whose occupant shares the cell.
        for (&id, &entity) in &sim.directory {
            let pos = *sim.world.get::<&Position>(entity).unwrap();
            let occupant = sim.grid.occupant(pos).expect("occupied cell");
            let occupant_pos = *sim
                .world
                .get::<&Position>(sim.directory[&occupant])
                .unwrap();
            assert_eq!(occupant_pos, pos, "cell occupant mismatch for {id:?}");
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut a = SimulationWorld::new(small_config(25, 4), 1234).unwrap();
        let mut b = SimulationWorld::new(small_config(25, 4), 1234).unwrap();
        for _ in 0..100 {
            let _ = a.step();
            let _ = b.step();
        }
        assert_eq!(a.agent_count(), b.agent_count());
        let export_a = a.export_positions();
        let export_b = b.export_positions();
        assert_eq!(export_a.prey, export_b.prey);
        assert_eq!(export_a.predators, export_b.predators);
    }

    #[test]
    fn test_count_populations_handles_empty_world() {
        let sim = empty_world();
        let counts = sim.count_populations();
        assert_eq!(counts.prey, 0);
        assert_eq!(counts.predators, 0);
        assert_eq!(counts.avg_prey_speed, 0.0);
    }

    #[test]
    fn test_average_prey_speed() {
        let mut sim = empty_world();
        let _ = sim.spawn_prey(Position::new(0, 0), 2);
        let _ = sim.spawn_prey(Position::new(1, 0), 4);
        let counts = sim.count_populations();
        assert_eq!(counts.avg_prey_speed, 3.0);
    }

    #[test]
    fn test_export_positions_split_by_species() {
        let mut sim = empty_world();
        let _ = sim.spawn_prey(Position::new(2, 3), 2);
        let _ = sim.spawn_predator(Position::new(7, 8));
        let export = sim.export_positions();
        assert_eq!(export.prey, vec![(2, 3)]);
        assert_eq!(export.predators, vec![(7, 8)]);
    }

    #[test]
    fn test_prey_killed_earlier_in_tick_does_not_act() {
        // A hunting predator adjacent to its quarry removes it; the
        // snapshot id of the removed prey must be skipped, not acted on.
        let mut sim = empty_world();
        sim.config.predators.hunting = true;
        sim.config.predators.speed = 1;
        sim.config.prey.speed_min = 1;
        sim.config.prey.speed_max = 1;

        let predator = sim.spawn_predator(Position::new(5, 5));
        let quarry = sim.spawn_prey(Position::new(5, 6), 1);
        assert!(predator < quarry, "predator must act first");

        let summary = sim.step();
        assert_eq!(summary.kills, 1);
        assert!(!sim.directory.contains_key(&quarry));
        assert_eq!(sim.agent_count(), 1);
    }

    #[test]
    fn test_mating_pair_reproduces_on_contact_during_step() {
        let mut sim = empty_world();
        sim.config.prey.gestation_active = true;
        sim.config.prey.gestation_chance = 0.0;
        sim.config.prey.litter_size = 3;

        let first = sim.spawn_prey(Position::new(3, 3), 1);
        let _second = sim.spawn_prey(Position::new(3, 4), 1);

        let summary = sim.step();
        // The first mover reaches its partner and breeds; litter ids follow
        // the current maximum.
        assert!(summary.births >= 3);
        assert!(sim.directory.contains_key(&AgentId(3)));
        assert!(sim.directory.contains_key(&AgentId(4)));
        assert!(sim.directory.contains_key(&AgentId(5)));
        let first_agent = *sim
            .world
            .get::<&Agent>(sim.directory[&first])
            .unwrap();
        assert!(!first_agent.gestation_active);
    }

    #[test]
    fn test_newborns_do_not_act_on_their_birth_tick() {
        let mut sim = empty_world();
        sim.config.prey.gestation_active = true;
        sim.config.prey.gestation_chance = 0.0;
        sim.config.prey.initial_age = 5000;

        let _ = sim.spawn_prey(Position::new(3, 3), 1);
        let _ = sim.spawn_prey(Position::new(3, 4), 1);
        let _ = sim.step();

        // Newborns keep their full age: they were not in the tick snapshot.
        for id in [AgentId(3), AgentId(4), AgentId(5)] {
            let agent = *sim.world.get::<&Agent>(sim.directory[&id]).unwrap();
            assert_eq!(agent.age, 5000);
        }
    }

    #[test]
    fn test_tick_summary_population_matches_registry() {
        let mut sim = SimulationWorld::new(small_config(12, 2), 3).unwrap();
        let summary = sim.step();
        assert_eq!(summary.population as usize, sim.agent_count());
    }
}
