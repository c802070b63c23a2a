//! Occupancy grid.
//!
//! The grid is a derived view of agent positions: bounds checks during the
//! tick, then a full rebuild once every agent has acted. Movement never
//! consults occupancy, so two agents may share a cell; a shared cell stores
//! whichever occupant was written last in registry iteration order.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use crate::components::{AgentId, Position};

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Option<AgentId>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True iff `pos` lies within `[0, width) x [0, height)`.
    pub fn is_legal(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Occupant of a cell, if any. Positions must be legal.
    pub fn occupant(&self, pos: Position) -> Option<AgentId> {
        self.cells[self.index(pos)]
    }

    /// Rebuild occupancy from the live registry. Called once per tick after
    /// all agents have acted, never mid-tick.
    pub fn rebuild(&mut self, world: &World, directory: &BTreeMap<AgentId, Entity>) {
        self.cells.fill(None);
        for (&id, &entity) in directory {
            if let Ok(pos) = world.get::<&Position>(entity) {
                let index = self.index(*pos);
                self.cells[index] = Some(id);
            }
        }
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}
