//! Movement planning.
//!
//! Movement resolves a directional intent into a single axis-aligned grid
//! step. Occupancy is never checked; ending a tick on another agent's cell
//! is the "contact" signal for mating and predation.

use rand::Rng;

use crate::components::Position;
use crate::geometry::unit_vector;
use crate::grid::Grid;

/// Whether a directed move approaches or flees the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Toward,
    Away,
}

impl Heading {
    fn sign(self) -> i32 {
        match self {
            Heading::Toward => 1,
            Heading::Away => -1,
        }
    }
}

/// One uniform step to a legal axis-aligned neighbor.
///
/// Enumerates the legal subset of the four candidates and chooses uniformly
/// among those, so the draw is bounded even when the agent is cornered. With
/// no legal neighbor at all the agent stands still.
pub fn random_step(pos: Position, grid: &Grid, rng: &mut impl Rng) -> Position {
    let candidates = [
        pos.offset(1, 0),
        pos.offset(-1, 0),
        pos.offset(0, 1),
        pos.offset(0, -1),
    ];
    let legal: Vec<Position> = candidates
        .into_iter()
        .filter(|candidate| grid.is_legal(*candidate))
        .collect();
    if legal.is_empty() {
        pos
    } else {
        legal[rng.gen_range(0..legal.len())]
    }
}

/// One step along the dominant axis of the direction to `target`, toward or
/// away per `heading`. Axis ties go to x. An illegal step falls back to a
/// random legal step instead of leaving the agent in place.
pub fn step_toward(
    pos: Position,
    target: Position,
    grid: &Grid,
    heading: Heading,
    rng: &mut impl Rng,
) -> Position {
    let (ux, uy) = unit_vector(pos, target);
    let candidate = if ux.abs() >= uy.abs() {
        let step = if ux > 0.0 { 1 } else { -1 };
        pos.offset(step * heading.sign(), 0)
    } else {
        let step = if uy > 0.0 { 1 } else { -1 };
        pos.offset(0, step * heading.sign())
    };
    if grid.is_legal(candidate) {
        candidate
    } else {
        random_step(pos, grid, rng)
    }
}
