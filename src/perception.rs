//! Nearest-neighbor perception.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use crate::components::{AgentId, Position, Species};
use crate::geometry::distance;

/// A perceived agent.
#[derive(Debug, Clone, Copy)]
pub struct Sighting {
    pub id: AgentId,
    pub entity: Entity,
    pub position: Position,
    pub distance: f64,
}

/// Find the nearest agent of the requested kind within `visibility` of
/// `origin`, excluding the seeker itself.
///
/// Linear scan in ascending-id order; the comparison is strict less-than, so
/// the first agent encountered at the minimum distance wins ties. O(N) per
/// call, which is the dominant per-tick cost at large populations.
pub fn find_nearest(
    world: &World,
    directory: &BTreeMap<AgentId, Entity>,
    seeker: AgentId,
    origin: Position,
    visibility: f64,
    kind: Species,
) -> Option<Sighting> {
    let mut nearest: Option<Sighting> = None;
    for (&id, &entity) in directory {
        if id == seeker {
            continue;
        }
        let Ok(species) = world.get::<&Species>(entity) else {
            continue;
        };
        if *species != kind {
            continue;
        }
        let Ok(position) = world.get::<&Position>(entity) else {
            continue;
        };
        let d = distance(origin, *position);
        if d > visibility {
            continue;
        }
        if nearest.map_or(true, |best| d < best.distance) {
            nearest = Some(Sighting {
                id,
                entity,
                position: *position,
                distance: d,
            });
        }
    }
    nearest
}
