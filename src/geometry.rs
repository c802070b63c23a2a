//! Distance and direction helpers.

use crate::components::Position;

/// Lower bound on reported distances. Keeps unit vectors finite when two
/// agents occupy the same cell.
pub const MIN_DISTANCE: f64 = 0.1;

/// Euclidean distance between two positions, clamped to [`MIN_DISTANCE`].
pub fn distance(a: Position, b: Position) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE)
}

/// Unit vector pointing from `from` to `to`, using the clamped distance.
pub fn unit_vector(from: Position, to: Position) -> (f64, f64) {
    let d = distance(from, to);
    ((to.x - from.x) as f64 / d, (to.y - from.y) as f64 / d)
}
