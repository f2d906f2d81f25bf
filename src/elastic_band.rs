//! # Elastic Band
//!
//! Relaxes a polyline with pinned endpoints. Each interior control point feels
//!
//! - a tension force `prev + next - 2 * curr` (discrete second difference,
//!   zero when the point sits on the midpoint of its neighbours), and
//! - the potential-field repulsion from a single obstacle, same law and guard
//!   as [`crate::potential_field::repulsion_term`],
//!
//! and moves by `alpha` times their sum.
//!
//! All interior points are updated from the same snapshot of the previous
//! path (Jacobi-style), never from partially updated neighbours.

use crate::potential_field::repulsion_term;
use crate::structs::{Point, Vector2D};

/// Discrete second difference at `curr`.
pub fn tension(prev: Point, curr: Point, next: Point) -> Vector2D {
    Vector2D::new(
        prev.x + next.x - 2.0 * curr.x,
        prev.y + next.y - 2.0 * curr.y,
    )
}

/// One relaxation pass. Returns a new path with the same length and the
/// same endpoints; paths with fewer than 3 points come back unchanged.
pub fn relax(path: &[Point], obstacle: Point, obstacle_radius: f64, alpha: f64) -> Vec<Point> {
    let mut new_path = path.to_vec();
    if path.len() < 3 {
        return new_path;
    }

    for (i, window) in path.windows(3).enumerate() {
        let (prev, curr, next) = (window[0], window[1], window[2]);
        let force = tension(prev, curr, next) + repulsion_term(curr, obstacle, obstacle_radius);
        new_path[i + 1] = curr + force * alpha;
    }

    new_path
}

/// Largest absolute per-axis tension over the interior points.
pub fn max_tension(path: &[Point]) -> f64 {
    path.windows(3)
        .map(|w| {
            let t = tension(w[0], w[1], w[2]);
            t.x.abs().max(t.y.abs())
        })
        .fold(0.0, f64::max)
}
