//! Measurements over recorded histories, for tests and for callers comparing
//! runs.

use crate::structs::{Point, Vector2D};

/// Sum of segment lengths.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Closest approach between the agent and any obstacle at the same tick.
///
/// `trajectory[k + 1]` is paired with `obstacle_history[k]` (both are the
/// state after tick `k`). `None` when there is nothing to compare.
pub fn min_clearance(trajectory: &[Point], obstacle_history: &[Vec<Point>]) -> Option<f64> {
    trajectory
        .iter()
        .skip(1)
        .zip(obstacle_history)
        .flat_map(|(agent, obstacles)| obstacles.iter().map(move |o| agent.distance(o)))
        .reduce(f64::min)
}

/// Largest perpendicular distance from the `start`-`goal` line. Falls back to
/// distance from `start` when the two coincide.
pub fn max_lateral_deviation(trajectory: &[Point], start: Point, goal: Point) -> f64 {
    let axis = goal - start;
    let length = axis.magnitude();

    trajectory
        .iter()
        .map(|p| {
            let offset: Vector2D = *p - start;
            if length > 0.0 {
                (axis.x * offset.y - axis.y * offset.x).abs() / length
            } else {
                offset.magnitude()
            }
        })
        .fold(0.0, f64::max)
}
