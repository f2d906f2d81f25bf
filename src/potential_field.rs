//! # Potential-Field Navigator
//!
//! Single-step reactive navigation: a unit attraction toward the goal plus a
//! repulsion from every obstacle closer than the influence radius. The sum is
//! normalized and the agent advances by a fixed step.
//!
//! ## Repulsion law
//!
//! For an obstacle at distance `d < influence_radius`:
//!
//! ```text
//! direction = position - obstacle
//! force     = direction / (d + EPSILON) * (1 / d)
//! ```
//!
//! i.e. a unit vector away from the obstacle scaled by `1/d`. This is not the
//! textbook gradient `(1/d - 1/r) / d²`; it is kept as is so trajectories match
//! the reference behaviour. There is no smooth fall-off at the radius: the
//! force jumps from `1/r` to zero.
//!
//! ## Pros and Cons
//!
//! **Pros:**
//! - Constant-time per obstacle, no search or optimization
//! - Deterministic for a given input
//!
//! **Cons:**
//! - Local minima: attraction and repulsion can cancel and the agent
//!   oscillates in place. The driver's tick budget bounds this.
//! - No notion of the agent's own velocity or of obstacle motion

use crate::structs::{Obstacle, Point, Vector2D};

/// Additive guard used by every normalization and repulsion term.
pub const EPSILON: f64 = 1e-6;

/// Repulsive contribution of one obstacle at `obstacle` on a point at
/// `position`. Zero outside `radius` and when the two coincide exactly (no
/// direction to push along).
pub fn repulsion_term(position: Point, obstacle: Point, radius: f64) -> Vector2D {
    let direction = position - obstacle;
    let distance = direction.magnitude();
    if distance < radius && distance > 0.0 {
        direction / (distance + EPSILON) * (1.0 / distance)
    } else {
        Vector2D::zero()
    }
}

/// Sum of repulsion terms over all obstacles, in order.
pub fn compute_repulsion(position: Point, obstacles: &[Point], influence_radius: f64) -> Vector2D {
    let mut force = Vector2D::zero();
    for &obstacle in obstacles {
        force += repulsion_term(position, obstacle, influence_radius);
    }
    force
}

/// Sum of repulsion terms where each obstacle may carry its own radius.
/// Obstacles without one use `default_radius`.
pub fn compute_repulsion_from(
    position: Point,
    obstacles: &[Obstacle],
    default_radius: f64,
) -> Vector2D {
    let mut force = Vector2D::zero();
    for obstacle in obstacles {
        force += repulsion_term(
            position,
            obstacle.position,
            obstacle.influence_radius(default_radius),
        );
    }
    force
}

/// Guarded unit vector toward the goal.
pub fn attraction(position: Point, goal: Point) -> Vector2D {
    (goal - position).guarded_normalize(EPSILON)
}

/// Advances `position` one step toward `goal`, deflected by obstacles.
///
/// Total over finite inputs: at `position == goal` the attraction is zero and
/// the agent only moves if something repels it.
pub fn step(
    position: Point,
    goal: Point,
    obstacles: &[Point],
    influence_radius: f64,
    step_size: f64,
) -> Point {
    let repulsion = compute_repulsion(position, obstacles, influence_radius);
    advance_toward(position, goal, repulsion, step_size)
}

/// [`step`] against full obstacles, honouring per-obstacle radii.
pub fn step_among(
    position: Point,
    goal: Point,
    obstacles: &[Obstacle],
    default_radius: f64,
    step_size: f64,
) -> Point {
    let repulsion = compute_repulsion_from(position, obstacles, default_radius);
    advance_toward(position, goal, repulsion, step_size)
}

fn advance_toward(position: Point, goal: Point, repulsion: Vector2D, step_size: f64) -> Point {
    let to_goal = attraction(position, goal);
    let total_force = (to_goal + repulsion).guarded_normalize(EPSILON);

    position + total_force * step_size
}
