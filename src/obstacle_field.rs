//! # Obstacle Field
//!
//! Bouncing linear motion for a set of obstacles inside a rectangle.
//!
//! Each tick an obstacle moves by its velocity (scaled by its own speed
//! multiplier and the field-wide one). If a coordinate ends up outside the
//! bounds, the matching velocity component is negated so the obstacle heads
//! back on the *next* tick. The overshooting position is kept as is: an
//! obstacle may sit slightly outside the rectangle for one tick.
//!
//! Updates read from the input slice and write into a fresh buffer, so the
//! result does not depend on iteration order.

use crate::structs::{Bounds, Obstacle, Point, Vector2D};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Advances every obstacle by one tick with unit field-wide speed.
pub fn advance(obstacles: &[Obstacle], bounds: &Bounds) -> Vec<Obstacle> {
    advance_scaled(obstacles, bounds, 1.0)
}

/// Advances every obstacle by one tick, scaling displacement by
/// `speed_multiplier * obstacle.speed`.
pub fn advance_scaled(
    obstacles: &[Obstacle],
    bounds: &Bounds,
    speed_multiplier: f64,
) -> Vec<Obstacle> {
    obstacles
        .iter()
        .enumerate()
        .map(|(i, obstacle)| {
            let next = advance_obstacle(obstacle, bounds, speed_multiplier);
            if next.velocity != obstacle.velocity {
                log::debug!("obstacle {} bounced at {}", i, next.position);
            }
            next
        })
        .collect()
}

/// Moves a single obstacle and reflects its velocity per axis when it leaves
/// the bounds.
pub fn advance_obstacle(
    obstacle: &Obstacle,
    bounds: &Bounds,
    speed_multiplier: f64,
) -> Obstacle {
    let scale = speed_multiplier * obstacle.speed;
    let position = obstacle.position + obstacle.velocity * scale;

    let mut velocity = obstacle.velocity;
    if !bounds.contains_x(position.x) {
        velocity.x = -velocity.x;
    }
    if !bounds.contains_y(position.y) {
        velocity.y = -velocity.y;
    }

    Obstacle {
        position,
        velocity,
        ..*obstacle
    }
}

/// Snapshot of obstacle centres, aligned with the input order.
pub fn positions(obstacles: &[Obstacle]) -> Vec<Point> {
    obstacles.iter().map(|o| o.position).collect()
}

/// Places `count` obstacles uniformly inside `region` with per-axis
/// velocities uniform in `[-max_speed, max_speed)`.
///
/// All positions are drawn first, then all velocities, so the positions for a
/// given seed do not change when `max_speed` does.
pub fn spawn_obstacles<R: Rng>(
    count: usize,
    region: &Bounds,
    max_speed: f64,
    rng: &mut R,
) -> Vec<Obstacle> {
    let positions: Vec<Point> = (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(region.x_min..region.x_max),
                rng.gen_range(region.y_min..region.y_max),
            )
        })
        .collect();

    positions
        .into_iter()
        .map(|position| {
            let velocity = if max_speed > 0.0 {
                Vector2D::new(
                    rng.gen_range(-max_speed..max_speed),
                    rng.gen_range(-max_speed..max_speed),
                )
            } else {
                Vector2D::zero()
            };
            Obstacle::new(position, velocity)
        })
        .collect()
}

/// Reproducible field for a given seed.
pub fn spawn_seeded(count: usize, region: &Bounds, max_speed: f64, seed: u64) -> Vec<Obstacle> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    spawn_obstacles(count, region, max_speed, &mut rng)
}
