//! # Simulation Configuration
//!
//! Options for both pipelines. Defaults reproduce the reference scenarios;
//! every field may be overridden from JSON, missing fields keep their default.
//!
//! ```ignore
//! let config = NavigatorConfig::from_json_str(r#"{"seed": 7, "num_obstacles": 3}"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_non_negative, require_positive, ConfigError};
use crate::oscillator::SinusoidalObstacle;
use crate::structs::{Bounds, Obstacle, Point};

/// Potential-field navigation through a bouncing obstacle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Obstacles closer than this repel the agent.
    pub influence_radius: f64,
    /// Distance the agent moves per tick.
    pub step_size: f64,
    /// The run succeeds once the agent is closer than this to the goal.
    pub goal_threshold: f64,
    /// Tick budget.
    pub total_frames: usize,
    /// Number of randomly spawned obstacles (ignored when `obstacles` is set).
    pub num_obstacles: usize,
    pub start: Point,
    pub goal: Point,
    /// Rectangle the obstacles bounce inside.
    pub bounds: Bounds,
    /// Rectangle random obstacles are spawned in.
    pub spawn_region: Bounds,
    /// Random velocities are uniform in `[-max_initial_speed, max_initial_speed)` per axis.
    pub max_initial_speed: f64,
    pub seed: u64,
    /// Field-wide factor applied on top of each obstacle's own speed.
    pub speed_multiplier: f64,
    /// Explicit obstacles, replacing random spawning.
    pub obstacles: Option<Vec<Obstacle>>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            influence_radius: 0.6,
            step_size: 0.5,
            goal_threshold: 0.5,
            total_frames: 200,
            num_obstacles: 5,
            start: Point::new(0.0, 0.0),
            goal: Point::new(8.0, 6.0),
            bounds: Bounds::new(0.0, 10.0, 0.0, 7.0),
            spawn_region: Bounds::new(1.0, 7.0, 1.0, 5.0),
            max_initial_speed: 0.1,
            seed: 42,
            speed_multiplier: 1.0,
            obstacles: None,
        }
    }
}

impl NavigatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: NavigatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("influence_radius", self.influence_radius)?;
        require_positive("step_size", self.step_size)?;
        require_positive("goal_threshold", self.goal_threshold)?;
        require_finite("start", &[self.start.x, self.start.y])?;
        require_finite("goal", &[self.goal.x, self.goal.y])?;
        require_non_negative("max_initial_speed", self.max_initial_speed)?;
        // Velocities are drawn from [-max, max); its width must stay finite
        require_finite("max_initial_speed", &[2.0 * self.max_initial_speed])?;
        require_non_negative("speed_multiplier", self.speed_multiplier)?;

        if !self.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds { field: "bounds" });
        }

        match &self.obstacles {
            Some(obstacles) => {
                for obstacle in obstacles {
                    require_finite(
                        "obstacles",
                        &[
                            obstacle.position.x,
                            obstacle.position.y,
                            obstacle.velocity.x,
                            obstacle.velocity.y,
                        ],
                    )?;
                    require_non_negative("obstacles.speed", obstacle.speed)?;
                    if let Some(radius) = obstacle.radius {
                        require_positive("obstacles.radius", radius)?;
                    }
                }
            }
            None => {
                if self.num_obstacles > 0 && !self.spawn_region.is_valid() {
                    return Err(ConfigError::InvalidBounds { field: "spawn_region" });
                }
            }
        }

        Ok(())
    }

    /// Number of obstacles the run will carry.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles
            .as_ref()
            .map_or(self.num_obstacles, |obstacles| obstacles.len())
    }
}

/// Elastic-band relaxation against one oscillating obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticBandConfig {
    /// Control points; first and last stay fixed.
    pub initial_path: Vec<Point>,
    /// Points closer than this to the obstacle are pushed away.
    pub obstacle_radius: f64,
    /// Gradient step applied to tension plus repulsion.
    pub alpha: f64,
    /// Number of relaxation ticks.
    pub total_frames: usize,
    pub obstacle: SinusoidalObstacle,
}

impl Default for ElasticBandConfig {
    fn default() -> Self {
        ElasticBandConfig {
            initial_path: vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(6.0, 2.0),
                Point::new(8.0, 4.0),
            ],
            obstacle_radius: 1.0,
            alpha: 0.1,
            total_frames: 60,
            obstacle: SinusoidalObstacle::default(),
        }
    }
}

impl ElasticBandConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ElasticBandConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_path.len() < 2 {
            return Err(ConfigError::PathTooShort {
                len: self.initial_path.len(),
            });
        }
        for point in &self.initial_path {
            require_finite("initial_path", &[point.x, point.y])?;
        }
        require_positive("obstacle_radius", self.obstacle_radius)?;
        require_positive("alpha", self.alpha)?;
        require_positive("obstacle.period", self.obstacle.period)?;
        require_finite(
            "obstacle",
            &[self.obstacle.cx, self.obstacle.cy, self.obstacle.amplitude],
        )?;
        Ok(())
    }
}
