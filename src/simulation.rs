//! # Simulation Drivers
//!
//! Owned state machines that tick one pipeline at a time and record
//! per-tick snapshots for a renderer to pull afterwards.
//!
//! - [`NavigationSim`]: obstacle field + potential-field navigator
//! - [`ElasticBandSim`]: oscillating obstacle + elastic-band relaxer
//!
//! Each driver owns all of its mutable state; two drivers never share
//! anything, so independent runs can live side by side (or on different
//! threads). Histories are append-only and hold copies.

use crate::config::{ElasticBandConfig, NavigatorConfig};
use crate::elastic_band::relax;
use crate::error::{require_finite, ConfigError};
use crate::obstacle_field::{advance_scaled, positions, spawn_seeded};
use crate::potential_field::step_among;
use crate::structs::{Obstacle, Point};

/// Where a navigation run stands after the latest tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunStatus {
    Running,
    /// The agent came within `goal_threshold` of the goal.
    GoalReached { ticks: usize },
    /// The tick budget ran out first. Not an error: the agent may be stuck
    /// in a local minimum or simply too slow.
    BudgetExhausted { ticks: usize, remaining_distance: f64 },
}

impl RunStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }

    pub fn reached_goal(&self) -> bool {
        matches!(self, RunStatus::GoalReached { .. })
    }
}

/// Potential-field navigation through a field of bouncing obstacles.
#[derive(Debug, Clone)]
pub struct NavigationSim {
    config: NavigatorConfig,
    /// Field at tick 0, kept for `reset`.
    initial_obstacles: Vec<Obstacle>,
    obstacles: Vec<Obstacle>,
    position: Point,
    trajectory: Vec<Point>,
    obstacle_history: Vec<Vec<Point>>,
    status: RunStatus,
}

impl NavigationSim {
    pub fn new(config: NavigatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let initial_obstacles = match &config.obstacles {
            Some(obstacles) => obstacles.clone(),
            None => spawn_seeded(
                config.num_obstacles,
                &config.spawn_region,
                config.max_initial_speed,
                config.seed,
            ),
        };
        log::debug!(
            "navigation sim: {} obstacles, seed {}, {} -> {}",
            initial_obstacles.len(),
            config.seed,
            config.start,
            config.goal
        );

        let mut sim = NavigationSim {
            position: config.start,
            trajectory: vec![config.start],
            obstacles: initial_obstacles.clone(),
            initial_obstacles,
            obstacle_history: Vec::with_capacity(config.total_frames),
            status: RunStatus::Running,
            config,
        };
        sim.status = sim.evaluate();
        Ok(sim)
    }

    /// Advances obstacles, then the agent, by one tick. Once the run has
    /// finished this is a no-op that returns the final status.
    pub fn tick(&mut self) -> RunStatus {
        if self.status.is_finished() {
            return self.status;
        }

        self.obstacles = advance_scaled(
            &self.obstacles,
            &self.config.bounds,
            self.config.speed_multiplier,
        );

        self.position = step_among(
            self.position,
            self.config.goal,
            &self.obstacles,
            self.config.influence_radius,
            self.config.step_size,
        );
        self.obstacle_history.push(positions(&self.obstacles));
        self.trajectory.push(self.position);
        log::trace!("tick {}: agent at {}", self.ticks(), self.position);

        self.status = self.evaluate();
        match self.status {
            RunStatus::GoalReached { ticks } => {
                log::info!("goal {} reached after {} ticks", self.config.goal, ticks);
            }
            RunStatus::BudgetExhausted {
                ticks,
                remaining_distance,
            } => {
                log::warn!(
                    "tick budget of {} exhausted, {:.3} from goal",
                    ticks,
                    remaining_distance
                );
            }
            RunStatus::Running => {}
        }
        self.status
    }

    /// Ticks until the goal is reached or the budget runs out.
    pub fn run(&mut self) -> RunStatus {
        while !self.status.is_finished() {
            self.tick();
        }
        self.status
    }

    /// Restarts from the configured start with the tick-0 obstacle field.
    pub fn reset(&mut self) {
        log::debug!("navigation sim reset after {} ticks", self.ticks());
        self.obstacles = self.initial_obstacles.clone();
        self.position = self.config.start;
        self.trajectory.clear();
        self.trajectory.push(self.config.start);
        self.obstacle_history.clear();
        self.status = self.evaluate();
    }

    /// Moves the start and restarts the run.
    pub fn set_start(&mut self, start: Point) -> Result<(), ConfigError> {
        require_finite("start", &[start.x, start.y])?;
        self.config.start = start;
        self.reset();
        Ok(())
    }

    /// Retargets the agent without restarting. A run that had reached the
    /// old goal resumes if budget remains.
    pub fn set_goal(&mut self, goal: Point) -> Result<(), ConfigError> {
        require_finite("goal", &[goal.x, goal.y])?;
        self.config.goal = goal;
        if !matches!(self.status, RunStatus::BudgetExhausted { .. }) {
            self.status = self.evaluate();
        }
        Ok(())
    }

    fn evaluate(&self) -> RunStatus {
        let ticks = self.ticks();
        let remaining_distance = self.position.distance(&self.config.goal);
        if ticks > 0 && remaining_distance < self.config.goal_threshold {
            RunStatus::GoalReached { ticks }
        } else if ticks >= self.config.total_frames {
            RunStatus::BudgetExhausted {
                ticks,
                remaining_distance,
            }
        } else {
            RunStatus::Running
        }
    }

    pub fn ticks(&self) -> usize {
        self.obstacle_history.len()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Agent positions; index 0 is the start, index `k` the position after
    /// tick `k`.
    pub fn trajectory(&self) -> &[Point] {
        &self.trajectory
    }

    /// Obstacle centres after each tick, in the initial obstacle order.
    pub fn obstacle_history(&self) -> &[Vec<Point>] {
        &self.obstacle_history
    }
}

/// Elastic-band relaxation against a sinusoidally moving obstacle.
#[derive(Debug, Clone)]
pub struct ElasticBandSim {
    config: ElasticBandConfig,
    path: Vec<Point>,
    path_history: Vec<Vec<Point>>,
    obstacle_history: Vec<Point>,
}

impl ElasticBandSim {
    pub fn new(config: ElasticBandConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "elastic band sim: {} control points, {} frames",
            config.initial_path.len(),
            config.total_frames
        );
        Ok(ElasticBandSim {
            path: config.initial_path.clone(),
            path_history: Vec::with_capacity(config.total_frames),
            obstacle_history: Vec::with_capacity(config.total_frames),
            config,
        })
    }

    /// Relaxes the band once against the obstacle at the current tick.
    /// Returns `false` without doing anything once the frame budget is spent.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let t = self.ticks() as f64;
        let obstacle = self.config.obstacle.position_at(t);
        self.path = relax(&self.path, obstacle, self.config.obstacle_radius, self.config.alpha);
        self.path_history.push(self.path.clone());
        self.obstacle_history.push(obstacle);
        log::trace!("band tick {}: obstacle at {}", self.ticks(), obstacle);
        true
    }

    pub fn run(&mut self) {
        while self.tick() {}
        log::info!("elastic band relaxed over {} frames", self.ticks());
    }

    pub fn reset(&mut self) {
        log::debug!("elastic band sim reset after {} ticks", self.ticks());
        self.path = self.config.initial_path.clone();
        self.path_history.clear();
        self.obstacle_history.clear();
    }

    pub fn is_finished(&self) -> bool {
        self.ticks() >= self.config.total_frames
    }

    pub fn ticks(&self) -> usize {
        self.path_history.len()
    }

    pub fn config(&self) -> &ElasticBandConfig {
        &self.config
    }

    /// Current control points.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Full path after each tick.
    pub fn path_history(&self) -> &[Vec<Point>] {
        &self.path_history
    }

    /// Obstacle position used at each tick.
    pub fn obstacle_history(&self) -> &[Point] {
        &self.obstacle_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elastic_band::max_tension;
    use crate::metrics::{max_lateral_deviation, min_clearance};
    use crate::oscillator::SinusoidalObstacle;
    use crate::structs::Vector2D;
    use approx::assert_relative_eq;

    fn open_field() -> NavigatorConfig {
        NavigatorConfig {
            num_obstacles: 0,
            ..Default::default()
        }
    }

    fn static_obstacle(x: f64, y: f64) -> Obstacle {
        Obstacle::new(Point::new(x, y), Vector2D::zero())
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn test_drivers_are_send() {
        assert_send::<NavigationSim>();
        assert_send::<ElasticBandSim>();
    }

    // ==================== NavigationSim Tests ====================

    #[test]
    fn test_open_field_reaches_goal_in_straight_line() {
        let mut sim = NavigationSim::new(open_field()).unwrap();
        let status = sim.run();

        // ‖(8,6)‖ / 0.5 = 20 ticks
        match status {
            RunStatus::GoalReached { ticks } => {
                assert!((19..=21).contains(&ticks), "took {} ticks", ticks)
            }
            other => panic!("expected goal, got {:?}", other),
        }
        assert_eq!(sim.trajectory().len(), sim.ticks() + 1);
        assert_eq!(sim.trajectory()[0], Point::new(0.0, 0.0));
        assert!(sim.position().distance(&Point::new(8.0, 6.0)) < 0.5);

        // Every step lies on the start-goal line
        let deviation =
            max_lateral_deviation(sim.trajectory(), Point::new(0.0, 0.0), Point::new(8.0, 6.0));
        assert!(deviation < 1e-9);
        for pair in sim.trajectory().windows(2) {
            assert_relative_eq!(pair[0].distance(&pair[1]), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_obstacle_deflects_trajectory() {
        let goal = Point::new(8.0, 5.5);
        let baseline_config = NavigatorConfig { goal, ..open_field() };
        let obstacle_config = NavigatorConfig {
            obstacles: Some(vec![static_obstacle(4.0, 3.0)]),
            ..baseline_config.clone()
        };

        let mut baseline = NavigationSim::new(baseline_config).unwrap();
        let mut deflected = NavigationSim::new(obstacle_config).unwrap();
        assert!(baseline.run().reached_goal());
        assert!(deflected.run().reached_goal());

        let start = Point::new(0.0, 0.0);
        let base_dev = max_lateral_deviation(baseline.trajectory(), start, goal);
        let defl_dev = max_lateral_deviation(deflected.trajectory(), start, goal);
        assert!(base_dev < 1e-9);
        assert!(defl_dev > 0.3, "lateral deviation {}", defl_dev);

        // It did pass inside the influence radius, but further out than
        // the undisturbed line would have
        let clearance =
            min_clearance(deflected.trajectory(), deflected.obstacle_history()).unwrap();
        assert!(clearance < 0.6);
        let straight_clearance = baseline
            .trajectory()
            .iter()
            .map(|p| p.distance(&Point::new(4.0, 3.0)))
            .fold(f64::INFINITY, f64::min);
        assert!(clearance > straight_clearance);
    }

    #[test]
    fn test_obstacle_own_radius_replaces_influence_radius() {
        // (4,3) lies ~0.21 off the straight line to (8,5.5)
        let goal = Point::new(8.0, 5.5);
        let baseline_config = NavigatorConfig { goal, ..open_field() };
        let small_config = NavigatorConfig {
            obstacles: Some(vec![static_obstacle(4.0, 3.0).with_radius(0.1)]),
            ..baseline_config.clone()
        };
        let shared_config = NavigatorConfig {
            obstacles: Some(vec![static_obstacle(4.0, 3.0)]),
            ..baseline_config.clone()
        };

        let mut baseline = NavigationSim::new(baseline_config).unwrap();
        let mut small = NavigationSim::new(small_config).unwrap();
        let mut shared = NavigationSim::new(shared_config).unwrap();
        baseline.run();
        small.run();
        shared.run();

        assert_eq!(small.trajectory(), baseline.trajectory());
        assert_ne!(shared.trajectory(), baseline.trajectory());
    }

    #[test]
    fn test_local_minimum_exhausts_budget_without_error() {
        // Obstacle dead ahead on the x axis: forces cancel, agent oscillates
        let config = NavigatorConfig {
            goal: Point::new(8.0, 0.0),
            obstacles: Some(vec![static_obstacle(4.0, 0.0)]),
            ..Default::default()
        };
        let mut sim = NavigationSim::new(config).unwrap();
        let status = sim.run();

        match status {
            RunStatus::BudgetExhausted {
                ticks,
                remaining_distance,
            } => {
                assert_eq!(ticks, 200);
                assert!(remaining_distance > 4.0);
            }
            other => panic!("expected stall, got {:?}", other),
        }
        assert_eq!(sim.trajectory().len(), 201);
        assert!(sim.trajectory().iter().all(|p| p.is_finite() && p.y == 0.0));
        assert!(sim.trajectory().iter().all(|p| p.x < 3.6));
    }

    #[test]
    fn test_budget_limits_ticks() {
        let config = NavigatorConfig {
            total_frames: 5,
            ..Default::default()
        };
        let mut sim = NavigationSim::new(config).unwrap();
        let status = sim.run();
        assert!(matches!(status, RunStatus::BudgetExhausted { ticks: 5, .. }));
        assert_eq!(sim.trajectory().len(), 6);
        assert_eq!(sim.obstacle_history().len(), 5);

        // Further ticks are no-ops
        assert_eq!(sim.tick(), status);
        assert_eq!(sim.trajectory().len(), 6);
    }

    #[test]
    fn test_zero_budget_is_finished_immediately() {
        let config = NavigatorConfig {
            total_frames: 0,
            ..Default::default()
        };
        let sim = NavigationSim::new(config).unwrap();
        assert!(matches!(sim.status(), RunStatus::BudgetExhausted { ticks: 0, .. }));
        assert_eq!(sim.trajectory(), &[Point::new(0.0, 0.0)]);
    }

    #[test]
    fn test_start_at_goal_still_takes_a_tick() {
        let config = NavigatorConfig {
            start: Point::new(8.0, 6.0),
            ..open_field()
        };
        let mut sim = NavigationSim::new(config).unwrap();
        assert_eq!(sim.status(), RunStatus::Running);
        assert_eq!(sim.tick(), RunStatus::GoalReached { ticks: 1 });
        assert_eq!(sim.position(), Point::new(8.0, 6.0));
    }

    #[test]
    fn test_obstacle_history_aligned_with_obstacles() {
        let mut sim = NavigationSim::new(NavigatorConfig {
            total_frames: 30,
            ..Default::default()
        })
        .unwrap();
        let initial: Vec<Point> = sim.obstacles().iter().map(|o| o.position).collect();
        sim.run();

        for snapshot in sim.obstacle_history() {
            assert_eq!(snapshot.len(), 5);
        }
        // First snapshot is one tick after spawn, obstacle by obstacle
        for (before, after) in initial.iter().zip(&sim.obstacle_history()[0]) {
            assert!(before.distance(after) <= 0.1 * 2f64.sqrt() + 1e-12);
        }
        let last = sim.obstacle_history().last().unwrap();
        let current: Vec<Point> = sim.obstacles().iter().map(|o| o.position).collect();
        assert_eq!(last, &current);
    }

    #[test]
    fn test_obstacles_stay_near_bounds() {
        // ~707 away at 0.5 per tick: out of reach within 200 ticks
        let mut sim = NavigationSim::new(NavigatorConfig {
            num_obstacles: 8,
            max_initial_speed: 0.4,
            speed_multiplier: 2.0,
            goal: Point::new(-500.0, -500.0),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(sim.run(), RunStatus::BudgetExhausted { ticks: 200, .. }));
        assert_eq!(sim.obstacle_history().len(), 200);

        let bounds = sim.config().bounds;
        // One tick of overshoot at most: 0.4 * 2.0 per axis
        let slack = 0.8;
        for snapshot in sim.obstacle_history() {
            for p in snapshot {
                assert!(p.x >= bounds.x_min - slack && p.x <= bounds.x_max + slack, "{}", p);
                assert!(p.y >= bounds.y_min - slack && p.y <= bounds.y_max + slack, "{}", p);
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = NavigationSim::new(NavigatorConfig::default()).unwrap();
        let mut b = NavigationSim::new(NavigatorConfig::default()).unwrap();
        assert_eq!(a.run(), b.run());
        assert_eq!(a.trajectory(), b.trajectory());
        assert_eq!(a.obstacle_history(), b.obstacle_history());

        let mut c = NavigationSim::new(NavigatorConfig {
            seed: 1234,
            ..Default::default()
        })
        .unwrap();
        c.run();
        assert_ne!(a.obstacle_history()[0], c.obstacle_history()[0]);
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut sim = NavigationSim::new(NavigatorConfig::default()).unwrap();
        let first_status = sim.run();
        let first_trajectory = sim.trajectory().to_vec();
        let first_obstacles = sim.obstacle_history().to_vec();

        sim.reset();
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.trajectory().len(), 1);
        assert_eq!(sim.status(), RunStatus::Running);

        assert_eq!(sim.run(), first_status);
        assert_eq!(sim.trajectory(), first_trajectory.as_slice());
        assert_eq!(sim.obstacle_history(), first_obstacles.as_slice());
    }

    #[test]
    fn test_set_goal_resumes_finished_run() {
        let mut sim = NavigationSim::new(open_field()).unwrap();
        assert!(sim.run().reached_goal());
        let ticks = sim.ticks();

        sim.set_goal(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(sim.status(), RunStatus::Running);
        assert!(sim.run().reached_goal());
        assert!(sim.ticks() > ticks);
        assert!(sim.position().distance(&Point::new(0.0, 0.0)) < 0.5);
    }

    #[test]
    fn test_set_start_restarts() {
        let mut sim = NavigationSim::new(open_field()).unwrap();
        sim.tick();
        sim.tick();
        sim.set_start(Point::new(2.0, 0.0)).unwrap();
        assert_eq!(sim.trajectory(), &[Point::new(2.0, 0.0)]);
        assert!(sim.obstacle_history().is_empty());

        assert!(sim.set_start(Point::new(f64::NAN, 0.0)).is_err());
        assert!(sim.set_goal(Point::new(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = NavigationSim::new(NavigatorConfig {
            influence_radius: -0.6,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("influence_radius"));
    }

    // ==================== ElasticBandSim Tests ====================

    #[test]
    fn test_band_run_records_every_frame() {
        let mut sim = ElasticBandSim::new(ElasticBandConfig::default()).unwrap();
        sim.run();

        assert_eq!(sim.ticks(), 60);
        assert_eq!(sim.path_history().len(), 60);
        assert_eq!(sim.obstacle_history().len(), 60);
        assert!(!sim.tick());

        let oracle = SinusoidalObstacle::default();
        for (t, obstacle) in sim.obstacle_history().iter().enumerate() {
            assert_eq!(*obstacle, oracle.position_at(t as f64));
        }
        assert_eq!(sim.path(), sim.path_history().last().unwrap().as_slice());
    }

    #[test]
    fn test_band_endpoints_pinned_in_every_snapshot() {
        let config = ElasticBandConfig::default();
        let first = config.initial_path[0];
        let last = *config.initial_path.last().unwrap();
        let mut sim = ElasticBandSim::new(config).unwrap();
        sim.run();

        for snapshot in sim.path_history() {
            assert_eq!(snapshot.len(), 5);
            assert_eq!(snapshot[0].x.to_bits(), first.x.to_bits());
            assert_eq!(snapshot[0].y.to_bits(), first.y.to_bits());
            assert_eq!(snapshot[4].x.to_bits(), last.x.to_bits());
            assert_eq!(snapshot[4].y.to_bits(), last.y.to_bits());
        }
    }

    #[test]
    fn test_band_pushed_by_nearby_obstacle() {
        // At t = 0 the obstacle sits 0.2 above the middle control point
        let mut sim = ElasticBandSim::new(ElasticBandConfig::default()).unwrap();
        sim.tick();
        let middle = sim.path()[2];
        assert_eq!(middle.x, 4.0);
        assert!(middle.y < 2.0 - 0.4, "middle point at {}", middle);
    }

    #[test]
    fn test_band_without_obstacle_straightens() {
        let config = ElasticBandConfig {
            obstacle: SinusoidalObstacle::new(100.0, 100.0, 1.0, 60.0),
            ..Default::default()
        };
        let mut sim = ElasticBandSim::new(config).unwrap();
        sim.run();
        assert!(max_tension(sim.path()) < 1e-4);
    }

    #[test]
    fn test_band_reset() {
        let mut sim = ElasticBandSim::new(ElasticBandConfig::default()).unwrap();
        sim.run();
        let history = sim.path_history().to_vec();
        sim.reset();
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.path(), ElasticBandConfig::default().initial_path.as_slice());
        sim.run();
        assert_eq!(sim.path_history(), history.as_slice());
    }

    #[test]
    fn test_band_two_point_path_is_static() {
        let path = vec![Point::new(0.0, 0.0), Point::new(4.0, 2.2)];
        let mut sim = ElasticBandSim::new(ElasticBandConfig {
            initial_path: path.clone(),
            ..Default::default()
        })
        .unwrap();
        sim.run();
        assert!(sim.path_history().iter().all(|p| *p == path));
    }

    #[test]
    fn test_band_rejects_short_path() {
        let err = ElasticBandSim::new(ElasticBandConfig {
            initial_path: vec![],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::PathTooShort { len: 0 }));
    }
}
