//! # Reactive Navigation Core
//!
//! Deterministic 2D reactive navigation among moving circular obstacles,
//! with optional Python bindings.
//!
//! ## Algorithms
//!
//! - **Potential field**: steps a point agent toward a goal, repelled by every
//!   obstacle inside an influence radius. Obstacles bounce inside a rectangle.
//! - **Elastic band**: relaxes a polyline with pinned endpoints under tension
//!   (discrete Laplacian) and repulsion from one oscillating obstacle.
//!
//! Both pipelines are driven tick by tick by [`NavigationSim`] and
//! [`ElasticBandSim`], which record per-tick histories for rendering.
//!
//! ## Usage
//!
//! ```ignore
//! let mut sim = NavigationSim::new(NavigatorConfig::default())?;
//! let status = sim.run();
//! let trajectory = sim.trajectory();
//! ```
//!
//! With the `python` feature the crate builds as a Python extension module;
//! core functions: `simulate_navigation_py`, `simulate_elastic_band_py`.

pub mod config;
pub mod elastic_band;
pub mod error;
pub mod metrics;
pub mod obstacle_field;
pub mod oscillator;
pub mod potential_field;
pub mod simulation;
pub mod structs;

#[cfg(feature = "python")]
mod python;

pub use config::{ElasticBandConfig, NavigatorConfig};
pub use error::ConfigError;
pub use oscillator::SinusoidalObstacle;
pub use simulation::{ElasticBandSim, NavigationSim, RunStatus};
pub use structs::{Bounds, Obstacle, Point, Vector2D};
