//! Python bindings, built with the `python` feature.
//!
//! Configs cross the boundary as JSON strings (same schema as
//! `NavigatorConfig` / `ElasticBandConfig`, missing keys take defaults);
//! histories come back as lists of `Point`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{ElasticBandConfig, NavigatorConfig};
use crate::elastic_band::relax;
use crate::error::ConfigError;
use crate::metrics;
use crate::obstacle_field::advance_scaled;
use crate::oscillator::SinusoidalObstacle;
use crate::potential_field::step;
use crate::simulation::{ElasticBandSim, NavigationSim};
use crate::structs::{Bounds, Obstacle, Point, Vector2D};

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn navigator_config(config_json: Option<&str>) -> Result<NavigatorConfig, ConfigError> {
    match config_json {
        Some(json) => NavigatorConfig::from_json_str(json),
        None => Ok(NavigatorConfig::default()),
    }
}

fn band_config(config_json: Option<&str>) -> Result<ElasticBandConfig, ConfigError> {
    match config_json {
        Some(json) => ElasticBandConfig::from_json_str(json),
        None => Ok(ElasticBandConfig::default()),
    }
}

#[pyfunction]
fn step_py(
    position: Point,
    goal: Point,
    obstacles: Vec<Point>,
    influence_radius: f64,
    step_size: f64,
) -> PyResult<Point> {
    Ok(step(position, goal, &obstacles, influence_radius, step_size))
}

#[pyfunction]
fn relax_py(
    path: Vec<Point>,
    obstacle: Point,
    obstacle_radius: f64,
    alpha: f64,
) -> PyResult<Vec<Point>> {
    Ok(relax(&path, obstacle, obstacle_radius, alpha))
}

#[pyfunction]
#[pyo3(signature = (obstacles, bounds, speed_multiplier=1.0))]
fn advance_obstacles_py(
    obstacles: Vec<Obstacle>,
    bounds: Bounds,
    speed_multiplier: f64,
) -> PyResult<Vec<Obstacle>> {
    Ok(advance_scaled(&obstacles, &bounds, speed_multiplier))
}

#[pyfunction]
fn oscillating_obstacle_py(oscillator: SinusoidalObstacle, t: f64) -> PyResult<Point> {
    Ok(oscillator.position_at(t))
}

/// Runs a navigation scenario to completion.
///
/// Returns `(trajectory, obstacle_history, reached_goal)`.
#[pyfunction]
#[pyo3(signature = (config_json=None))]
fn simulate_navigation_py(
    config_json: Option<&str>,
) -> PyResult<(Vec<Point>, Vec<Vec<Point>>, bool)> {
    let mut sim = NavigationSim::new(navigator_config(config_json)?)?;
    let status = sim.run();
    Ok((
        sim.trajectory().to_vec(),
        sim.obstacle_history().to_vec(),
        status.reached_goal(),
    ))
}

/// Runs an elastic-band scenario for its full frame budget.
///
/// Returns `(path_history, obstacle_history)`.
#[pyfunction]
#[pyo3(signature = (config_json=None))]
fn simulate_elastic_band_py(config_json: Option<&str>) -> PyResult<(Vec<Vec<Point>>, Vec<Point>)> {
    let mut sim = ElasticBandSim::new(band_config(config_json)?)?;
    sim.run();
    Ok((sim.path_history().to_vec(), sim.obstacle_history().to_vec()))
}

#[pyfunction]
fn path_length(path: Vec<Point>) -> PyResult<f64> {
    Ok(metrics::path_length(&path))
}

#[pyfunction]
fn min_clearance(
    trajectory: Vec<Point>,
    obstacle_history: Vec<Vec<Point>>,
) -> PyResult<Option<f64>> {
    Ok(metrics::min_clearance(&trajectory, &obstacle_history))
}

#[pymodule]
fn reactive_nav(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data structures
    m.add_class::<Point>()?;
    m.add_class::<Vector2D>()?;
    m.add_class::<Bounds>()?;
    m.add_class::<Obstacle>()?;
    m.add_class::<SinusoidalObstacle>()?;

    // Single-tick algorithms
    m.add_function(wrap_pyfunction!(step_py, m)?)?;
    m.add_function(wrap_pyfunction!(relax_py, m)?)?;
    m.add_function(wrap_pyfunction!(advance_obstacles_py, m)?)?;
    m.add_function(wrap_pyfunction!(oscillating_obstacle_py, m)?)?;

    // Full runs
    m.add_function(wrap_pyfunction!(simulate_navigation_py, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_elastic_band_py, m)?)?;

    // Utility functions
    m.add_function(wrap_pyfunction!(path_length, m)?)?;
    m.add_function(wrap_pyfunction!(min_clearance, m)?)?;

    Ok(())
}
