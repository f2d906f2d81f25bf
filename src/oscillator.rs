//! Closed-form moving obstacle for the elastic-band pipeline: a vertical
//! sinusoid around a fixed centre.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::structs::Point;

/// `x = cx`, `y = cy + amplitude * sin(2π t / period)`.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinusoidalObstacle {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub cx: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub cy: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub amplitude: f64,
    /// Ticks per full oscillation.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub period: f64,
}

impl Default for SinusoidalObstacle {
    fn default() -> Self {
        SinusoidalObstacle {
            cx: 4.0,
            cy: 2.2,
            amplitude: 1.0,
            period: 60.0,
        }
    }
}

#[cfg_attr(feature = "python", pymethods)]
impl SinusoidalObstacle {
    #[cfg_attr(feature = "python", new)]
    pub fn new(cx: f64, cy: f64, amplitude: f64, period: f64) -> Self {
        SinusoidalObstacle {
            cx,
            cy,
            amplitude,
            period,
        }
    }

    /// Stateless; any `t` may be queried in any order.
    pub fn position_at(&self, t: f64) -> Point {
        let phase = 2.0 * PI * t / self.period;
        Point::new(self.cx, self.cy + self.amplitude * phase.sin())
    }
}
