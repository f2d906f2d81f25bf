//! # Core Data Structures
//!
//! Value types shared by both navigation pipelines:
//!
//! - **Point**: 2D position in continuous space
//! - **Vector2D**: 2D direction/force vector with arithmetic operations
//! - **Bounds**: axis-aligned rectangle the obstacle field bounces inside
//! - **Obstacle**: moving circular obstacle (position, heading, speed multiplier,
//!   optional own radius)
//!
//! Everything here is `Copy`; histories store copies, never references.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub x: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub y: f64,
}

#[cfg_attr(feature = "python", pymethods)]
impl Point {
    #[cfg_attr(feature = "python", new)]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn __str__(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:.2}, {:.2})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl Sub for Point {
    type Output = Vector2D;

    fn sub(self, other: Point) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Add<Vector2D> for Point {
    type Output = Point;

    fn add(self, other: Vector2D) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub x: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub y: f64,
}

#[cfg_attr(feature = "python", pymethods)]
impl Vector2D {
    #[cfg_attr(feature = "python", new)]
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    #[cfg_attr(feature = "python", staticmethod)]
    pub fn zero() -> Self {
        Vector2D { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Divides by `magnitude + eps` instead of the bare magnitude, so the
    /// result is finite for every finite input (including zero). The output is
    /// slightly shorter than a unit vector.
    pub fn guarded_normalize(&self, eps: f64) -> Vector2D {
        let denom = self.magnitude() + eps;
        Vector2D {
            x: self.x / denom,
            y: self.y / denom,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn __str__(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2D({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vector2D {
    type Output = Vector2D;

    fn div(self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

/// Closed rectangle `[x_min, x_max] × [y_min, y_max]`.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub x_min: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub x_max: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub y_min: f64,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub y_max: f64,
}

#[cfg_attr(feature = "python", pymethods)]
impl Bounds {
    #[cfg_attr(feature = "python", new)]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains_x(&self, x: f64) -> bool {
        self.x_min <= x && x <= self.x_max
    }

    pub fn contains_y(&self, y: f64) -> bool {
        self.y_min <= y && y <= self.y_max
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    /// Finite, non-empty on both axes, with spans that fit in an `f64`.
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_min < self.x_max
            && self.y_min < self.y_max
            && (self.x_max - self.x_min).is_finite()
            && (self.y_max - self.y_min).is_finite()
    }

    pub fn __str__(&self) -> String {
        format!(
            "Bounds([{:.2}, {:.2}] x [{:.2}, {:.2}])",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub position: Point,
    /// Per-tick displacement before speed scaling.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub velocity: Vector2D,
    /// Per-obstacle speed multiplier.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Influence radius of this obstacle; `None` falls back to the
    /// navigator's `influence_radius`.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default)]
    pub radius: Option<f64>,
}

fn default_speed() -> f64 {
    1.0
}

#[cfg_attr(feature = "python", pymethods)]
impl Obstacle {
    #[cfg_attr(feature = "python", new)]
    pub fn new(position: Point, velocity: Vector2D) -> Self {
        Obstacle {
            position,
            velocity,
            speed: 1.0,
            radius: None,
        }
    }

    pub fn with_speed(&self, speed: f64) -> Obstacle {
        Obstacle { speed, ..*self }
    }

    pub fn with_radius(&self, radius: f64) -> Obstacle {
        Obstacle {
            radius: Some(radius),
            ..*self
        }
    }

    /// Radius this obstacle repels within.
    pub fn influence_radius(&self, default_radius: f64) -> f64 {
        self.radius.unwrap_or(default_radius)
    }

    pub fn distance_to(&self, p: &Point) -> f64 {
        self.position.distance(p)
    }

    pub fn __str__(&self) -> String {
        format!(
            "Obstacle(pos={}, vel={}, speed={:.2})",
            self.position, self.velocity, self.speed
        )
    }
}
