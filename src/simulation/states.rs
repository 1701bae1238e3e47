//! Core state types for the orbit simulation
//!
//! - `Body`   a point mass with position, velocity and a fixed/free flag;
//!   a fixed body may also follow a prescribed circular path about the origin
//! - `System` the ordered bodies, the gravitational constant, the current time
//!   and which body is the tracked object
//!
//! Bodies are addressed by `BodyId`, their index in `System::bodies`

use std::fmt;

use nalgebra::Vector2;

use crate::error::{Result, SimError};

pub type NVec2 = Vector2<f64>;

/// Index of a body inside its `System`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub fixed: bool, // never moved by an integrator, still attracts others
    pub angular_velocity: Option<f64>, // rad/s, prescribed circular motion about the origin (fixed bodies only)
}

impl Body {
    /// Free body
    pub fn new(name: impl Into<String>, x: NVec2, v: NVec2, m: f64) -> Self {
        Self {
            name: name.into(),
            x,
            v,
            m,
            fixed: false,
            angular_velocity: None,
        }
    }

    /// Body pinned in place, e.g. a central star
    pub fn fixed(name: impl Into<String>, x: NVec2, m: f64) -> Self {
        Self {
            name: name.into(),
            x,
            v: NVec2::zeros(),
            m,
            fixed: true,
            angular_velocity: None,
        }
    }

    /// Body carried around the origin at a constant angular velocity instead
    /// of being integrated. It still attracts others but feels nothing
    pub fn circling(name: impl Into<String>, x: NVec2, m: f64, angular_velocity: f64) -> Self {
        Self {
            name: name.into(),
            x,
            v: circular_velocity(x, angular_velocity),
            m,
            fixed: true,
            angular_velocity: Some(angular_velocity),
        }
    }

    /// Rotate a prescribed body by `angular_velocity * dt` about the origin;
    /// no-op for every other body
    pub fn advance_prescribed(&mut self, dt: f64) {
        let Some(w) = self.angular_velocity else {
            return;
        };
        let (sin, cos) = (w * dt).sin_cos();
        self.x = NVec2::new(self.x.x * cos - self.x.y * sin, self.x.x * sin + self.x.y * cos);
        self.v = circular_velocity(self.x, w);
    }
}

// w x r for a rotation about the origin
fn circular_velocity(x: NVec2, w: f64) -> NVec2 {
    NVec2::new(-w * x.y, w * x.x)
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>,
    pub g: f64, // gravitational constant
    pub t: f64, // time in seconds since the start of the run
    pub tracked: BodyId, // the simulated object, exported and used for coupling
}

impl System {
    /// System at t = 0 tracking the first free body (or the first body if
    /// every body is fixed)
    pub fn new(bodies: Vec<Body>, g: f64) -> Self {
        let tracked = BodyId(bodies.iter().position(|b| !b.fixed).unwrap_or(0));
        Self {
            bodies,
            g,
            t: 0.0,
            tracked,
        }
    }

    pub fn with_tracked(mut self, id: BodyId) -> Self {
        self.tracked = id;
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, id: BodyId) -> Result<&Body> {
        self.bodies.get(id.0).ok_or(SimError::UnknownBody(id))
    }

    /// Look a body up by name
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    /// Check the invariants a run relies on: at least one body, positive
    /// finite masses, finite initial state, a valid tracked id and a
    /// finite gravitational constant
    pub fn validate(&self) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(SimError::InvalidConfiguration("system has no bodies".into()));
        }
        if !self.g.is_finite() {
            return Err(SimError::InvalidConfiguration(format!("G must be finite, got {}", self.g)));
        }
        if self.tracked.0 >= self.bodies.len() {
            return Err(SimError::InvalidConfiguration(format!(
                "tracked body {} out of range for {} bodies",
                self.tracked,
                self.bodies.len()
            )));
        }
        for (i, b) in self.bodies.iter().enumerate() {
            if b.m <= 0.0 || !b.m.is_finite() {
                return Err(SimError::InvalidConfiguration(format!(
                    "body {} ({}) must have a positive mass, got {}",
                    BodyId(i),
                    b.name,
                    b.m
                )));
            }
            if let Some(w) = b.angular_velocity {
                if !b.fixed || !w.is_finite() {
                    return Err(SimError::InvalidConfiguration(format!(
                        "body {} ({}) needs a finite angular velocity and must be fixed to follow a prescribed path",
                        BodyId(i),
                        b.name
                    )));
                }
            }
            if !b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()) {
                return Err(SimError::InvalidConfiguration(format!(
                    "body {} ({}) has a non-finite initial state",
                    BodyId(i),
                    b.name
                )));
            }
        }
        Ok(())
    }
}
