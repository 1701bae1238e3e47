//! Force / acceleration contributors
//!
//! The pairwise Newtonian law plus the `Acceleration` trait the integrators
//! drive through an `AccelSet`. Accelerations are evaluated at an explicit
//! slice of positions so Runge-Kutta stages can sample the field without
//! cloning the whole `System`

use crate::simulation::states::{BodyId, NVec2, System};
use crate::simulation::vector::{displacement, normalize, squared_distance};

/// Which bodies act as gravity sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// Restricted problem: `passive` feels every other body but pulls on nothing
    Restricted { passive: BodyId },
    /// Every body pulls on every other body
    Mutual,
}

impl Coupling {
    fn is_source(&self, j: usize) -> bool {
        match *self {
            Coupling::Restricted { passive } => passive.0 != j,
            Coupling::Mutual => true,
        }
    }
}

/// Acceleration of a point at `target` due to a mass at `source`, or `None`
/// when the two coincide and the direction is undefined
pub fn try_gravitational_acceleration(target: NVec2, source: NVec2, source_mass: f64, g: f64) -> Option<NVec2> {
    let d2 = squared_distance(target, source);
    if d2 == 0.0 {
        return None;
    }
    // |a| = G m / r^2, pointing from target toward source
    let dir = normalize(displacement(target, source));
    Some(dir * (g * source_mass / d2))
}

/// Same as [`try_gravitational_acceleration`] with coincident points
/// contributing nothing
pub fn gravitational_acceleration(target: NVec2, source: NVec2, source_mass: f64, g: f64) -> NVec2 {
    try_gravitational_acceleration(target, source, source_mass, g).unwrap_or_else(NVec2::zeros)
}

/// Trait for acceleration sources operating on a [`System`]
/// Implementations add their contribution into `out[i]` for every free body
/// and return how many degenerate (zero separation) pairs they skipped
pub trait Acceleration {
    fn acceleration(&self, sys: &System, positions: &[NVec2], coupling: Coupling, out: &mut [NVec2]) -> usize;
}

/// Direct-sum Newtonian gravity using the system's `G`, no softening
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonianGravity;

impl NewtonianGravity {
    /// Net acceleration on body `i` from every other source body
    pub fn net_on(&self, sys: &System, positions: &[NVec2], i: usize, coupling: Coupling) -> (NVec2, usize) {
        let xi = positions[i];
        let mut acc = NVec2::zeros();
        let mut degenerate = 0;

        for (j, bj) in sys.bodies.iter().enumerate() {
            if j == i || !coupling.is_source(j) {
                continue;
            }
            match try_gravitational_acceleration(xi, positions[j], bj.m, sys.g) {
                Some(a) => acc += a,
                None => degenerate += 1,
            }
        }
        (acc, degenerate)
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, positions: &[NVec2], coupling: Coupling, out: &mut [NVec2]) -> usize {
        let mut degenerate = 0;
        for (i, b) in sys.bodies.iter().enumerate() {
            // fixed bodies are never moved, so their field value is never used
            if b.fixed {
                continue;
            }
            let (a, d) = self.net_on(sys, positions, i, coupling);
            out[i] += a;
            degenerate += d;
        }
        degenerate
    }
}

/// Collection of acceleration terms whose contributions are summed into a
/// single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// The set every scenario uses: plain Newtonian gravity
    pub fn gravity() -> Self {
        Self::new().with(NewtonianGravity)
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies of `sys` placed at `positions`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    /// - returns the number of degenerate pairs skipped
    pub fn accumulate_accels(&self, sys: &System, positions: &[NVec2], coupling: Coupling, out: &mut [NVec2]) -> usize {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        let mut degenerate = 0;
        for term in &self.terms {
            degenerate += term.acceleration(sys, positions, coupling, out);
        }
        degenerate
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::gravity()
    }
}
