//! Append-only record of sampled states
//!
//! The driver owns a `Trajectory` while a run is in progress and hands it to
//! the caller at the end. Other producers build one with
//! [`Trajectory::with_bodies`] and [`Trajectory::push`]; samples can only be
//! appended, in increasing step order

use crate::error::{Result, SimError};
use crate::simulation::states::{BodyId, NVec2, System};

/// State of every body at one instant, indexed by `BodyId`
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    pub step: usize, // step index, 0 = initial condition
    pub t: f64, // seconds
    pub positions: Vec<NVec2>,
    pub velocities: Vec<NVec2>,
    pub accelerations: Vec<NVec2>, // acceleration applied to reach this state
}

impl TrajectorySample {
    pub(crate) fn capture(sys: &System, step: usize, accelerations: Vec<NVec2>) -> Self {
        Self {
            step,
            t: sys.t,
            positions: sys.bodies.iter().map(|b| b.x).collect(),
            velocities: sys.bodies.iter().map(|b| b.v).collect(),
            accelerations,
        }
    }

    pub fn position(&self, id: BodyId) -> Option<NVec2> {
        self.positions.get(id.0).copied()
    }

    pub fn velocity(&self, id: BodyId) -> Option<NVec2> {
        self.velocities.get(id.0).copied()
    }

    pub fn acceleration(&self, id: BodyId) -> Option<NVec2> {
        self.accelerations.get(id.0).copied()
    }
}

/// Counters that never stop a run but flag unphysical input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub degenerate_pairs: u64, // ordered (target, source) pairs skipped at zero separation
    pub force_evaluations: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    names: Vec<String>,
    samples: Vec<TrajectorySample>,
    diagnostics: Diagnostics,
}

impl Trajectory {
    pub(crate) fn new(sys: &System, capacity: usize) -> Self {
        Self::with_bodies(sys.bodies.iter().map(|b| b.name.clone()).collect(), capacity)
    }

    /// Empty trajectory for the named bodies, in `BodyId` order
    pub fn with_bodies(names: Vec<String>, capacity: usize) -> Self {
        Self {
            names,
            samples: Vec::with_capacity(capacity),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Append a sample. It must hold one entry per body in every series and
    /// come after the last sample
    pub fn push(&mut self, sample: TrajectorySample) -> Result<()> {
        let n = self.names.len();
        if sample.positions.len() != n || sample.velocities.len() != n || sample.accelerations.len() != n {
            return Err(SimError::InvalidConfiguration(format!(
                "sample at step {} does not have {n} bodies",
                sample.step
            )));
        }
        if let Some(last) = self.samples.last() {
            if sample.step <= last.step {
                return Err(SimError::InvalidConfiguration(format!(
                    "sample at step {} appended after step {}",
                    sample.step, last.step
                )));
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_at(&self, i: usize) -> Option<&TrajectorySample> {
        self.samples.get(i)
    }

    pub fn first(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn body_count(&self) -> usize {
        self.names.len()
    }

    pub fn body_names(&self) -> &[String] {
        &self.names
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    fn check(&self, id: BodyId) -> Result<()> {
        if id.0 < self.names.len() {
            Ok(())
        } else {
            Err(SimError::UnknownBody(id))
        }
    }

    /// Position of `id` at every sample, in order
    pub fn positions_of(&self, id: BodyId) -> Result<Vec<NVec2>> {
        self.check(id)?;
        Ok(self.samples.iter().map(|s| s.positions[id.0]).collect())
    }

    pub fn velocities_of(&self, id: BodyId) -> Result<Vec<NVec2>> {
        self.check(id)?;
        Ok(self.samples.iter().map(|s| s.velocities[id.0]).collect())
    }

    pub fn accelerations_of(&self, id: BodyId) -> Result<Vec<NVec2>> {
        self.check(id)?;
        Ok(self.samples.iter().map(|s| s.accelerations[id.0]).collect())
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
