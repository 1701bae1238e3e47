//! Simulation driver
//!
//! Owns the `System`, the force set and the growing `Trajectory` for one
//! run. A run can be driven to completion with [`run`], or in chunks through
//! [`Simulation::advance`] so a caller can inspect the state between chunks
//! and decide whether to continue

use log::{debug, error, info, warn};

use crate::error::{Result, SimError};
use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::accelerations_at;
use crate::simulation::params::{Retention, SimulationConfig};
use crate::simulation::states::{BodyId, NVec2, System};
use crate::simulation::trajectory::{Trajectory, TrajectorySample};

// upper bound on the up-front sample allocation, the store grows past it if needed
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 20;

/// Run `initial_system` for the whole duration of `config`
pub fn run(initial_system: System, config: &SimulationConfig) -> Result<Trajectory> {
    let mut sim = Simulation::new(initial_system, config.clone())?;
    sim.run_to_end()?;
    Ok(sim.into_trajectory())
}

pub struct Simulation {
    system: System,
    config: SimulationConfig,
    forces: AccelSet,
    trajectory: Trajectory,
    step: usize, // steps taken so far
    total_steps: usize,
    diverged: Option<(usize, f64, BodyId)>,
}

impl Simulation {
    /// Validate the inputs and record the initial state as sample 0
    pub fn new(system: System, config: SimulationConfig) -> Result<Self> {
        Self::with_forces(system, config, AccelSet::gravity())
    }

    /// Same as [`Simulation::new`] with a custom acceleration set
    pub fn with_forces(system: System, config: SimulationConfig, forces: AccelSet) -> Result<Self> {
        config.validate()?;
        system.validate()?;

        let total_steps = config.steps();
        let kept = match config.retention {
            Retention::All => total_steps.saturating_add(1),
            Retention::EveryNth(n) => total_steps / n + 2,
        };
        let mut trajectory = Trajectory::new(&system, kept.min(MAX_PREALLOCATED_SAMPLES));

        // sample 0 carries the field at the initial positions
        let coupling = config.integrator.coupling(&system);
        let positions: Vec<NVec2> = system.bodies.iter().map(|b| b.x).collect();
        let mut degenerate = 0;
        let accels = accelerations_at(&system, &forces, coupling, &positions, &mut degenerate);
        {
            let diag = trajectory.diagnostics_mut();
            diag.force_evaluations += 1;
            diag.degenerate_pairs += degenerate as u64;
        }
        if degenerate > 0 {
            warn!("initial state has {degenerate} coincident body pair(s); their mutual force is ignored");
        }
        trajectory.push(TrajectorySample::capture(&system, 0, accels))?;

        info!(
            "simulation ready: {} bodies, integrator = {}, dt = {} s, {} days -> {} steps",
            system.bodies.len(),
            config.integrator.name(),
            config.time_step,
            config.duration_days,
            total_steps
        );

        Ok(Self {
            system,
            config,
            forces,
            trajectory,
            step: 0,
            total_steps,
            diverged: None,
        })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.total_steps || self.diverged.is_some()
    }

    /// Take one step. Returns `Ok(false)` once the configured duration is
    /// covered; a diverged run keeps returning the divergence error
    pub fn step(&mut self) -> Result<bool> {
        if let Some((step, time, body)) = self.diverged {
            return Err(SimError::NumericalDivergence { step, time, body });
        }
        if self.step >= self.total_steps {
            return Ok(false);
        }

        let stats = self.config.integrator.step(&mut self.system, &self.forces, self.config.time_step);
        self.step += 1;

        let first_degenerate = self.trajectory.diagnostics().degenerate_pairs == 0 && stats.degenerate_pairs > 0;
        {
            let diag = self.trajectory.diagnostics_mut();
            diag.force_evaluations += stats.force_evaluations as u64;
            diag.degenerate_pairs += stats.degenerate_pairs as u64;
        }
        if first_degenerate {
            warn!(
                "step {}: bodies at zero separation, pairwise force treated as zero",
                self.step
            );
        }

        if let Some(body) = self.find_divergent() {
            let (step, time) = (self.step, self.system.t);
            error!(
                "step {step} (t = {time} s): body {body} diverged, dt = {} s is unstable for this system",
                self.config.time_step
            );
            self.diverged = Some((step, time, body));
            return Err(SimError::NumericalDivergence { step, time, body });
        }

        if self.config.retention.keeps(self.step, self.total_steps) {
            self.trajectory.push(TrajectorySample::capture(&self.system, self.step, stats.accels))?;
        }
        Ok(true)
    }

    /// Take up to `n` steps; returns how many were taken
    pub fn advance(&mut self, n: usize) -> Result<usize> {
        let mut taken = 0;
        while taken < n && self.step()? {
            taken += 1;
        }
        debug!("advanced {taken} steps, {}/{} done, t = {} s", self.step, self.total_steps, self.system.t);
        Ok(taken)
    }

    /// Step until the configured duration is covered
    pub fn run_to_end(&mut self) -> Result<()> {
        let chunk = (self.total_steps / 10).max(1);
        while !self.is_finished() {
            self.advance(chunk)?;
        }
        let diag = self.trajectory.diagnostics();
        info!(
            "simulation finished: {} samples, {} force evaluations, {} degenerate pairs",
            self.trajectory.len(),
            diag.force_evaluations,
            diag.degenerate_pairs
        );
        Ok(())
    }

    /// First free body whose state is non-finite or beyond the configured bound
    fn find_divergent(&self) -> Option<BodyId> {
        let bound = self.config.divergence_bound.unwrap_or(f64::INFINITY);
        self.system
            .bodies
            .iter()
            .position(|b| {
                let bad = |v: NVec2| !(v.x.is_finite() && v.y.is_finite()) || v.norm() > bound;
                !b.fixed && (bad(b.x) || bad(b.v))
            })
            .map(BodyId)
    }
}
