//! Run parameters
//!
//! `SimulationConfig` holds the immutable settings of one run:
//! - step size in seconds and run length in days,
//! - which integrator advances the system,
//! - how many samples the trajectory keeps,
//! - an optional magnitude bound used to detect divergence

use serde::Deserialize;

use crate::error::{Result, SimError};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Newtonian constant of gravitation in SI units (m^3 kg^-1 s^-2)
pub const G_SI: f64 = 6.6743e-11;

/// Which step function advances the system
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegratorKind {
    #[serde(rename = "semi_implicit_euler")] // kick-drift-kick with one force evaluation per step
    SemiImplicitEuler,

    #[serde(rename = "rk4")] // classical RK4 on the full (position, velocity) state
    Rk4,

    #[serde(rename = "rk4_velocity")] // RK4 on velocity only, then an Euler position update
    Rk4Velocity,

    #[serde(rename = "mutual_two_body")] // kick-drift-kick where the tracked object also pulls on the other free bodies
    MutualTwoBody,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 4] = [
        IntegratorKind::SemiImplicitEuler,
        IntegratorKind::Rk4,
        IntegratorKind::Rk4Velocity,
        IntegratorKind::MutualTwoBody,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::SemiImplicitEuler => "semi_implicit_euler",
            IntegratorKind::Rk4 => "rk4",
            IntegratorKind::Rk4Velocity => "rk4_velocity",
            IntegratorKind::MutualTwoBody => "mutual_two_body",
        }
    }
}

/// Which steps end up in the trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    #[default]
    All,
    /// Keep steps that are a multiple of n; the first and last samples are always kept
    EveryNth(usize),
}

impl Retention {
    pub fn keeps(&self, step: usize, total_steps: usize) -> bool {
        match *self {
            Retention::All => true,
            Retention::EveryNth(n) => step % n == 0 || step == total_steps,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub time_step: f64, // seconds
    pub duration_days: f64,
    pub integrator: IntegratorKind,
    pub retention: Retention,
    pub divergence_bound: Option<f64>, // max |x| and |v| for free bodies
}

impl SimulationConfig {
    pub fn new(time_step: f64, duration_days: f64, integrator: IntegratorKind) -> Self {
        Self {
            time_step,
            duration_days,
            integrator,
            retention: Retention::All,
            divergence_bound: None,
        }
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_divergence_bound(mut self, bound: f64) -> Self {
        self.divergence_bound = Some(bound);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "time_step must be a positive number of seconds, got {}",
                self.time_step
            )));
        }
        if !(self.duration_days.is_finite() && self.duration_days > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "duration_days must be positive, got {}",
                self.duration_days
            )));
        }
        if let Retention::EveryNth(0) = self.retention {
            return Err(SimError::InvalidConfiguration("retention interval must be at least 1".into()));
        }
        if let Some(bound) = self.divergence_bound {
            if bound.is_nan() || bound <= 0.0 {
                return Err(SimError::InvalidConfiguration(format!(
                    "divergence_bound must be positive, got {bound}"
                )));
            }
        }
        Ok(())
    }

    /// floor(duration_days * 86400 / time_step)
    pub fn steps(&self) -> usize {
        (self.duration_days * SECONDS_PER_DAY / self.time_step).floor() as usize
    }
}
