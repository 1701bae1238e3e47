//! Trajectory producers
//!
//! A producer turns the eight positional parameters of the external
//! producer contract into a trajectory. The native producer runs this
//! crate's driver; `ExportFileProducer` picks up what an external producer
//! wrote to its export file. Anything else can implement the same trait and
//! be swapped in without touching the consumer

use std::path::PathBuf;

use log::info;

use crate::error::{Result, SimError};
use crate::export::trajectory_file::{read_positions_file, DEFAULT_EXPORT_FILE};
use crate::simulation::engine;
use crate::simulation::params::{IntegratorKind, SimulationConfig, G_SI};
use crate::simulation::states::{Body, BodyId, NVec2, System};
use crate::simulation::trajectory::{Trajectory, TrajectorySample};

/// Parameters of one producer invocation, in positional-argument order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProducerRequest {
    pub duration_days: f64,
    pub time_step: f64, // seconds
    pub mass_primary: f64, // fixed central mass, kg
    pub mass_secondary: f64, // orbiting mass, kg
    pub initial_distance: f64, // secondary starts at (initial_distance, 0), m
    pub initial_vx: f64, // m/s
    pub initial_vy: f64, // m/s
    pub reference_velocity: f64, // tangential speed added along +y, m/s
}

impl ProducerRequest {
    pub const ARG_COUNT: usize = 8;

    /// Build a request from the positional arguments
    pub fn from_args(args: &[f64]) -> Result<Self> {
        match *args {
            [duration_days, time_step, mass_primary, mass_secondary, initial_distance, initial_vx, initial_vy, reference_velocity] => {
                Ok(Self {
                    duration_days,
                    time_step,
                    mass_primary,
                    mass_secondary,
                    initial_distance,
                    initial_vx,
                    initial_vy,
                    reference_velocity,
                })
            }
            _ => Err(SimError::InvalidConfiguration(format!(
                "expected {} producer arguments, got {}",
                Self::ARG_COUNT,
                args.len()
            ))),
        }
    }

    /// Positional arguments for an external producer process
    pub fn to_args(&self) -> [f64; 8] {
        [
            self.duration_days,
            self.time_step,
            self.mass_primary,
            self.mass_secondary,
            self.initial_distance,
            self.initial_vx,
            self.initial_vy,
            self.reference_velocity,
        ]
    }

    /// Fixed primary at the origin, tracked secondary on the +x axis
    pub fn system(&self, g: f64) -> System {
        let primary = Body::fixed("primary", NVec2::zeros(), self.mass_primary);
        let secondary = Body::new(
            "secondary",
            NVec2::new(self.initial_distance, 0.0),
            NVec2::new(self.initial_vx, self.initial_vy + self.reference_velocity),
            self.mass_secondary,
        );
        System::new(vec![primary, secondary], g).with_tracked(BodyId(1))
    }
}

/// Source of trajectories for a producer request
pub trait TrajectoryProducer {
    fn produce(&self, request: &ProducerRequest) -> Result<Trajectory>;
}

/// Runs the in-crate driver
#[derive(Debug, Clone, Copy)]
pub struct NativeProducer {
    pub g: f64,
    pub integrator: IntegratorKind,
}

impl Default for NativeProducer {
    fn default() -> Self {
        Self {
            g: G_SI,
            integrator: IntegratorKind::SemiImplicitEuler,
        }
    }
}

impl TrajectoryProducer for NativeProducer {
    fn produce(&self, request: &ProducerRequest) -> Result<Trajectory> {
        let config = SimulationConfig::new(request.time_step, request.duration_days, self.integrator);
        engine::run(request.system(self.g), &config)
    }
}

/// Reads the `X;Y` export file an external producer wrote for `request`
///
/// The file only carries the secondary's positions: the primary is recorded
/// at the origin, velocities and accelerations as zero. Samples are spaced
/// `time_step` apart and the file must hold exactly one per step plus the
/// initial state
#[derive(Debug, Clone)]
pub struct ExportFileProducer {
    pub path: PathBuf,
}

impl Default for ExportFileProducer {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

impl TrajectoryProducer for ExportFileProducer {
    fn produce(&self, request: &ProducerRequest) -> Result<Trajectory> {
        let config = SimulationConfig::new(request.time_step, request.duration_days, IntegratorKind::SemiImplicitEuler);
        config.validate()?;
        let expected = config.steps() + 1;

        let positions = read_positions_file(&self.path)?;
        if positions.len() != expected {
            return Err(SimError::InvalidConfiguration(format!(
                "{} holds {} samples, the request needs {expected}",
                self.path.display(),
                positions.len()
            )));
        }

        let system = request.system(G_SI);
        let names = system.bodies.iter().map(|b| b.name.clone()).collect();
        let secondary = system.tracked.0;
        let mut trajectory = Trajectory::with_bodies(names, expected);
        for (step, x) in positions.into_iter().enumerate() {
            let mut sample_positions = vec![NVec2::zeros(); system.len()];
            sample_positions[secondary] = x;
            trajectory.push(TrajectorySample {
                step,
                t: step as f64 * request.time_step,
                positions: sample_positions,
                velocities: vec![NVec2::zeros(); system.len()],
                accelerations: vec![NVec2::zeros(); system.len()],
            })?;
        }
        info!("read {expected} samples from {}", self.path.display());
        Ok(trajectory)
    }
}
