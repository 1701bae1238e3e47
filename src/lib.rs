pub mod error;
pub mod simulation;
pub mod configuration;
pub mod export;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{Body, BodyId, System, NVec2};
pub use simulation::params::{IntegratorKind, Retention, SimulationConfig, G_SI, SECONDS_PER_DAY};
pub use simulation::forces::{gravitational_acceleration, Acceleration, AccelSet, Coupling, NewtonianGravity};
pub use simulation::integrator::{mutual_two_body, rk4, rk4_velocity, semi_implicit_euler, StepStats};
pub use simulation::energy::{kinetic_energy, potential_energy, relative_energy_drift, total_energy};
pub use simulation::trajectory::{Diagnostics, Trajectory, TrajectorySample};
pub use simulation::engine::{run, Simulation};
pub use simulation::scenario::Scenario;
pub use simulation::producer::{ExportFileProducer, NativeProducer, ProducerRequest, TrajectoryProducer};

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use export::trajectory_file::{read_positions, read_positions_file, write_trajectory, write_trajectory_file, ExportFields, DEFAULT_EXPORT_FILE};

pub use benchmark::benchmark::{compare_integrators, IntegratorReport};
