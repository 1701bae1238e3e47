//! Error types for the simulator.

use thiserror::Error;

use crate::simulation::states::BodyId;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected before any stepping happens
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A free body left the finite (or configured) range; the step size is
    /// unstable for this system
    #[error("numerical divergence at step {step} (t = {time} s) on body {body}")]
    NumericalDivergence { step: usize, time: f64, body: BodyId },

    #[error("unknown body id {0}")]
    UnknownBody(BodyId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("trajectory file line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, SimError>;
