//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator choice, trajectory retention, divergence bound
//! - [`ParametersConfig`] – step size, run length and the gravitational constant
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper, plus the name of the tracked body
//!
//! # YAML format
//! The Earth-Moon-object scenario:
//!
//! ```yaml
//! engine:
//!   integrator: "mutual_two_body"   # or "semi_implicit_euler", "rk4", "rk4_velocity"
//!   retention: 10                   # keep every 10th step (optional)
//!   divergence_bound: 1.0e13        # optional
//!
//! parameters:
//!   time_step: 100.0                # seconds
//!   duration_days: 200.0
//!   G: 6.6743e-11
//!
//! tracked: "object"
//!
//! bodies:
//!   - name: "earth"
//!     x: [0.0, 0.0]
//!     m: 5.972e24
//!     fixed: true
//!   - name: "moon"
//!     x: [3.844e8, 0.0]
//!     v: [0.0, 1018.3]
//!     m: 7.348e22
//!   - name: "object"
//!     x: [0.0, 4.344e8]
//!     v: [900.0, -500.0]
//!     m: 1.0e23
//! ```
//!
//! A body with `angular_velocity` set follows a circular path about the
//! origin and is never integrated; its `v` and `fixed` fields are ignored.
//!
//! `Scenario::build_scenario` turns this into a validated runtime `System`
//! and `SimulationConfig`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::IntegratorKind;

/// Engine-level choices for a run
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub integrator: IntegratorKind, // Time integrator used for advancing the system state
    #[serde(default)]
    pub retention: Option<usize>, // keep every Nth step, all steps when absent
    #[serde(default)]
    pub divergence_bound: Option<f64>, // max |x| and |v| before a run is declared divergent
}

/// Numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub time_step: f64, // seconds
    pub duration_days: f64, // run length
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub x: Vec<f64>, // initial position [x, y]
    #[serde(default)]
    pub v: Vec<f64>, // initial velocity [vx, vy], at rest when omitted
    pub m: f64, // mass
    #[serde(default)]
    pub fixed: bool, // pinned in place, still attracts
    #[serde(default)]
    pub angular_velocity: Option<f64>, // rad/s, carried around the origin instead of integrated
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub tracked: Option<String>, // defaults to the first free body
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
