//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`: the
//! validated run settings (`SimulationConfig`) and the initial `System` at
//! t = 0. Every problem with the input is reported as
//! `SimError::InvalidConfiguration` before anything is stepped

use std::collections::HashSet;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::{self, Simulation};
use crate::simulation::params::{Retention, SimulationConfig};
use crate::simulation::states::{Body, NVec2, System};
use crate::simulation::trajectory::Trajectory;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub system: System,
}

fn vec2(body: &str, field: &str, c: &[f64]) -> Result<NVec2> {
    match c {
        [] if field == "v" => Ok(NVec2::zeros()),
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::InvalidConfiguration(format!(
            "body '{body}': `{field}` needs exactly 2 components, got {}",
            c.len()
        ))),
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let mut seen = HashSet::new();
        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            let BodyConfig { name, x, v, m, fixed, angular_velocity } = bc;
            if !seen.insert(name.as_str()) {
                return Err(SimError::InvalidConfiguration(format!("duplicate body name '{name}'")));
            }
            let position = vec2(name, "x", x)?;
            let body = match angular_velocity {
                // prescribed path: the velocity follows from the rotation
                Some(w) => Body::circling(name.clone(), position, *m, *w),
                None => Body {
                    name: name.clone(),
                    x: position,
                    v: vec2(name, "v", v)?,
                    m: *m,
                    fixed: *fixed,
                    angular_velocity: None,
                },
            };
            bodies.push(body);
        }

        let mut system = System::new(bodies, cfg.parameters.g);
        if let Some(name) = &cfg.tracked {
            let id = system
                .find(name)
                .ok_or_else(|| SimError::InvalidConfiguration(format!("tracked body '{name}' does not exist")))?;
            system = system.with_tracked(id);
        }
        system.validate()?;

        let retention = match cfg.engine.retention {
            None | Some(1) => Retention::All,
            Some(n) => Retention::EveryNth(n),
        };
        let config = SimulationConfig {
            time_step: cfg.parameters.time_step,
            duration_days: cfg.parameters.duration_days,
            integrator: cfg.engine.integrator,
            retention,
            divergence_bound: cfg.engine.divergence_bound,
        };
        config.validate()?;

        Ok(Self { config, system })
    }

    /// Driver positioned at t = 0, for chunked runs
    pub fn simulation(&self) -> Result<Simulation> {
        Simulation::new(self.system.clone(), self.config.clone())
    }

    /// Run the whole scenario
    pub fn run(&self) -> Result<Trajectory> {
        engine::run(self.system.clone(), &self.config)
    }
}
