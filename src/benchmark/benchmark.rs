//! Side-by-side comparison of the integrators on one initial system
//!
//! Each scheme runs the same system for the same number of steps; the
//! report gives the relative energy drift at the end of the run, where the
//! tracked body ended up and how long the run took

use std::time::{Duration, Instant};

use log::info;

use crate::error::Result;
use crate::simulation::energy::{relative_energy_drift, total_energy};
use crate::simulation::engine::Simulation;
use crate::simulation::params::{IntegratorKind, SimulationConfig};
use crate::simulation::states::{NVec2, System};

#[derive(Debug, Clone)]
pub struct IntegratorReport {
    pub kind: IntegratorKind,
    pub energy_drift: f64, // |E(end) - E(0)| / |E(0)|
    pub final_position: NVec2, // tracked body
    pub force_evaluations: u64,
    pub elapsed: Duration,
}

/// Run `system` once per integrator, everything else taken from `config`
pub fn compare_integrators(system: &System, config: &SimulationConfig) -> Result<Vec<IntegratorReport>> {
    let e0 = total_energy(system);
    let mut reports = Vec::with_capacity(IntegratorKind::ALL.len());

    for kind in IntegratorKind::ALL {
        let cfg = SimulationConfig {
            integrator: kind,
            ..config.clone()
        };

        let t0 = Instant::now();
        let mut sim = Simulation::new(system.clone(), cfg)?;
        sim.run_to_end()?;
        let elapsed = t0.elapsed();

        let end = sim.system();
        let report = IntegratorReport {
            kind,
            energy_drift: relative_energy_drift(e0, total_energy(end)),
            final_position: end.body(end.tracked)?.x,
            force_evaluations: sim.trajectory().diagnostics().force_evaluations,
            elapsed,
        };
        info!(
            "{:>20}: drift = {:.3e}, {} force evaluations, {:.3} s",
            kind.name(),
            report.energy_drift,
            report.force_evaluations,
            elapsed.as_secs_f64()
        );
        reports.push(report);
    }
    Ok(reports)
}
