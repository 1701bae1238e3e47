//! Energy bookkeeping used to judge how well an integrator conserves the
//! invariants of a run

use super::states::System;
use super::vector::{squared_distance, squared_norm};

/// sum_i 1/2 m_i |v_i|^2
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies.iter().map(|b| 0.5 * b.m * squared_norm(b.v)).sum()
}

/// sum_{i<j} -G m_i m_j / r_ij, coincident pairs skipped
pub fn potential_energy(sys: &System) -> f64 {
    let mut pe = 0.0;
    for (i, bi) in sys.bodies.iter().enumerate() {
        for bj in &sys.bodies[i + 1..] {
            let d2 = squared_distance(bi.x, bj.x);
            if d2 == 0.0 {
                continue;
            }
            pe -= sys.g * bi.m * bj.m / d2.sqrt();
        }
    }
    pe
}

pub fn total_energy(sys: &System) -> f64 {
    kinetic_energy(sys) + potential_energy(sys)
}

/// Relative energy error |E - E0| / |E0| (absolute when E0 is zero)
pub fn relative_energy_drift(e0: f64, e: f64) -> f64 {
    if e0 != 0.0 {
        (e - e0).abs() / e0.abs()
    } else {
        (e - e0).abs()
    }
}
