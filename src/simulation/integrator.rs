//! Fixed-step time integrators
//!
//! Every scheme advances the free bodies of a `System` by one step `dt` in
//! place, driven by an `AccelSet`. Fixed bodies keep their position and
//! velocity but still act as sources; `IntegratorKind::step` also carries
//! prescribed bodies along their circular path. All new states are computed from the
//! pre-step state before anything is written back.
//!
//! - `semi_implicit_euler` : half kick, drift, half kick with the same acceleration
//! - `rk4`                 : classical RK4 on (position, velocity)
//! - `rk4_velocity`        : RK4 on velocity, explicit Euler on position
//! - `mutual_two_body`     : `semi_implicit_euler` with the tracked object pulling back

use super::forces::{AccelSet, Coupling};
use super::params::IntegratorKind;
use super::states::{NVec2, System};

/// What one step used, for the trajectory record and diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct StepStats {
    pub accels: Vec<NVec2>, // acceleration applied to each body, zero for fixed ones
    pub degenerate_pairs: usize,
    pub force_evaluations: usize,
}

impl IntegratorKind {
    /// Which bodies are gravity sources under this scheme
    pub fn coupling(&self, sys: &System) -> Coupling {
        match self {
            IntegratorKind::MutualTwoBody => Coupling::Mutual,
            _ => Coupling::Restricted { passive: sys.tracked },
        }
    }

    /// Advance `sys` by `dt` with this scheme. Bodies on a prescribed path
    /// are moved to their end-of-step position first, so every stage sees them there
    pub fn step(&self, sys: &mut System, forces: &AccelSet, dt: f64) -> StepStats {
        for b in sys.bodies.iter_mut() {
            b.advance_prescribed(dt);
        }
        match self {
            IntegratorKind::SemiImplicitEuler => semi_implicit_euler(sys, forces, dt),
            IntegratorKind::Rk4 => rk4(sys, forces, dt),
            IntegratorKind::Rk4Velocity => rk4_velocity(sys, forces, dt),
            IntegratorKind::MutualTwoBody => mutual_two_body(sys, forces, dt),
        }
    }
}

/// Accelerations at `positions`, zeroed for fixed bodies
pub(crate) fn accelerations_at(sys: &System, forces: &AccelSet, coupling: Coupling, positions: &[NVec2], degenerate: &mut usize) -> Vec<NVec2> {
    let mut out = vec![NVec2::zeros(); sys.bodies.len()];
    *degenerate += forces.accumulate_accels(sys, positions, coupling, &mut out);
    for (a, b) in out.iter_mut().zip(sys.bodies.iter()) {
        if b.fixed {
            *a = NVec2::zeros();
        }
    }
    out
}

/// base[i] + h * dir[i] for free bodies, base[i] for fixed ones
fn offset(sys: &System, base: &[NVec2], dir: &[NVec2], h: f64) -> Vec<NVec2> {
    sys.bodies
        .iter()
        .zip(base.iter().zip(dir.iter()))
        .map(|(b, (x, d))| if b.fixed { *x } else { *x + h * *d })
        .collect()
}

fn positions(sys: &System) -> Vec<NVec2> {
    sys.bodies.iter().map(|b| b.x).collect()
}

fn velocities(sys: &System) -> Vec<NVec2> {
    sys.bodies.iter().map(|b| b.v).collect()
}

/// One kick-drift-kick step with a single force evaluation:
///   v_half = v + dt/2 a(x)
///   x'     = x + dt v_half
///   v'     = v_half + dt/2 a(x)
/// The second half kick reuses a(x) rather than a(x'), so this is not
/// velocity Verlet; it is first order in velocity
fn kick_drift_kick(sys: &mut System, forces: &AccelSet, coupling: Coupling, dt: f64) -> StepStats {
    let half_dt = 0.5 * dt;
    let mut degenerate = 0;
    let x0 = positions(sys);
    let a = accelerations_at(sys, forces, coupling, &x0, &mut degenerate);

    for (b, a) in sys.bodies.iter_mut().zip(a.iter()) {
        if b.fixed {
            continue;
        }
        let v_half = b.v + half_dt * *a; // kick
        b.x += dt * v_half; // drift
        b.v = v_half + half_dt * *a; // kick
    }
    sys.t += dt;

    StepStats {
        accels: a,
        degenerate_pairs: degenerate,
        force_evaluations: 1,
    }
}

/// Kick-drift-kick in the restricted problem: the tracked object feels every
/// body but pulls on none of them
pub fn semi_implicit_euler(sys: &mut System, forces: &AccelSet, dt: f64) -> StepStats {
    let coupling = IntegratorKind::SemiImplicitEuler.coupling(sys);
    kick_drift_kick(sys, forces, coupling, dt)
}

/// Kick-drift-kick where the tracked object also pulls on the other free
/// bodies (e.g. a moon). Both sides see forces from pre-step positions;
/// there is no extra substep for the coupling
pub fn mutual_two_body(sys: &mut System, forces: &AccelSet, dt: f64) -> StepStats {
    let coupling = IntegratorKind::MutualTwoBody.coupling(sys);
    kick_drift_kick(sys, forces, coupling, dt)
}

/// Classical fourth-order Runge-Kutta on the combined state y = (x, v),
/// dy/dt = (v, a(x))
pub fn rk4(sys: &mut System, forces: &AccelSet, dt: f64) -> StepStats {
    let coupling = IntegratorKind::Rk4.coupling(sys);
    let half_dt = 0.5 * dt;
    let mut degenerate = 0;

    let x0 = positions(sys);
    let v0 = velocities(sys);

    // stage 1
    let a1 = accelerations_at(sys, forces, coupling, &x0, &mut degenerate);
    // stage 2, at the midpoint predicted by stage 1
    let x2 = offset(sys, &x0, &v0, half_dt);
    let v2 = offset(sys, &v0, &a1, half_dt);
    let a2 = accelerations_at(sys, forces, coupling, &x2, &mut degenerate);
    // stage 3, at the midpoint predicted by stage 2
    let x3 = offset(sys, &x0, &v2, half_dt);
    let v3 = offset(sys, &v0, &a2, half_dt);
    let a3 = accelerations_at(sys, forces, coupling, &x3, &mut degenerate);
    // stage 4, at the end point predicted by stage 3
    let x4 = offset(sys, &x0, &v3, dt);
    let v4 = offset(sys, &v0, &a3, dt);
    let a4 = accelerations_at(sys, forces, coupling, &x4, &mut degenerate);

    let mut applied = vec![NVec2::zeros(); sys.bodies.len()];
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        if b.fixed {
            continue;
        }
        let v_avg = (v0[i] + 2.0 * v2[i] + 2.0 * v3[i] + v4[i]) / 6.0;
        let a_avg = (a1[i] + 2.0 * a2[i] + 2.0 * a3[i] + a4[i]) / 6.0;
        b.x = x0[i] + dt * v_avg;
        b.v = v0[i] + dt * a_avg;
        applied[i] = a_avg;
    }
    sys.t += dt;

    StepStats {
        accels: applied,
        degenerate_pairs: degenerate,
        force_evaluations: 4,
    }
}

/// Runge-Kutta on the velocity equation only, followed by an explicit Euler
/// position update with the new velocity:
///   k1 = dt a(x)
///   k2 = dt a(x + dt/2 v)
///   k3 = dt a(x + dt/2 (v + k1/2))
///   k4 = dt a(x + dt (v + k2/2))
///   v' = v + (k1 + 2 k2 + 2 k3 + k4) / 6
///   x' = x + dt v'
/// The velocity matches `rk4`; the position update is first order
pub fn rk4_velocity(sys: &mut System, forces: &AccelSet, dt: f64) -> StepStats {
    let coupling = IntegratorKind::Rk4Velocity.coupling(sys);
    let half_dt = 0.5 * dt;
    let mut degenerate = 0;

    let x0 = positions(sys);
    let v0 = velocities(sys);

    let k1: Vec<NVec2> = accelerations_at(sys, forces, coupling, &x0, &mut degenerate).into_iter().map(|a| dt * a).collect();

    let x2 = offset(sys, &x0, &v0, half_dt);
    let k2: Vec<NVec2> = accelerations_at(sys, forces, coupling, &x2, &mut degenerate).into_iter().map(|a| dt * a).collect();

    let v_k1 = offset(sys, &v0, &k1, 0.5);
    let x3 = offset(sys, &x0, &v_k1, half_dt);
    let k3: Vec<NVec2> = accelerations_at(sys, forces, coupling, &x3, &mut degenerate).into_iter().map(|a| dt * a).collect();

    let v_k2 = offset(sys, &v0, &k2, 0.5);
    let x4 = offset(sys, &x0, &v_k2, dt);
    let k4: Vec<NVec2> = accelerations_at(sys, forces, coupling, &x4, &mut degenerate).into_iter().map(|a| dt * a).collect();

    let mut applied = vec![NVec2::zeros(); sys.bodies.len()];
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        if b.fixed {
            continue;
        }
        let dv = (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
        b.v = v0[i] + dv;
        b.x = x0[i] + dt * b.v;
        applied[i] = dv / dt;
    }
    sys.t += dt;

    StepStats {
        accels: applied,
        degenerate_pairs: degenerate,
        force_evaluations: 4,
    }
}
