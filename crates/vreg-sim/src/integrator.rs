//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Forward Euler (explicit, 1st order). One rhs() call per step.
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = -x, exact solution x(t) = exp(-t).
    struct Decay;

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    fn integrate<I: Integrator>(integrator: I, steps: usize, dt: f64) -> f64 {
        let mut model = Decay;
        let mut x = model.initial_state();
        for i in 0..steps {
            x = integrator.step(&mut model, i as f64 * dt, &x, dt).unwrap();
        }
        x
    }

    #[test]
    fn forward_euler_single_step() {
        let x = integrate(ForwardEuler, 1, 0.1);
        assert!((x - 0.9).abs() < 1e-15);
    }

    #[test]
    fn rk4_is_more_accurate_than_euler() {
        let exact = (-1.0f64).exp();
        let euler = integrate(ForwardEuler, 10, 0.1);
        let rk4 = integrate(RK4, 10, 0.1);
        assert!((rk4 - exact).abs() < 1e-6);
        assert!((rk4 - exact).abs() < (euler - exact).abs());
    }
}
