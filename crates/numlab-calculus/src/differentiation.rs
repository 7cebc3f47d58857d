//! Finite-difference derivatives.
//!
//! The forward scheme has O(h) truncation error, the central scheme O(h^2).
//! Both lose digits to rounding as `h` shrinks, so the error curve over `h`
//! has a minimum; [`step_sweep`] tabulates it.

use serde::Serialize;

use crate::statistics::relative_error;

/// `(f(x + h) - f(x)) / h`
pub fn forward_difference<F: Fn(f64) -> f64>(f: F, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x)) / h
}

/// `(f(x + h/2) - f(x - h/2)) / h`
pub fn central_difference<F: Fn(f64) -> f64>(f: F, x: f64, h: f64) -> f64 {
    (f(x + h / 2.0) - f(x - h / 2.0)) / h
}

/// One row of a step-size sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub step: f64,
    pub forward: f64,
    pub central: f64,
    pub forward_error: f64,
    pub central_error: f64,
}

/// Evaluates both schemes at `h = 10^0, 10^-1, ..., 10^-(decades-1)`.
///
/// Errors are relative to `exact`.
pub fn step_sweep<F: Fn(f64) -> f64>(
    f: F,
    x: f64,
    exact: f64,
    decades: u16,
) -> Vec<SweepPoint> {
    (0..decades)
        .map(|i| {
            let step = 10f64.powi(-i32::from(i));
            let forward = forward_difference(&f, x, step);
            let central = central_difference(&f, x, step);
            SweepPoint {
                step,
                forward,
                central,
                forward_error: relative_error(exact, forward),
                central_error: relative_error(exact, central),
            }
        })
        .collect()
}
