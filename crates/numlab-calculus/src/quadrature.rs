//! Composite Newton-Cotes quadrature over `n` equal slices of `[a, b]`.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureError {
    #[error("at least one slice is required")]
    ZeroSlices,

    #[error("Simpson's rule needs an even number of slices, got {0}")]
    OddSlices(usize),
}

/// Composite trapezoidal rule.
pub fn trapezoidal<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<f64, QuadratureError> {
    if n == 0 {
        return Err(QuadratureError::ZeroSlices);
    }
    let h = (b - a) / n as f64;
    let mut s = 0.5 * (f(a) + f(b));
    for i in 1..n {
        s += f(a + i as f64 * h);
    }
    Ok(h * s)
}

/// Composite Simpson's rule; `n` must be even.
pub fn simpsons<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    n: usize,
) -> Result<f64, QuadratureError> {
    if n == 0 {
        return Err(QuadratureError::ZeroSlices);
    }
    if n % 2 != 0 {
        return Err(QuadratureError::OddSlices(n));
    }
    let h = (b - a) / n as f64;
    let mut s = f(a) + f(b);
    for i in (1..n).step_by(2) {
        s += 4.0 * f(a + i as f64 * h);
    }
    for j in (2..n - 1).step_by(2) {
        s += 2.0 * f(a + j as f64 * h);
    }
    Ok(h * s / 3.0)
}
