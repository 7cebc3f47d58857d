//! Residual checks for computed solutions.
//!
//! - `r = v - A * x`
//! - relative residual `||r|| / ||v||`, or `||r||` when `v` is zero

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SolveError};

/// Computes `v - a * x`.
pub fn residual(a: &DMatrix<f64>, x: &DVector<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
    SolveError::check_dimensions(a.nrows(), a.ncols(), v.len())?;
    if x.len() != a.ncols() {
        return Err(SolveError::DimensionMismatch {
            rows: a.nrows(),
            cols: a.ncols(),
            rhs: x.len(),
        });
    }
    Ok(v - a * x)
}

pub fn residual_norm(a: &DMatrix<f64>, x: &DVector<f64>, v: &DVector<f64>) -> Result<f64> {
    residual(a, x, v).map(|r| r.norm())
}

pub fn relative_residual(a: &DMatrix<f64>, x: &DVector<f64>, v: &DVector<f64>) -> Result<f64> {
    let r = residual_norm(a, x, v)?;
    let scale = v.norm();
    Ok(if scale == 0.0 { r } else { r / scale })
}

/// True when `x` solves `a * x = v` to relative residual `tol`.
///
/// Non-finite solutions never verify.
pub fn verify_solution(a: &DMatrix<f64>, x: &DVector<f64>, v: &DVector<f64>, tol: f64) -> bool {
    match relative_residual(a, x, v) {
        Ok(rel) => rel.is_finite() && rel <= tol,
        Err(_) => false,
    }
}
