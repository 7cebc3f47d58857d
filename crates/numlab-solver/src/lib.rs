//! Dense linear-system solver for numlab.
//!
//! Solves `A * x = v` by Gaussian elimination with one of three pivot
//! policies:
//!
//! - [`PivotPolicy::None`]: naive elimination, zero pivots yield NaN/Inf
//! - [`PivotPolicy::PartialPivot`]: max-magnitude row swap on every step
//! - [`PivotPolicy::AutoPivot`]: swap only when the diagonal is below 1e-16
//!
//! Inputs are never mutated. The [`backend`] module wraps the elimination
//! behind the [`LinearSolver`] trait next to a nalgebra LU reference.

pub mod backend;
pub mod config;
pub mod error;
pub mod gauss;
pub mod matrix;
pub mod pivot;
pub mod residual;

pub use backend::{
    GaussianBackend, LinearSolver, LinearSystemData, NativeBackend, SolveInfo, default_backend,
};
pub use config::{AUTO_PIVOT_THRESHOLD, SolverConfig, ZERO_PIVOT_TOLERANCE};
pub use error::{Result, SolveError};
pub use gauss::{
    EliminationStats, GaussianSolver, auto_pivot, back_substitute, forward_eliminate, gauss_elim,
    partial_pivot, solve,
};
pub use matrix::WorkingSystem;
pub use pivot::{PivotPolicy, UnknownPolicy, select_pivot};
pub use residual::{relative_residual, residual, residual_norm, verify_solution};

pub use nalgebra::{DMatrix, DVector};
