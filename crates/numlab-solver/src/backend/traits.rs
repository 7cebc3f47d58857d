//! Backend trait definitions for dense linear solvers.
//!
//! These traits abstract over the elimination routine used for a solve, so
//! the hand-written Gaussian elimination and nalgebra's LU factorization can
//! be swapped and cross-checked behind one interface.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SolveError};
use crate::pivot::PivotPolicy;

/// A dense linear system ready for solving: A * x = v.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystemData {
    /// Coefficient matrix (N x N)
    pub matrix: DMatrix<f64>,
    /// Right-hand side (length N)
    pub rhs: DVector<f64>,
}

impl LinearSystemData {
    pub fn new(matrix: DMatrix<f64>, rhs: DVector<f64>) -> Self {
        Self { matrix, rhs }
    }

    /// Number of unknowns.
    pub fn dimension(&self) -> usize {
        self.rhs.len()
    }

    /// Checks that the matrix is square and matches the right-hand side.
    pub fn validate(&self) -> Result<()> {
        SolveError::check_dimensions(self.matrix.nrows(), self.matrix.ncols(), self.rhs.len())
    }
}

/// Solver diagnostic info.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveInfo {
    /// Human-readable solver name (e.g., "gauss-partial_pivot", "nalgebra-LU")
    pub solver_name: String,
    /// Pivot policy, for the Gaussian backend
    pub pivot_policy: Option<PivotPolicy>,
    /// Row exchanges performed (if tracked)
    pub row_swaps: Option<usize>,
    /// Euclidean norm of v - A * x
    pub residual_norm: f64,
}

/// Trait for a linear solver backend.
///
/// Implementations solve A * x = v without mutating `system`.
pub trait LinearSolver: Send + Sync {
    /// Solve A * x = v and return the solution vector.
    fn solve_linear(&self, system: &LinearSystemData) -> Result<(DVector<f64>, SolveInfo)>;

    /// Human-readable name of this backend.
    fn name(&self) -> &str;
}
