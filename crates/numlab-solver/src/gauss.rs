//! Gaussian elimination with selectable pivoting.
//!
//! Each step `m` runs pivot selection, normalization of row `m` by its
//! diagonal, and elimination of column `m` below the diagonal. After the last
//! step the working matrix is upper-triangular with unit diagonal and the
//! solution is recovered by back-substitution from the last row upwards.
//!
//! The caller's matrix and vector are only read; all work happens on a
//! [`WorkingSystem`] created at entry and dropped at return.

use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector};

use crate::config::SolverConfig;
use crate::error::Result;
use crate::matrix::WorkingSystem;
use crate::pivot::{PivotPolicy, select_pivot};

/// Bookkeeping from one solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliminationStats {
    pub policy: PivotPolicy,
    /// Swaps that exchanged two distinct rows
    pub row_swaps: usize,
    /// Whether row updates ran on the rayon pool
    pub parallel: bool,
}

/// Configurable Gaussian elimination solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianSolver {
    config: SolverConfig,
}

impl GaussianSolver {
    pub fn new(policy: PivotPolicy) -> Self {
        Self::with_config(SolverConfig::with_policy(policy))
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `a * x = v`.
    pub fn solve(&self, a: &DMatrix<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
        self.solve_with_stats(a, v).map(|(x, _)| x)
    }

    /// Solve `a * x = v`, also reporting how elimination went.
    pub fn solve_with_stats(
        &self,
        a: &DMatrix<f64>,
        v: &DVector<f64>,
    ) -> Result<(DVector<f64>, EliminationStats)> {
        let mut sys = WorkingSystem::from_inputs(a, v)?;
        let parallel = self.config.runs_parallel(sys.dimension());
        debug!(
            "gaussian elimination: n={}, policy={}, parallel={}",
            sys.dimension(),
            self.config.policy,
            parallel
        );

        forward_eliminate(&mut sys, &self.config)?;
        let x = back_substitute(&sys);

        let stats = EliminationStats {
            policy: self.config.policy,
            row_swaps: sys.row_swaps(),
            parallel,
        };
        Ok((x, stats))
    }
}

/// Solve `a * x = v` with the given pivot policy and default tolerances.
///
/// Under [`PivotPolicy::None`] a zero pivot is not an error: the division
/// yields NaN/Inf which propagates into the returned vector. The pivoting
/// policies return [`crate::SolveError::SingularMatrix`] instead.
pub fn solve(a: &DMatrix<f64>, v: &DVector<f64>, policy: PivotPolicy) -> Result<DVector<f64>> {
    GaussianSolver::new(policy).solve(a, v)
}

/// Plain elimination (`pivot == false`) or partial pivoting (`pivot == true`).
pub fn gauss_elim(a: &DMatrix<f64>, v: &DVector<f64>, pivot: bool) -> Result<DVector<f64>> {
    let policy = if pivot {
        PivotPolicy::PartialPivot
    } else {
        PivotPolicy::None
    };
    solve(a, v, policy)
}

pub fn partial_pivot(a: &DMatrix<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
    solve(a, v, PivotPolicy::PartialPivot)
}

pub fn auto_pivot(a: &DMatrix<f64>, v: &DVector<f64>) -> Result<DVector<f64>> {
    solve(a, v, PivotPolicy::AutoPivot)
}

/// Reduces `sys` to upper-triangular form with unit diagonal.
pub fn forward_eliminate(sys: &mut WorkingSystem, config: &SolverConfig) -> Result<()> {
    let n = sys.dimension();
    let parallel = config.runs_parallel(n);

    for m in 0..n {
        if let Some(row) = select_pivot(sys, m, config)? {
            trace!("step {m}: pivot row {row}");
            sys.swap_rows(m, row);
        }

        let div = sys.entry(m, m);
        if div == 0.0 {
            warn!(
                "step {m}: zero pivot under policy {}, result will not be finite",
                config.policy
            );
        }
        sys.divide_row(m, div);
        sys.eliminate_below(m, parallel);
    }

    Ok(())
}

/// Recovers `x` from a system already reduced by [`forward_eliminate`].
pub fn back_substitute(sys: &WorkingSystem) -> DVector<f64> {
    let n = sys.dimension();
    let a = sys.matrix();
    let v = sys.rhs();

    let mut x = DVector::zeros(n);
    for m in (0..n).rev() {
        let mut value = v[m];
        for i in (m + 1)..n {
            value -= a[(m, i)] * x[i];
        }
        x[m] = value;
    }
    x
}
