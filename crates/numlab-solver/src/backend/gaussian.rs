//! Gaussian elimination backend.

use log::info;
use nalgebra::DVector;

use super::traits::*;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::gauss::GaussianSolver;
use crate::pivot::PivotPolicy;
use crate::residual::residual_norm;

/// Backend running this crate's elimination with a fixed configuration.
#[derive(Debug, Clone)]
pub struct GaussianBackend {
    solver: GaussianSolver,
    name: String,
}

impl GaussianBackend {
    pub fn new(policy: PivotPolicy) -> Self {
        Self::with_config(SolverConfig::with_policy(policy))
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            solver: GaussianSolver::with_config(config),
            name: format!("gauss-{}", config.policy),
        }
    }

    pub fn policy(&self) -> PivotPolicy {
        self.solver.config().policy
    }
}

impl Default for GaussianBackend {
    fn default() -> Self {
        Self::with_config(SolverConfig::default())
    }
}

impl LinearSolver for GaussianBackend {
    fn solve_linear(&self, system: &LinearSystemData) -> Result<(DVector<f64>, SolveInfo)> {
        let (x, stats) = self.solver.solve_with_stats(&system.matrix, &system.rhs)?;
        let residual_norm = residual_norm(&system.matrix, &x, &system.rhs)?;
        info!(
            "{}: n={}, row_swaps={}, residual={:.3e}",
            self.name,
            system.dimension(),
            stats.row_swaps,
            residual_norm
        );

        Ok((
            x,
            SolveInfo {
                solver_name: self.name.clone(),
                pivot_policy: Some(stats.policy),
                row_swaps: Some(stats.row_swaps),
                residual_norm,
            },
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
