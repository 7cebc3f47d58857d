//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::pivot::PivotPolicy;

/// Diagonal magnitude below which [`PivotPolicy::AutoPivot`] swaps rows.
pub const AUTO_PIVOT_THRESHOLD: f64 = 1.0e-16;

/// Relative singularity cutoff: a pivoting policy reports a singular matrix
/// when no candidate exceeds `ZERO_PIVOT_TOLERANCE * n * ‖A‖∞`.
pub const ZERO_PIVOT_TOLERANCE: f64 = f64::EPSILON;

/// Matrix size from which row updates are spread over the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Gaussian elimination configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pivot selection strategy
    pub policy: PivotPolicy,
    /// Trigger for the threshold-gated auto pivot
    pub auto_pivot_threshold: f64,
    /// Singularity cutoff for the pivoting policies, relative to `n * ‖A‖∞`
    pub zero_pivot_tolerance: f64,
    /// Minimum system size for parallel elimination (`usize::MAX` disables it)
    pub parallel_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            policy: PivotPolicy::PartialPivot,
            auto_pivot_threshold: AUTO_PIVOT_THRESHOLD,
            zero_pivot_tolerance: ZERO_PIVOT_TOLERANCE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SolverConfig {
    pub fn with_policy(policy: PivotPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub(crate) fn runs_parallel(&self, n: usize) -> bool {
        n >= self.parallel_threshold
    }
}
