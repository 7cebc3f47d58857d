//! Pivot selection strategies.
//!
//! Two pivoting strategies coexist with different trigger conditions:
//!
//! - [`PivotPolicy::PartialPivot`] swaps on every step, bringing the
//!   largest-magnitude entry of rows `m..n` onto the diagonal even when row
//!   `m` already holds it.
//! - [`PivotPolicy::AutoPivot`] only swaps when `|A[m, m]|` falls below the
//!   auto-pivot threshold, and then searches rows `m + 1..n`. A small but
//!   non-negligible diagonal is used as is, and is also kept when no row
//!   below offers a usable pivot.
//!
//! Both pivoting policies judge a pivot against the scale of the input:
//! a column is singular when its best candidate is at or below
//! [`WorkingSystem::pivot_cutoff`]. The auto-pivot trigger stays absolute.
//!
//! [`PivotPolicy::None`] is plain Gaussian elimination: a zero diagonal is
//! divided through and the resulting NaN/Inf values reach the solution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::{Result, SolveError};
use crate::matrix::WorkingSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotPolicy {
    /// No row exchanges
    None,
    /// Unconditional max-magnitude row swap on every step
    #[default]
    PartialPivot,
    /// Max-magnitude swap only when the diagonal is below the threshold
    AutoPivot,
}

impl PivotPolicy {
    pub const ALL: [PivotPolicy; 3] = [
        PivotPolicy::None,
        PivotPolicy::PartialPivot,
        PivotPolicy::AutoPivot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PivotPolicy::None => "none",
            PivotPolicy::PartialPivot => "partial_pivot",
            PivotPolicy::AutoPivot => "auto_pivot",
        }
    }
}

impl fmt::Display for PivotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown pivot policy '{}' (expected none, partial or auto)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for PivotPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "gauss" => Ok(PivotPolicy::None),
            "partial" | "partial_pivot" | "partial-pivot" => Ok(PivotPolicy::PartialPivot),
            "auto" | "auto_pivot" | "auto-pivot" => Ok(PivotPolicy::AutoPivot),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Chooses the row to swap into position `m`, or `None` to keep row `m`.
///
/// Returns `Some(m)` for the no-op swap of [`PivotPolicy::PartialPivot`].
pub fn select_pivot(
    sys: &WorkingSystem,
    m: usize,
    config: &SolverConfig,
) -> Result<Option<usize>> {
    match config.policy {
        PivotPolicy::None => Ok(None),
        PivotPolicy::PartialPivot => {
            partial_pivot_row(sys, m, config.zero_pivot_tolerance).map(Some)
        }
        PivotPolicy::AutoPivot => auto_pivot_row(
            sys,
            m,
            config.auto_pivot_threshold,
            config.zero_pivot_tolerance,
        ),
    }
}

fn partial_pivot_row(sys: &WorkingSystem, m: usize, tolerance: f64) -> Result<usize> {
    let n = sys.dimension();
    let row = sys
        .max_magnitude_row(m, m..n)
        .ok_or(SolveError::SingularMatrix { column: m })?;
    usable(sys, row, m, tolerance)
}

fn auto_pivot_row(
    sys: &WorkingSystem,
    m: usize,
    threshold: f64,
    tolerance: f64,
) -> Result<Option<usize>> {
    if sys.entry(m, m).abs() >= threshold {
        return usable(sys, m, m, tolerance).map(|_| None);
    }
    let n = sys.dimension();
    let below = sys
        .max_magnitude_row(m, (m + 1)..n)
        .and_then(|row| usable(sys, row, m, tolerance).ok());
    match below {
        Some(row) => Ok(Some(row)),
        None => usable(sys, m, m, tolerance).map(|_| None),
    }
}

fn usable(sys: &WorkingSystem, row: usize, column: usize, tolerance: f64) -> Result<usize> {
    let magnitude = sys.entry(row, column).abs();
    // NaN compares false against the cutoff and must not pass as a pivot.
    if magnitude > sys.pivot_cutoff(tolerance) {
        Ok(row)
    } else {
        Err(SolveError::SingularMatrix { column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, DVector};

    fn system(rows: usize, entries: &[f64]) -> WorkingSystem {
        let a = DMatrix::from_row_slice(rows, rows, entries);
        WorkingSystem::from_inputs(&a, &DVector::zeros(rows)).unwrap()
    }

    #[test]
    fn no_pivot_never_moves_rows() {
        let sys = system(2, &[0.0, 1.0, 1.0, 1.0]);
        let config = SolverConfig::with_policy(PivotPolicy::None);
        assert_eq!(select_pivot(&sys, 0, &config), Ok(None));
    }

    #[test]
    fn partial_pivot_swaps_even_when_diagonal_is_largest() {
        let sys = system(2, &[5.0, 1.0, 1.0, 1.0]);
        let config = SolverConfig::with_policy(PivotPolicy::PartialPivot);
        assert_eq!(select_pivot(&sys, 0, &config), Ok(Some(0)));
    }

    #[test]
    fn partial_pivot_picks_largest_magnitude() {
        let sys = system(3, &[1.0, 0.0, 0.0, -7.0, 1.0, 0.0, 3.0, 0.0, 1.0]);
        let config = SolverConfig::with_policy(PivotPolicy::PartialPivot);
        assert_eq!(select_pivot(&sys, 0, &config), Ok(Some(1)));
    }

    #[test]
    fn auto_pivot_keeps_small_but_nonzero_diagonal() {
        let sys = system(2, &[1.0e-10, 1.0, 1.0, 1.0]);
        let config = SolverConfig::with_policy(PivotPolicy::AutoPivot);
        assert_eq!(select_pivot(&sys, 0, &config), Ok(None));

        let partial = SolverConfig::with_policy(PivotPolicy::PartialPivot);
        assert_eq!(select_pivot(&sys, 0, &partial), Ok(Some(1)));
    }

    #[test]
    fn auto_pivot_swaps_on_zero_diagonal() {
        let sys = system(3, &[0.0, 1.0, 0.0, 2.0, 1.0, 0.0, -3.0, 0.0, 1.0]);
        let config = SolverConfig::with_policy(PivotPolicy::AutoPivot);
        assert_eq!(select_pivot(&sys, 0, &config), Ok(Some(2)));
    }

    #[test]
    fn auto_pivot_uses_magnitude_not_sign() {
        let sys = system(2, &[-2.0, 1.0, 1.0, 1.0]);
        let config = SolverConfig::with_policy(PivotPolicy::AutoPivot);
        assert_eq!(select_pivot(&sys, 0, &config), Ok(None));
    }

    #[test]
    fn zero_column_is_singular_for_pivoting_policies() {
        let sys = system(2, &[0.0, 1.0, 0.0, 2.0]);
        for policy in [PivotPolicy::PartialPivot, PivotPolicy::AutoPivot] {
            let config = SolverConfig::with_policy(policy);
            assert_eq!(
                select_pivot(&sys, 0, &config),
                Err(SolveError::SingularMatrix { column: 0 })
            );
        }
    }

    #[test]
    fn auto_pivot_on_last_row_has_no_candidates() {
        let sys = system(2, &[1.0, 1.0, 0.0, 0.0]);
        let config = SolverConfig::with_policy(PivotPolicy::AutoPivot);
        assert_eq!(
            select_pivot(&sys, 1, &config),
            Err(SolveError::SingularMatrix { column: 1 })
        );
    }

    #[test]
    fn uniformly_tiny_column_is_not_singular() {
        let sys = system(2, &[1.0e-17, 0.0, 0.0, 1.0e-17]);
        let partial = SolverConfig::with_policy(PivotPolicy::PartialPivot);
        assert_eq!(select_pivot(&sys, 0, &partial), Ok(Some(0)));

        // below the trigger, but nothing underneath beats the diagonal
        let auto = SolverConfig::with_policy(PivotPolicy::AutoPivot);
        assert_eq!(select_pivot(&sys, 0, &auto), Ok(None));
    }

    #[test]
    fn rounding_residue_is_singular_relative_to_matrix_scale() {
        // 1e-15 would pass an absolute 1e-16 cutoff, but not one scaled by ‖A‖∞ = 1e3
        let sys = system(2, &[1.0e3, 0.0, 0.0, 1.0e-15]);
        for policy in [PivotPolicy::PartialPivot, PivotPolicy::AutoPivot] {
            let config = SolverConfig::with_policy(policy);
            assert_eq!(
                select_pivot(&sys, 1, &config),
                Err(SolveError::SingularMatrix { column: 1 })
            );
        }
    }

    #[test]
    fn policies_parse_from_cli_spellings() {
        assert_eq!("none".parse::<PivotPolicy>(), Ok(PivotPolicy::None));
        assert_eq!(
            "Partial".parse::<PivotPolicy>(),
            Ok(PivotPolicy::PartialPivot)
        );
        assert_eq!(
            "auto-pivot".parse::<PivotPolicy>(),
            Ok(PivotPolicy::AutoPivot)
        );
        assert_eq!(
            "full".parse::<PivotPolicy>(),
            Err(UnknownPolicy("full".to_string()))
        );
        for policy in PivotPolicy::ALL {
            assert_eq!(policy.as_str().parse::<PivotPolicy>(), Ok(policy));
        }
    }
}
