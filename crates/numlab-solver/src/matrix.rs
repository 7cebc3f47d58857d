//! Owned working copy of a linear system.
//!
//! Elimination never touches the caller's matrix or right-hand side: both
//! are cloned into a [`WorkingSystem`] at solver entry and every mutation
//! goes through the row primitives below.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::error::{Result, SolveError};

/// Augmented system `[A | v]` owned by a single solve call.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    row_swaps: usize,
    /// `‖A‖∞` of the input, the scale singularity is judged against
    input_norm: f64,
}

impl WorkingSystem {
    /// Copies `a` and `v` after checking that `a` is square and matches `v`.
    pub fn from_inputs(a: &DMatrix<f64>, v: &DVector<f64>) -> Result<Self> {
        SolveError::check_dimensions(a.nrows(), a.ncols(), v.len())?;
        let input_norm = a
            .row_iter()
            .map(|row| row.iter().map(|value| value.abs()).sum::<f64>())
            .fold(0.0, f64::max);
        Ok(Self {
            matrix: a.clone(),
            rhs: v.clone(),
            row_swaps: 0,
            input_norm,
        })
    }

    pub fn dimension(&self) -> usize {
        self.rhs.len()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Number of swaps that exchanged two distinct rows.
    pub fn row_swaps(&self) -> usize {
        self.row_swaps
    }

    /// Maximum absolute row sum of the matrix the system was built from.
    pub fn input_norm(&self) -> f64 {
        self.input_norm
    }

    /// Pivot magnitude at or below which a column counts as numerically zero.
    pub fn pivot_cutoff(&self, tolerance: f64) -> f64 {
        tolerance * self.dimension() as f64 * self.input_norm
    }

    pub fn entry(&self, row: usize, col: usize) -> f64 {
        self.matrix[(row, col)]
    }

    /// Row in `rows` holding the largest `|A[i, col]|`; ties keep the first.
    pub fn max_magnitude_row(&self, col: usize, rows: std::ops::Range<usize>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for i in rows {
            let magnitude = self.matrix[(i, col)].abs();
            match best {
                Some((_, current)) if magnitude <= current => {}
                _ => best = Some((i, magnitude)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Exchanges rows `i` and `j` of both the matrix and the right-hand side.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.matrix.swap_rows(i, j);
        self.rhs.swap_rows(i, j);
        self.row_swaps += 1;
    }

    /// Row-scaling primitive: divides row `row` and its right-hand side entry by `divisor`.
    pub fn divide_row(&mut self, row: usize, divisor: f64) {
        for col in 0..self.matrix.ncols() {
            self.matrix[(row, col)] /= divisor;
        }
        self.rhs[row] /= divisor;
    }

    /// `row[target] -= factor * row[source]`, right-hand side included.
    pub fn subtract_scaled_row(&mut self, target: usize, source: usize, factor: f64) {
        for col in 0..self.matrix.ncols() {
            let delta = factor * self.matrix[(source, col)];
            self.matrix[(target, col)] -= delta;
        }
        let delta = factor * self.rhs[source];
        self.rhs[target] -= delta;
    }

    /// Zeroes column `pivot` below the (already normalized) pivot row.
    ///
    /// With `parallel` the update is split by column over the rayon pool.
    /// Every entry still receives the single operation
    /// `A[i, c] -= A[i, pivot] * A[pivot, c]`, so both paths produce
    /// identical bits.
    pub fn eliminate_below(&mut self, pivot: usize, parallel: bool) {
        let n = self.dimension();
        if pivot + 1 >= n {
            return;
        }

        if !parallel {
            for i in (pivot + 1)..n {
                let mult = self.matrix[(i, pivot)];
                self.subtract_scaled_row(i, pivot, mult);
            }
            return;
        }

        let multipliers: Vec<f64> = ((pivot + 1)..n)
            .map(|i| self.matrix[(i, pivot)])
            .collect();

        // DMatrix is column-major: each chunk of `n` values is one column.
        self.matrix
            .as_mut_slice()
            .par_chunks_mut(n)
            .for_each(|column| {
                let pivot_value = column[pivot];
                for (offset, mult) in multipliers.iter().enumerate() {
                    column[pivot + 1 + offset] -= mult * pivot_value;
                }
            });

        let pivot_rhs = self.rhs[pivot];
        for (offset, mult) in multipliers.iter().enumerate() {
            self.rhs[pivot + 1 + offset] -= mult * pivot_rhs;
        }
    }

    /// True when the matrix is upper-triangular with unit diagonal within `tol`.
    pub fn is_upper_unit_triangular(&self, tol: f64) -> bool {
        let n = self.dimension();
        for i in 0..n {
            if (self.matrix[(i, i)] - 1.0).abs() > tol {
                return false;
            }
            for j in 0..i {
                if self.matrix[(i, j)].abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
