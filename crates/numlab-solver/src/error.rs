//! Error types for numlab-solver

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The matrix is not square, or its size disagrees with the right-hand side.
    #[error("dimension mismatch: matrix is {rows}x{cols}, right-hand side has {rhs} entries")]
    DimensionMismatch { rows: usize, cols: usize, rhs: usize },

    /// No candidate row in `column` has a usable (non-zero) pivot.
    #[error("singular matrix: no usable pivot in column {column}")]
    SingularMatrix { column: usize },
}

impl SolveError {
    /// Checks that `a` is square and matches a right-hand side of length `rhs`.
    pub fn check_dimensions(rows: usize, cols: usize, rhs: usize) -> Result<()> {
        if rows != cols || rows != rhs {
            return Err(SolveError::DimensionMismatch { rows, cols, rhs });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_matching_dimensions_pass() {
        assert!(SolveError::check_dimensions(3, 3, 3).is_ok());
        assert!(SolveError::check_dimensions(0, 0, 0).is_ok());
    }

    #[test]
    fn non_square_or_short_rhs_fail() {
        assert_eq!(
            SolveError::check_dimensions(3, 2, 3),
            Err(SolveError::DimensionMismatch {
                rows: 3,
                cols: 2,
                rhs: 3
            })
        );
        assert!(SolveError::check_dimensions(3, 3, 2).is_err());
    }

    #[test]
    fn messages_name_the_offending_sizes() {
        let err = SolveError::DimensionMismatch {
            rows: 3,
            cols: 3,
            rhs: 2,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: matrix is 3x3, right-hand side has 2 entries"
        );
        let err = SolveError::SingularMatrix { column: 1 };
        assert_eq!(err.to_string(), "singular matrix: no usable pivot in column 1");
    }
}
