//! Native backend using nalgebra's LU decomposition.
//!
//! Serves as a reference implementation for the Gaussian backend: same
//! interface, independent elimination code.

use log::debug;
use nalgebra::DVector;

use super::traits::*;
use crate::error::{Result, SolveError};
use crate::residual::residual_norm;

/// Dense solver backend delegating to `nalgebra::linalg::LU`.
pub struct NativeBackend;

impl LinearSolver for NativeBackend {
    fn solve_linear(&self, system: &LinearSystemData) -> Result<(DVector<f64>, SolveInfo)> {
        system.validate()?;
        debug!("nalgebra LU solve: n={}", system.dimension());

        let lu = system.matrix.clone().lu();
        let x = match lu.solve(&system.rhs) {
            Some(x) => x,
            None => {
                let u = lu.u();
                let column = (0..u.nrows()).find(|&i| u[(i, i)] == 0.0).unwrap_or(0);
                return Err(SolveError::SingularMatrix { column });
            }
        };

        let residual_norm = residual_norm(&system.matrix, &x, &system.rhs)?;
        Ok((
            x,
            SolveInfo {
                solver_name: "nalgebra-LU".to_string(),
                pivot_policy: None,
                row_swaps: None,
                residual_norm,
            },
        ))
    }

    fn name(&self) -> &str {
        "native-nalgebra"
    }
}
