//! Numerical calculus routines for numlab.
//!
//! - **Differentiation**: forward and central finite differences, plus a
//!   step-size sweep exposing the truncation/rounding trade-off
//! - **Quadrature**: composite trapezoidal and Simpson rules
//! - **Statistics**: one-pass vs two-pass sample standard deviation

pub mod differentiation;
pub mod quadrature;
pub mod statistics;

pub use differentiation::{SweepPoint, central_difference, forward_difference, step_sweep};
pub use quadrature::{QuadratureError, simpsons, trapezoidal};
pub use statistics::{StatsError, one_pass_std, relative_error, two_pass_std};
