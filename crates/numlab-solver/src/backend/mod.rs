//! Linear solver backend abstraction layer.
//!
//! This module provides a trait-based interface for dense linear solvers,
//! so callers can pick the elimination routine at runtime.
//!
//! # Backends
//!
//! - **Gaussian** (default): this crate's elimination with a selectable
//!   pivot policy.
//! - **Native**: nalgebra's LU decomposition, used as a reference.
//!
//! ```text
//! Caller (builds A and v)
//!         │
//!         ▼
//! LinearSystemData
//!         │
//!         ▼
//! Backend Trait Layer (LinearSolver)
//!    ┌────┴────┐
//!    ▼         ▼
//! Gaussian  Native
//! Backend   Backend
//! ```

pub mod gaussian;
pub mod native;
pub mod traits;

pub use gaussian::GaussianBackend;
pub use native::NativeBackend;
pub use traits::*;

/// Returns the default solver backend: Gaussian elimination with partial pivoting.
pub fn default_backend() -> Box<dyn LinearSolver> {
    Box::new(GaussianBackend::default())
}
