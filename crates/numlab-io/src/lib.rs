//! I/O support for numlab.
//!
//! This crate provides:
//! - **System files**: JSON description of `A * x = v`, with an optional
//!   pivot policy
//! - **Solve reports**: JSON record of a solution and its diagnostics

pub mod error;
mod report;
mod system_file;

pub use error::{IoError, Result};
pub use report::{SolveReport, load_report, write_report};
pub use system_file::{SCHEMA_VERSION, SystemFile, load_system, save_system};
