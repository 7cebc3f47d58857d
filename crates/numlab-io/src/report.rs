use std::fs;
use std::path::Path;

use numlab_solver::{PivotPolicy, SolveInfo};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// JSON record of one solve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolveReport {
    pub solver: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PivotPolicy>,
    pub solution: Vec<f64>,
    pub residual_norm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_swaps: Option<usize>,
    /// RFC 3339 timestamp supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl SolveReport {
    pub fn new(solution: &[f64], info: &SolveInfo) -> Self {
        Self {
            solver: info.solver_name.clone(),
            policy: info.pivot_policy,
            solution: solution.to_vec(),
            residual_norm: info.residual_norm,
            row_swaps: info.row_swaps,
            generated_at: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }
}

pub fn write_report(path: impl AsRef<Path>, report: &SolveReport) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}

pub fn load_report(path: impl AsRef<Path>) -> Result<SolveReport> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
