use std::fs;
use std::path::Path;

use nalgebra::{DMatrix, DVector};
use numlab_solver::{LinearSystemData, PivotPolicy};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};

pub const SCHEMA_VERSION: u32 = 1;

/// On-disk form of a linear system, matrix stored row by row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemFile {
    #[serde(default = "default_schema")]
    pub schema_version: u32,
    pub matrix: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PivotPolicy>,
}

fn default_schema() -> u32 {
    SCHEMA_VERSION
}

impl SystemFile {
    pub fn from_system(system: &LinearSystemData, policy: Option<PivotPolicy>) -> Self {
        let matrix = system
            .matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        Self {
            schema_version: SCHEMA_VERSION,
            matrix,
            rhs: system.rhs.iter().copied().collect(),
            policy,
        }
    }

    /// Builds the in-memory system, rejecting ragged rows.
    ///
    /// A non-square matrix or an rhs of the wrong length surfaces as
    /// [`IoError::Solve`] carrying the solver's dimension mismatch.
    pub fn to_system(&self) -> Result<LinearSystemData> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(IoError::UnsupportedSchema {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }

        let rows = self.matrix.len();
        let cols = self.matrix.first().map_or(0, Vec::len);
        if let Some((i, row)) = self
            .matrix
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != cols)
        {
            return Err(IoError::InvalidData(format!(
                "matrix row {i} has {} entries, row 0 has {cols}",
                row.len()
            )));
        }

        let entries: Vec<f64> = self.matrix.iter().flatten().copied().collect();
        let system = LinearSystemData::new(
            DMatrix::from_row_slice(rows, cols, &entries),
            DVector::from_vec(self.rhs.clone()),
        );
        system.validate()?;
        Ok(system)
    }
}

pub fn save_system(path: impl AsRef<Path>, file: &SystemFile) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(file)?)?;
    Ok(())
}

pub fn load_system(path: impl AsRef<Path>) -> Result<SystemFile> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use numlab_solver::SolveError;

    fn classic() -> SystemFile {
        SystemFile {
            schema_version: SCHEMA_VERSION,
            matrix: vec![
                vec![2.0, 1.0, -1.0],
                vec![-3.0, -1.0, 2.0],
                vec![-2.0, 1.0, 2.0],
            ],
            rhs: vec![8.0, -11.0, -3.0],
            policy: Some(PivotPolicy::AutoPivot),
        }
    }

    #[test]
    fn rows_map_onto_matrix_rows() {
        let system = classic().to_system().unwrap();
        assert_eq!(system.matrix[(1, 0)], -3.0);
        assert_eq!(system.matrix[(0, 2)], -1.0);
        assert_eq!(system.rhs[2], -3.0);
        assert_eq!(
            SystemFile::from_system(&system, Some(PivotPolicy::AutoPivot)),
            classic()
        );
    }

    #[test]
    fn ragged_rows_are_invalid() {
        let mut file = classic();
        file.matrix[2].pop();
        let err = file.to_system().unwrap_err();
        assert!(matches!(err, IoError::InvalidData(msg) if msg.contains("row 2")));
    }

    #[test]
    fn short_rhs_is_a_dimension_mismatch() {
        let mut file = classic();
        file.rhs.pop();
        assert!(matches!(
            file.to_system(),
            Err(IoError::Solve(SolveError::DimensionMismatch {
                rows: 3,
                cols: 3,
                rhs: 2
            }))
        ));
    }

    #[test]
    fn schema_version_is_checked() {
        let mut file = classic();
        file.schema_version = 7;
        assert!(matches!(
            file.to_system(),
            Err(IoError::UnsupportedSchema {
                found: 7,
                expected: 1
            })
        ));
    }

    #[test]
    fn minimal_json_defaults_schema_and_policy() {
        let file: SystemFile =
            serde_json::from_str(r#"{"matrix":[[0,1],[1,1]],"rhs":[1,2]}"#).unwrap();
        assert_eq!(file.schema_version, SCHEMA_VERSION);
        assert_eq!(file.policy, None);
        assert_eq!(file.to_system().unwrap().dimension(), 2);
    }

    #[test]
    fn save_then_load_through_nested_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("systems").join("classic.json");
        save_system(&path, &classic()).expect("save should succeed");
        assert_eq!(load_system(&path).expect("load should succeed"), classic());
    }

    #[test]
    fn load_system_fails_for_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_system(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, IoError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn load_system_fails_for_invalid_payload() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{invalid json").expect("write invalid payload");
        assert!(matches!(load_system(&path), Err(IoError::Json(_))));
    }
}
