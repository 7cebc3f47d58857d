//! End-to-end: system file on disk -> solver backend -> report on disk.

use numlab_io::{IoError, SolveReport, SystemFile, load_report, load_system, save_system, write_report};
use numlab_solver::{GaussianBackend, LinearSolver, PivotPolicy, SolveError};

#[test]
fn pivot_requiring_system_round_trips_through_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let system_path = dir.path().join("zero_diag.json");
    std::fs::write(
        &system_path,
        r#"{ "matrix": [[0, 1], [1, 1]], "rhs": [1, 2], "policy": "partial_pivot" }"#,
    )
    .expect("write system file");

    let file = load_system(&system_path).expect("load system");
    let system = file.to_system().expect("well-formed system");
    let policy = file.policy.unwrap_or_default();
    let (x, info) = GaussianBackend::new(policy)
        .solve_linear(&system)
        .expect("partial pivoting solves zero diagonal");
    assert!((x[0] - 1.0).abs() < 1e-12);
    assert!((x[1] - 1.0).abs() < 1e-12);

    let report_path = dir.path().join("reports").join("zero_diag.json");
    let report = SolveReport::new(x.as_slice(), &info);
    write_report(&report_path, &report).expect("write report");
    let loaded = load_report(&report_path).expect("load report");
    assert_eq!(loaded.policy, Some(PivotPolicy::PartialPivot));
    assert_eq!(loaded.row_swaps, Some(1));
}

#[test]
fn non_square_file_surfaces_dimension_mismatch() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("wide.json");
    let file = SystemFile {
        schema_version: numlab_io::SCHEMA_VERSION,
        matrix: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        rhs: vec![1.0, 2.0],
        policy: None,
    };
    save_system(&path, &file).expect("save system");

    let err = load_system(&path)
        .expect("load system")
        .to_system()
        .expect_err("2x3 matrix cannot be solved");
    assert!(
        matches!(
            err,
            IoError::Solve(SolveError::DimensionMismatch {
                rows: 2,
                cols: 3,
                rhs: 2
            })
        ),
        "unexpected error: {err}"
    );
}
