//! Structural pattern classification over both storage schemes

use numat::matrix::{ComplexMatrix, RealMatrix};
use numat::scalar::Complex64;

#[test]
fn test_identity_reports_all_facts() {
    let p = RealMatrix::identity(4).unwrap().pattern();
    assert!(p.square);
    assert!(p.diagonal);
    assert!(p.upper_triangular);
    assert!(p.lower_triangular);
    assert!(p.symmetric);
    assert!(p.hermitian);
    assert!(p.tridiagonal);
    assert!(p.upper_hessenberg);
    assert!(p.lower_hessenberg);
    assert_eq!(p.lower_bandwidth, 0);
    assert_eq!(p.upper_bandwidth, 0);
}

#[test]
fn test_strictly_upper_matrix() {
    let m = RealMatrix::from_row_major(
        3,
        3,
        &[0.0, 1.0, 2.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0],
    )
    .unwrap();
    let p = m.pattern();
    assert!(p.upper_triangular);
    assert!(p.upper_hessenberg);
    assert!(!p.diagonal);
    assert!(!p.symmetric);
    assert!(!p.lower_triangular);
}

#[test]
fn test_classification_recomputed_after_mutation() {
    let mut m = RealMatrix::diagonal(&[1.0, 2.0, 3.0]).unwrap();
    assert!(m.is_diagonal());

    m.set(2, 0, 5.0).unwrap();
    assert!(!m.is_diagonal());
    assert!(!m.is_upper_triangular());
    assert!(m.is_lower_triangular());
    assert_eq!(m.lower_bandwidth(), 2);

    m.set(2, 0, 0.0).unwrap();
    assert!(m.is_diagonal());
}

#[test]
fn test_sparse_matches_dense_classification() {
    let dense = RealMatrix::from_row_major(
        3,
        3,
        &[2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0],
    )
    .unwrap();
    let sparse = dense.to_sparse();
    assert_eq!(dense.pattern(), sparse.pattern());
    assert!(sparse.pattern().tridiagonal);
    assert!(sparse.pattern().symmetric);
}

#[test]
fn test_vector_shapes() {
    let row = RealMatrix::zeros(1, 5).unwrap().pattern();
    assert!(row.vector);
    assert!(row.row_vector);
    assert!(!row.column_vector);
    assert!(!row.square);

    let col = RealMatrix::zeros(5, 1).unwrap().pattern();
    assert!(col.vector);
    assert!(col.column_vector);

    let s = RealMatrix::scalar(1.0).pattern();
    assert!(s.scalar && s.vector && s.square);
}

#[test]
fn test_hermitian_vs_symmetric_complex() {
    let hermitian = ComplexMatrix::from_row_major(
        2,
        2,
        &[
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 3.0),
            Complex64::new(2.0, -3.0),
            Complex64::new(5.0, 0.0),
        ],
    )
    .unwrap();
    let p = hermitian.pattern();
    assert!(p.hermitian);
    assert!(!p.symmetric);

    let symmetric = ComplexMatrix::from_row_major(
        2,
        2,
        &[
            Complex64::new(0.0, 1.0),
            Complex64::new(2.0, 2.0),
            Complex64::new(2.0, 2.0),
            Complex64::new(0.0, 4.0),
        ],
    )
    .unwrap();
    let p = symmetric.pattern();
    assert!(p.symmetric);
    assert!(!p.hermitian);
}

#[test]
fn test_skew_patterns() {
    let skew = RealMatrix::from_row_major(
        3,
        3,
        &[0.0, 1.0, -2.0, -1.0, 0.0, 3.0, 2.0, -3.0, 0.0],
    )
    .unwrap();
    assert!(skew.is_skew_symmetric());
    assert!(!skew.is_symmetric());

    // Purely imaginary diagonal makes a skew-Hermitian complex matrix
    let sh = ComplexMatrix::from_row_major(
        2,
        2,
        &[
            Complex64::new(0.0, 1.0),
            Complex64::new(1.0, 1.0),
            Complex64::new(-1.0, 1.0),
            Complex64::new(0.0, -2.0),
        ],
    )
    .unwrap();
    assert!(sh.is_skew_hermitian());
    assert!(!sh.is_hermitian());
}

#[test]
fn test_bidiagonal_facts() {
    let upper = RealMatrix::from_row_major(
        3,
        3,
        &[1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0],
    )
    .unwrap();
    let p = upper.pattern();
    assert!(p.upper_bidiagonal);
    assert!(!p.lower_bidiagonal);
    assert!(p.upper_triangular);
    assert!(p.tridiagonal);
    assert_eq!(p.upper_bandwidth, 1);
}
