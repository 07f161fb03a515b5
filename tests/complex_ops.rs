//! Complex-domain operators and the real/complex operator pairings

use numat::matrix::{ComplexMatrix, RealMatrix};
use numat::scalar::Complex64;
use numat::solve::solve;

fn assert_allclose_c(a: &ComplexMatrix, b: &ComplexMatrix, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for r in 0..a.nrows() {
        for c in 0..a.ncols() {
            let d = a.get(r, c).unwrap() - b.get(r, c).unwrap();
            assert!(d.modulus() <= tol, "mismatch at ({r}, {c})");
        }
    }
}

#[test]
fn test_complex_scalar_algebra() {
    let z = Complex64::new(3.0, 4.0);
    assert_eq!(z.modulus(), 5.0);
    assert_eq!(z.conj(), Complex64::new(3.0, -4.0));
    assert!((z * z.recip() - Complex64::new(1.0, 0.0)).modulus() < 1e-15);
    assert_eq!(Complex64::I * Complex64::I, Complex64::new(-1.0, 0.0));

    // Principal square root of -1 is i
    let s = Complex64::new(-1.0, 0.0).sqrt();
    assert!((s - Complex64::I).modulus() < 1e-15);
}

#[test]
fn test_conjugate_transpose_involution() {
    let z = ComplexMatrix::from_row_major(
        2,
        3,
        &[
            Complex64::new(1.0, 1.0),
            Complex64::new(0.0, 2.0),
            Complex64::new(3.0, 0.0),
            Complex64::new(-1.0, 1.0),
            Complex64::new(2.0, -2.0),
            Complex64::new(0.0, -1.0),
        ],
    )
    .unwrap();
    assert_eq!(z.conjugate_transpose().conjugate_transpose(), z);
    assert_eq!(z.transpose().transpose(), z);

    // On a real matrix the adjoint degenerates to the transpose
    let r = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(r.conjugate_transpose(), r.transpose());
}

#[test]
fn test_mixed_pairing_operators() {
    let r = RealMatrix::from_row_major(2, 2, &[1.0, 0.0, 0.0, 1.0]).unwrap();
    let z = ComplexMatrix::from_row_major(
        2,
        2,
        &[
            Complex64::new(0.0, 1.0),
            Complex64::ZERO,
            Complex64::ZERO,
            Complex64::new(0.0, 1.0),
        ],
    )
    .unwrap();

    let sum = &r + &z;
    assert_eq!(sum.get(0, 0).unwrap(), Complex64::new(1.0, 1.0));

    let prod = &z * &r;
    assert_eq!(prod.get(1, 1).unwrap(), Complex64::new(0.0, 1.0));

    let quot = &r / &z;
    // 1 / i = -i on the diagonal
    assert!((quot.get(0, 0).unwrap() - Complex64::new(0.0, -1.0)).modulus() < 1e-12);
}

#[test]
fn test_promotion_preserves_structure() {
    let mut r = RealMatrix::sparse(2, 2, 2).unwrap();
    r.set(0, 1, 2.5).unwrap();
    r.set_row_name(0, "a").unwrap();

    let z = r.to_complex();
    assert_eq!(z.scheme(), r.scheme());
    assert_eq!(z.get(0, 1).unwrap(), Complex64::new(2.5, 0.0));
    assert_eq!(z.try_get_row_name(0), Some("a"));
}

#[test]
fn test_complex_divide_round_trip() {
    let right = ComplexMatrix::from_row_major(
        2,
        2,
        &[
            Complex64::new(2.0, 1.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(3.0, 2.0),
        ],
    )
    .unwrap();
    let left = ComplexMatrix::from_row_major(
        2,
        2,
        &[
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(-1.0, 2.0),
            Complex64::new(4.0, 0.0),
        ],
    )
    .unwrap();
    let x = solve(&left, &right).unwrap();
    assert_allclose_c(&x.matmul(&right).unwrap(), &left, 1e-9);
}

#[test]
fn test_complex_display() {
    let z = ComplexMatrix::scalar(Complex64::new(1.0, -2.0));
    let text = z.to_string();
    assert!(text.contains("1-2i"));
}
