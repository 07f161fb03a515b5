//! Division across every right-operand structure, cross-checked against
//! the general pivoted-LU reference path

use numat::error::Error;
use numat::matrix::RealMatrix;
use numat::solve::{select_strategy, solve, solve_with, SolveStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_allclose(a: &RealMatrix, b: &RealMatrix, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for r in 0..a.nrows() {
        for c in 0..a.ncols() {
            let (x, y) = (a.get(r, c).unwrap(), b.get(r, c).unwrap());
            assert!(
                (x - y).abs() <= tol,
                "mismatch at ({r}, {c}): {x} vs {y}"
            );
        }
    }
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> RealMatrix {
    let data: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(-2.0..2.0)).collect();
    RealMatrix::from_row_major(rows, cols, &data).unwrap()
}

/// Zero out entries so the matrix carries the requested structure, then
/// strengthen the diagonal to keep it comfortably invertible
fn structured(rng: &mut StdRng, n: usize, keep: impl Fn(usize, usize) -> bool) -> RealMatrix {
    let mut m = random_matrix(rng, n, n);
    for r in 0..n {
        for c in 0..n {
            if !keep(r, c) {
                m.set(r, c, 0.0).unwrap();
            }
        }
        let d = m.get(r, r).unwrap();
        m.set(r, r, d + if d >= 0.0 { 4.0 } else { -4.0 }).unwrap();
    }
    m
}

#[test]
fn test_concrete_lower_triangular_scenario() {
    // X * [[2, 0], [1, 3]] = [[2, 0], [0, 3]]
    let right = RealMatrix::from_row_major(2, 2, &[2.0, 0.0, 1.0, 3.0]).unwrap();
    let left = RealMatrix::from_row_major(2, 2, &[2.0, 0.0, 0.0, 3.0]).unwrap();
    assert_eq!(select_strategy(&right), SolveStrategy::LowerTriangular);

    let x = solve(&left, &right).unwrap();
    assert_allclose(&x.matmul(&right).unwrap(), &left, 1e-9);
}

#[test]
fn test_inverse_composes_to_identity_across_patterns() {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 5;
    let identity = RealMatrix::identity(n).unwrap();

    let cases: Vec<(RealMatrix, SolveStrategy)> = vec![
        (
            structured(&mut rng, n, |r, c| r == c),
            SolveStrategy::Diagonal,
        ),
        (
            structured(&mut rng, n, |r, c| r >= c),
            SolveStrategy::LowerTriangular,
        ),
        (
            structured(&mut rng, n, |r, c| r <= c),
            SolveStrategy::UpperTriangular,
        ),
        (
            structured(&mut rng, n, |r, c| c + 1 >= r),
            SolveStrategy::UpperHessenberg,
        ),
        (
            structured(&mut rng, n, |r, c| r + 1 >= c),
            SolveStrategy::LowerHessenberg,
        ),
        (structured(&mut rng, n, |_, _| true), SolveStrategy::GeneralSquare),
    ];

    for (a, expected) in cases {
        assert_eq!(select_strategy(&a), expected, "strategy for {a}");
        let inv = solve(&identity, &a).unwrap();
        assert_allclose(&inv.matmul(&a).unwrap(), &identity, 1e-8);
    }
}

#[test]
fn test_symmetric_inverse_composes_to_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = 5;
    let b = random_matrix(&mut rng, n, n);
    // B * B^T is symmetric positive definite
    let spd = b.matmul(&b.transpose()).unwrap();
    let spd = spd.add(&RealMatrix::diagonal(&[1.0; 5]).unwrap()).unwrap();
    assert_eq!(select_strategy(&spd), SolveStrategy::Hermitian);

    let identity = RealMatrix::identity(n).unwrap();
    let inv = solve(&identity, &spd).unwrap();
    assert_allclose(&inv.matmul(&spd).unwrap(), &identity, 1e-8);
}

#[test]
fn test_random_sweep_agrees_with_reference() {
    let mut rng = StdRng::seed_from_u64(1234);
    for trial in 0..20 {
        let n = rng.gen_range(2..7);
        let m = rng.gen_range(1..5);
        let kind = trial % 5;
        let right = match kind {
            0 => structured(&mut rng, n, |r, c| r == c),
            1 => structured(&mut rng, n, |r, c| r >= c),
            2 => structured(&mut rng, n, |r, c| c + 1 >= r),
            3 => {
                let b = random_matrix(&mut rng, n, n);
                let spd = b.matmul(&b.transpose()).unwrap();
                spd.add(&RealMatrix::diagonal(&vec![2.0; n]).unwrap())
                    .unwrap()
            }
            _ => structured(&mut rng, n, |_, _| true),
        };
        let left = random_matrix(&mut rng, m, n);

        let fast = solve(&left, &right).unwrap();
        let reference = solve_with(&left, &right, SolveStrategy::GeneralSquare).unwrap();
        assert_allclose(&fast, &reference, 1e-7);
        assert_allclose(&fast.matmul(&right).unwrap(), &left, 1e-7);
    }
}

#[test]
fn test_sparse_right_operand() {
    let mut rng = StdRng::seed_from_u64(99);
    let right = structured(&mut rng, 4, |r, c| r >= c).to_sparse();
    let left = random_matrix(&mut rng, 2, 4);
    assert_eq!(select_strategy(&right), SolveStrategy::LowerTriangular);

    let x = solve(&left, &right).unwrap();
    assert_allclose(&x.matmul(&right.to_dense()).unwrap(), &left, 1e-8);
}

#[test]
fn test_rank_deficient_rectangular_fails_hard() {
    let right = RealMatrix::from_row_major(3, 2, &[1.0, 2.0, 2.0, 4.0, -1.0, -2.0]).unwrap();
    let left = RealMatrix::from_row_major(1, 2, &[3.0, 5.0]).unwrap();
    assert_eq!(select_strategy(&right), SolveStrategy::LeastSquares);
    assert!(matches!(
        solve(&left, &right),
        Err(Error::RankDeficient { .. })
    ));
}

#[test]
fn test_least_squares_full_rank() {
    let mut rng = StdRng::seed_from_u64(5);
    // Overdetermined transposed system: right has more columns than rows
    let right = random_matrix(&mut rng, 2, 4);
    let left = random_matrix(&mut rng, 3, 4);
    let x = solve(&left, &right).unwrap();
    assert_eq!(x.shape(), [3, 2]);

    // Normal equations hold at the minimizer
    let rt = right.transpose();
    let gram = right.matmul(&rt).unwrap();
    let lhs = x.matmul(&gram).unwrap();
    let rhs = left.matmul(&rt).unwrap();
    assert_allclose(&lhs, &rhs, 1e-8);
}

#[test]
fn test_divide_operator_matches_solve() {
    let right = RealMatrix::from_row_major(2, 2, &[3.0, 1.0, 0.0, 2.0]).unwrap();
    let left = RealMatrix::from_row_major(2, 2, &[6.0, 4.0, 3.0, 2.0]).unwrap();
    let via_fn = left.divide(&right).unwrap();
    let via_op = &left / &right;
    assert_allclose(&via_fn, &via_op, 0.0);
}

#[test]
fn test_singular_square_right_rejected() {
    let right = RealMatrix::from_row_major(
        3,
        3,
        &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 5.0],
    )
    .unwrap();
    let left = RealMatrix::from_row_major(1, 3, &[1.0, 0.0, 0.0]).unwrap();
    assert!(matches!(solve(&left, &right), Err(Error::Singular { .. })));
}
