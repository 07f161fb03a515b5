//! Rectangular right operands: Householder-QR least squares
//!
//! The transposed system `A * Y = B` has `A = right^T` of shape
//! `right.cols x right.rows`. A tall `A` (more equations than unknowns)
//! is the ordinary overdetermined case: QR with Householder reflections,
//! then back substitution against R. A wide `A` is underdetermined; the
//! minimum-norm solution comes from the QR of `A^H` (which is simply
//! `conj(right)`), a forward solve against `R^H`, and the reflectors
//! replayed in reverse.
//!
//! Rank deficiency is detected by the column-norm probe at each
//! elimination step and is a hard error, never a degraded answer.

use super::{assemble, singular_tolerance, transposed_system};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// Reflect rows `k..rows` of column `col` in `data` (column-major with
/// leading dimension `rows`) through the normalized Householder vector
fn reflect_column<T: Scalar>(data: &mut [T], rows: usize, col: usize, k: usize, v: &[T]) {
    let base = col * rows + k;
    let mut w = T::zero();
    for (i, &vi) in v.iter().enumerate() {
        w = w + vi.conj() * data[base + i];
    }
    let w2 = w + w;
    for (i, &vi) in v.iter().enumerate() {
        data[base + i] = data[base + i] - w2 * vi;
    }
}

/// Build the normalized Householder vector sending rows `k..rows` of
/// column `k` to `alpha * e1`; returns `(v, alpha)` or None when the
/// column is already reduced
fn householder_vector<T: Scalar>(
    data: &[T],
    rows: usize,
    k: usize,
    norm: f64,
) -> Option<(Vec<T>, T)> {
    let base = k * rows + k;
    let x0 = data[base];
    let alpha = -(x0.unit() * T::from_f64(norm));

    let len = rows - k;
    let mut v = vec![T::zero(); len];
    v[0] = x0 - alpha;
    for i in 1..len {
        v[i] = data[base + i];
    }
    let mut vnorm2 = 0.0;
    for &vi in &v {
        let m = vi.modulus();
        vnorm2 += m * m;
    }
    if vnorm2 == 0.0 {
        return None;
    }
    let inv = T::from_f64(1.0 / vnorm2.sqrt());
    for vi in v.iter_mut() {
        *vi = *vi * inv;
    }
    Some((v, alpha))
}

fn column_norm<T: Scalar>(data: &[T], rows: usize, col: usize, from: usize) -> f64 {
    let mut s = 0.0;
    for i in from..rows {
        let m = data[col * rows + i].modulus();
        s += m * m;
    }
    s.sqrt()
}

/// In-place QR of `data` (`rows x cols`, rows >= cols), applying every
/// reflection to `rhs` (`rows x rhs_cols`) as well when present, and
/// collecting the normalized reflector vectors
fn qr_factor<T: Scalar>(
    data: &mut [T],
    rows: usize,
    cols: usize,
    mut rhs: Option<(&mut [T], usize)>,
    tol: f64,
) -> Result<Vec<Vec<T>>> {
    let mut reflectors = Vec::with_capacity(cols);
    for k in 0..cols {
        let norm = column_norm(data, rows, k, k);
        if norm <= tol {
            return Err(Error::rank_deficient(format!(
                "column {k} of the right operand is linearly dependent"
            )));
        }
        match householder_vector(data, rows, k, norm) {
            Some((v, alpha)) => {
                for j in (k + 1)..cols {
                    reflect_column(data, rows, j, k, &v);
                }
                if let Some((b, bc)) = rhs.as_mut() {
                    for c in 0..*bc {
                        reflect_column(b, rows, c, k, &v);
                    }
                }
                data[k * rows + k] = alpha;
                for i in (k + 1)..rows {
                    data[k * rows + i] = T::zero();
                }
                reflectors.push(v);
            }
            None => reflectors.push(Vec::new()),
        }
    }
    Ok(reflectors)
}

pub(super) fn solve_least_squares<T: Scalar>(
    left: &Matrix<T>,
    right: &Matrix<T>,
) -> Result<Matrix<T>> {
    let p = right.nrows();
    let q = right.ncols();
    let m = left.nrows();
    // Rank probe threshold scaled by the largest column norm of right
    let tol = {
        let mut max_norm = 0.0f64;
        for j in 0..q {
            let mut s = 0.0;
            for i in 0..p {
                let md = right.at(i, j).modulus();
                s += md * md;
            }
            max_norm = max_norm.max(s.sqrt());
        }
        singular_tolerance(p.max(q), max_norm)
    };

    let (mut a, mut b, n, m2) = transposed_system(left, right);
    debug_assert_eq!(n, q);
    debug_assert_eq!(m2, m);

    if q >= p {
        // Overdetermined: QR of A, back substitution against R
        qr_factor(&mut a, q, p, Some((&mut b[..], m)), tol)?;
        let mut y = vec![T::zero(); p * m];
        for c in 0..m {
            for i in (0..p).rev() {
                let mut s = b[c * q + i];
                for j in (i + 1)..p {
                    s = s - a[j * q + i] * y[c * p + j];
                }
                y[c * p + i] = s / a[i * q + i];
            }
        }
        assemble(&y, p, m)
    } else {
        // Underdetermined: minimum-norm via the QR of A^H = conj(right)
        let mut ah = vec![T::zero(); p * q];
        for j in 0..q {
            for i in 0..p {
                ah[j * p + i] = right.at(i, j).conj();
            }
        }
        let reflectors = qr_factor(&mut ah, p, q, None, tol)?;

        let mut y = vec![T::zero(); p * m];
        for c in 0..m {
            // Forward solve R^H w = b, with R in the top q x q of ah
            let mut w = vec![T::zero(); q];
            for i in 0..q {
                let mut s = b[c * q + i];
                for j in 0..i {
                    s = s - ah[i * p + j].conj() * w[j];
                }
                w[i] = s / ah[i * p + i].conj();
            }
            // y = Q * [w; 0], reflectors applied in reverse
            let z = &mut y[c * p..(c + 1) * p];
            z[..q].copy_from_slice(&w);
            for (k, v) in reflectors.iter().enumerate().rev() {
                if v.is_empty() {
                    continue;
                }
                let mut dot = T::zero();
                for (i, &vi) in v.iter().enumerate() {
                    dot = dot + vi.conj() * z[k + i];
                }
                let dot2 = dot + dot;
                for (i, &vi) in v.iter().enumerate() {
                    z[k + i] = z[k + i] - dot2 * vi;
                }
            }
        }
        assemble(&y, p, m)
    }
}
