//! Scalar element types and the trait connecting them to matrix operators
//!
//! Every matrix operator in numat is written once, generic over [`Scalar`].
//! The two implementors are `f64` and [`Complex64`]; conjugation and the
//! Hermitian-flavored checks degenerate to their real counterparts for
//! `f64`, so the real/complex duality never duplicates algorithm code.

mod complex;

pub use complex::Complex64;

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for types that can be elements of a matrix
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - basic element requirements
/// - `Add + Sub + Mul + Div + Neg` - arithmetic operations (Output = Self)
/// - `PartialEq` - exact equality on stored values, used by the pattern
///   classifier
pub trait Scalar:
    Copy
    + Clone
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + fmt::Debug
    + fmt::Display
{
    /// Whether the element type carries an imaginary component
    const IS_COMPLEX: bool;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Embed a real value into this scalar domain
    fn from_f64(v: f64) -> Self;

    /// Real component (the value itself for `f64`)
    fn re(self) -> f64;

    /// Complex conjugate (identity for `f64`)
    fn conj(self) -> Self;

    /// Multiplicative inverse; for complex values `conj(z) / |z|^2`
    fn recip(self) -> Self;

    /// Modulus: absolute value for `f64`, `sqrt(re^2 + im^2)` for complex
    fn modulus(self) -> f64;

    /// Principal square root
    fn sqrt(self) -> Self;

    /// Unit-modulus direction `z / |z|`, defined as one for zero
    fn unit(self) -> Self;

    /// Whether this is the exact zero of the domain
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

impl Scalar for f64 {
    const IS_COMPLEX: bool = false;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn re(self) -> f64 {
        self
    }

    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn recip(self) -> Self {
        1.0 / self
    }

    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn unit(self) -> Self {
        if self < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}

impl Scalar for Complex64 {
    const IS_COMPLEX: bool = true;

    #[inline]
    fn zero() -> Self {
        Complex64::ZERO
    }

    #[inline]
    fn one() -> Self {
        Complex64::ONE
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }

    #[inline]
    fn re(self) -> f64 {
        self.re
    }

    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn recip(self) -> Self {
        Complex64::recip(self)
    }

    #[inline]
    fn modulus(self) -> f64 {
        Complex64::modulus(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Complex64::sqrt(self)
    }

    #[inline]
    fn unit(self) -> Self {
        let m = self.modulus();
        if m == 0.0 {
            Complex64::ONE
        } else {
            Complex64::new(self.re / m, self.im / m)
        }
    }
}
