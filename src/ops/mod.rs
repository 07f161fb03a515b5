//! Elementwise arithmetic, matrix products, and structural transforms
//!
//! Every binary operation comes in two surfaces: a fallible inherent
//! method returning [`crate::error::Result`], and `std::ops` overloads on
//! references for the four real/complex pairings. The overloads panic on
//! the errors the inherent methods report, matching the usual operator
//! contract for numeric containers.

mod arithmetic;
mod matmul;
mod transpose;
