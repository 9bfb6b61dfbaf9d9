//! Sparse linear combinations of abstract vectors
//!
//! This crate provides [`LinearCombination`], a mapping from opaque vector
//! keys to complex coefficients with vector addition, scalar multiplication
//! and canonical text rendering. Keys are treated purely as hashable labels;
//! no algebraic relationship between distinct keys is ever assumed.
//!
//! ```
//! use lincomb::LinearCombination;
//!
//! let a = LinearCombination::from_terms([("X", 1.0), ("Z", -0.5)]);
//! let b = LinearCombination::from_terms([("Z", 0.5)]);
//! let sum = a + b;
//! assert_eq!(format!("{sum}"), "1.000*X");
//! ```

pub mod combination;
pub mod display;
pub mod error;
pub mod traits;

pub use combination::*;
pub use error::*;
pub use traits::*;

/// Coefficient type: a complex number with double-precision parts.
///
/// Real-valued inputs are normalized to this type at every construction and
/// mutation boundary so arithmetic is uniform.
pub type Scalar = num_complex::Complex64;
