//! Key type constraints for linear combinations
//!
//! This module defines the trait that constrains what types can be used
//! as vector keys in a linear combination.

use core::hash::Hash;

/// Trait for types usable as abstract vectors
///
/// This trait defines the requirements for the key type of a
/// [`LinearCombination`](crate::LinearCombination). All vector types must be:
/// - Clone: Can be duplicated when combinations are copied or merged
/// - Eq: Can be compared for equality (with equal values hashing equally)
/// - Hash: Can be hashed for sparse storage
///
/// Nothing else is required or used. In particular no algebraic relationship
/// between distinct vectors is assumed; keys are allowed to be linearly
/// dependent without the container noticing or caring.
///
/// Text rendering additionally requires `Ord` and `Display` on the key, but
/// only on the rendering surface itself, not on the container.
pub trait Vector: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> Vector for T {}
