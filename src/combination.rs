//! Sparse mapping of abstract vectors to complex coefficients
//!
//! This module contains the container type itself together with its
//! arithmetic operators. The text rendering lives in [`crate::display`].

use core::iter::FusedIterator;
use core::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use hashbrown::HashMap;
use num_traits::Zero;

use crate::error::{LincombError, Result};
use crate::traits::Vector;
use crate::Scalar;

const ZERO: Scalar = Scalar::new(0.0, 0.0);

/// Linear combination of abstract vectors with complex coefficients.
///
/// Keys represent the vectors, values represent their coefficients. The only
/// requirement on keys is the [`Vector`] capability set (hashable, comparable
/// for equality, cloneable); every other relationship between keys is
/// ignored, so keys are allowed to be linearly dependent.
///
/// No entry with an exactly zero coefficient is ever observable: every
/// mutating operation removes exact zeros before returning, and
/// [`clean`](Self::clean) removes coefficients whose magnitude falls below a
/// caller-chosen tolerance. Cloning yields an independent snapshot of the
/// current terms.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: serde::Serialize",
        deserialize = "V: serde::Deserialize<'de> + Eq + core::hash::Hash"
    ))
)]
pub struct LinearCombination<V> {
    terms: HashMap<V, Scalar>,
}

impl<V: Vector> LinearCombination<V> {
    /// Creates an empty combination.
    pub fn new() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }

    /// Builds a combination from `(vector, coefficient)` terms.
    ///
    /// Repeated vectors follow ordinary key-value assignment semantics:
    /// later coefficients overwrite earlier ones. They are **not** summed —
    /// use [`AddAssign`] when vector addition is intended.
    pub fn from_terms<I, C>(terms: I) -> Self
    where
        I: IntoIterator<Item = (V, C)>,
        C: Into<Scalar>,
    {
        let mut combination = Self::new();
        combination.update(terms);
        combination
    }

    /// Builds a combination assigning the same coefficient to every vector.
    ///
    /// Duplicate vectors collapse to a single entry. The coefficient is
    /// normalized to [`Scalar`] even when given as a real number.
    pub fn from_vectors<I, C>(vectors: I, coefficient: C) -> Self
    where
        I: IntoIterator<Item = V>,
        C: Into<Scalar>,
    {
        let coefficient = coefficient.into();
        Self::from_terms(vectors.into_iter().map(|v| (v, coefficient)))
    }

    /// Returns the coefficient for `vector`, or zero when absent.
    ///
    /// Never fails; vectors the combination does not mention read as zero.
    pub fn coefficient(&self, vector: &V) -> Scalar {
        self.terms.get(vector).copied().unwrap_or(ZERO)
    }

    /// Returns the stored coefficient, or `None` when the vector is absent
    /// or its stored coefficient is exactly zero.
    ///
    /// The exact-zero case cannot normally arise because mutations elide
    /// zeros, but the accessor defends against it regardless. Use
    /// `get(v).unwrap_or(default)` for a defaulted read.
    pub fn get(&self, vector: &V) -> Option<Scalar> {
        self.terms.get(vector).copied().filter(|c| !c.is_zero())
    }

    /// Sets the coefficient for `vector`.
    ///
    /// A zero coefficient removes the entry instead of storing it, keeping
    /// the zero-elision invariant without a separate cleanup pass.
    pub fn insert(&mut self, vector: V, coefficient: impl Into<Scalar>) {
        let coefficient = coefficient.into();
        if coefficient.is_zero() {
            self.terms.remove(&vector);
        } else {
            self.terms.insert(vector, coefficient);
        }
    }

    /// Whether `vector` carries a nonzero coefficient.
    pub fn contains(&self, vector: &V) -> bool {
        self.terms.get(vector).map_or(false, |c| !c.is_zero())
    }

    /// Overwrites entries with those from `terms`, then removes exact zeros.
    ///
    /// This is assignment, not addition: a vector present on both sides
    /// takes the incoming coefficient, it does not accumulate.
    pub fn update<I, C>(&mut self, terms: I)
    where
        I: IntoIterator<Item = (V, C)>,
        C: Into<Scalar>,
    {
        for (vector, coefficient) in terms {
            self.terms.insert(vector, coefficient.into());
        }
        self.clean(0.0);
    }

    /// Removes every entry whose coefficient magnitude is at most `atol`,
    /// returning `self` for chaining.
    ///
    /// `clean(0.0)` removes exact zeros only and is what the arithmetic
    /// operators apply after every mutation.
    pub fn clean(&mut self, atol: f64) -> &mut Self {
        self.terms.retain(|_, c| !(c.norm() <= atol));
        self
    }

    /// Iterates over `(vector, coefficient)` pairs with nonzero coefficients.
    ///
    /// Order is the underlying map's iteration order, not a semantic one.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.terms.iter(),
        }
    }

    /// Iterates over vectors carrying a nonzero coefficient.
    pub fn vectors(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(v, _)| v)
    }

    /// Iterates over the nonzero coefficients.
    pub fn coefficients(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.iter().map(|(_, c)| c)
    }

    /// Number of vectors with a nonzero coefficient, recomputed on each call.
    pub fn len(&self) -> usize {
        self.terms.values().filter(|c| !c.is_zero()).count()
    }

    /// True when every coefficient is zero (equivalently, no terms survive
    /// exact-zero cleaning).
    pub fn is_empty(&self) -> bool {
        self.terms.values().all(|c| c.is_zero())
    }

    /// Approximate equality: for every vector in either combination, the two
    /// coefficients differ by less than `atol` in magnitude.
    ///
    /// This is the intended comparison whenever coefficients come out of
    /// floating-point arithmetic; `==` compares exactly and is reserved for
    /// precise or symbolic coefficients.
    pub fn approx_eq(&self, other: &Self, atol: f64) -> bool {
        self.iter()
            .all(|(v, c)| (other.coefficient(v) - c).norm() < atol)
            && other
                .iter()
                .all(|(v, c)| (self.coefficient(v) - c).norm() < atol)
    }

    /// Divides every coefficient by `divisor`, failing on an exactly zero
    /// divisor.
    ///
    /// The `/` operator performs the same division but panics on zero; this
    /// is the recoverable form.
    pub fn checked_div(&self, divisor: impl Into<Scalar>) -> Result<Self> {
        let divisor = divisor.into();
        if divisor.is_zero() {
            return Err(LincombError::DivisionByZero);
        }
        Ok(self.clone() * divisor.finv())
    }
}

impl<V: Vector> Default for LinearCombination<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vector> PartialEq for LinearCombination<V> {
    /// Exact equality over the union of vectors, reading absent vectors as
    /// zero. Presence or absence of an explicit zero entry never affects the
    /// outcome. Sensitive to floating-point error; see
    /// [`approx_eq`](LinearCombination::approx_eq).
    fn eq(&self, other: &Self) -> bool {
        self.iter().all(|(v, c)| other.coefficient(v) == c)
            && other.iter().all(|(v, c)| self.coefficient(v) == c)
    }
}

impl<V: Vector, C: Into<Scalar>> FromIterator<(V, C)> for LinearCombination<V> {
    fn from_iter<I: IntoIterator<Item = (V, C)>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl<V: Vector, C: Into<Scalar>> Extend<(V, C)> for LinearCombination<V> {
    /// Overwrite semantics, identical to [`update`](LinearCombination::update).
    fn extend<I: IntoIterator<Item = (V, C)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

/// Borrowing iterator over the nonzero terms of a [`LinearCombination`].
#[derive(Clone)]
pub struct Iter<'a, V> {
    inner: hashbrown::hash_map::Iter<'a, V, Scalar>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a V, Scalar);

    fn next(&mut self) -> Option<Self::Item> {
        for (vector, coefficient) in self.inner.by_ref() {
            if !coefficient.is_zero() {
                return Some((vector, *coefficient));
            }
        }
        None
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Owning iterator over the nonzero terms of a [`LinearCombination`].
pub struct IntoIter<V> {
    inner: hashbrown::hash_map::IntoIter<V, Scalar>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (V, Scalar);

    fn next(&mut self) -> Option<Self::Item> {
        for (vector, coefficient) in self.inner.by_ref() {
            if !coefficient.is_zero() {
                return Some((vector, coefficient));
            }
        }
        None
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<V: Vector> IntoIterator for LinearCombination<V> {
    type Item = (V, Scalar);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            inner: self.terms.into_iter(),
        }
    }
}

impl<'a, V: Vector> IntoIterator for &'a LinearCombination<V> {
    type Item = (&'a V, Scalar);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// Zero-defaulting read access; absent vectors index to zero.
impl<V: Vector> Index<&V> for LinearCombination<V> {
    type Output = Scalar;

    fn index(&self, vector: &V) -> &Scalar {
        self.terms.get(vector).unwrap_or(&ZERO)
    }
}

impl<V: Vector> AddAssign<&LinearCombination<V>> for LinearCombination<V> {
    /// Vector addition: shared vectors accumulate by coefficient summation,
    /// then exact zeros are elided.
    fn add_assign(&mut self, other: &LinearCombination<V>) {
        for (vector, coefficient) in other.iter() {
            let sum = self.coefficient(vector) + coefficient;
            self.terms.insert(vector.clone(), sum);
        }
        self.clean(0.0);
    }
}

impl<V: Vector> AddAssign for LinearCombination<V> {
    fn add_assign(&mut self, other: Self) {
        for (vector, coefficient) in other {
            let sum = self.coefficient(&vector) + coefficient;
            self.terms.insert(vector, sum);
        }
        self.clean(0.0);
    }
}

impl<V: Vector> SubAssign<&LinearCombination<V>> for LinearCombination<V> {
    fn sub_assign(&mut self, other: &LinearCombination<V>) {
        for (vector, coefficient) in other.iter() {
            let difference = self.coefficient(vector) - coefficient;
            self.terms.insert(vector.clone(), difference);
        }
        self.clean(0.0);
    }
}

impl<V: Vector> SubAssign for LinearCombination<V> {
    fn sub_assign(&mut self, other: Self) {
        for (vector, coefficient) in other {
            let difference = self.coefficient(&vector) - coefficient;
            self.terms.insert(vector, difference);
        }
        self.clean(0.0);
    }
}

impl<V: Vector> Add for LinearCombination<V> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl<V: Vector> Add<&LinearCombination<V>> for LinearCombination<V> {
    type Output = Self;

    fn add(mut self, other: &LinearCombination<V>) -> Self {
        self += other;
        self
    }
}

impl<V: Vector> Add for &LinearCombination<V> {
    type Output = LinearCombination<V>;

    fn add(self, other: Self) -> LinearCombination<V> {
        self.clone() + other
    }
}

impl<V: Vector> Sub for LinearCombination<V> {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl<V: Vector> Sub<&LinearCombination<V>> for LinearCombination<V> {
    type Output = Self;

    fn sub(mut self, other: &LinearCombination<V>) -> Self {
        self -= other;
        self
    }
}

impl<V: Vector> Sub for &LinearCombination<V> {
    type Output = LinearCombination<V>;

    fn sub(self, other: Self) -> LinearCombination<V> {
        self.clone() - other
    }
}

impl<V: Vector> Neg for LinearCombination<V> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for coefficient in self.terms.values_mut() {
            *coefficient = -*coefficient;
        }
        self
    }
}

impl<V: Vector> Neg for &LinearCombination<V> {
    type Output = LinearCombination<V>;

    fn neg(self) -> LinearCombination<V> {
        self.clone().neg()
    }
}

impl<V: Vector, S: Into<Scalar>> MulAssign<S> for LinearCombination<V> {
    /// Scales every coefficient, then elides exact zeros; multiplying by
    /// zero empties the combination.
    fn mul_assign(&mut self, factor: S) {
        let factor = factor.into();
        for coefficient in self.terms.values_mut() {
            *coefficient *= factor;
        }
        self.clean(0.0);
    }
}

impl<V: Vector, S: Into<Scalar>> Mul<S> for LinearCombination<V> {
    type Output = Self;

    fn mul(mut self, factor: S) -> Self {
        self *= factor;
        self
    }
}

impl<V: Vector, S: Into<Scalar>> Mul<S> for &LinearCombination<V> {
    type Output = LinearCombination<V>;

    fn mul(self, factor: S) -> LinearCombination<V> {
        self.clone() * factor
    }
}

impl<V: Vector> Mul<LinearCombination<V>> for f64 {
    type Output = LinearCombination<V>;

    fn mul(self, combination: LinearCombination<V>) -> LinearCombination<V> {
        combination * self
    }
}

impl<V: Vector> Mul<LinearCombination<V>> for Scalar {
    type Output = LinearCombination<V>;

    fn mul(self, combination: LinearCombination<V>) -> LinearCombination<V> {
        combination * self
    }
}

impl<V: Vector, S: Into<Scalar>> DivAssign<S> for LinearCombination<V> {
    /// Equivalent to multiplying by the reciprocal of `divisor`.
    ///
    /// # Panics
    ///
    /// Panics when `divisor` is exactly zero. Use
    /// [`checked_div`](LinearCombination::checked_div) for the recoverable
    /// form.
    fn div_assign(&mut self, divisor: S) {
        let divisor = divisor.into();
        assert!(
            !divisor.is_zero(),
            "{}",
            LincombError::DivisionByZero
        );
        *self *= divisor.finv();
    }
}

impl<V: Vector, S: Into<Scalar>> Div<S> for LinearCombination<V> {
    type Output = Self;

    fn div(mut self, divisor: S) -> Self {
        self /= divisor;
        self
    }
}

impl<V: Vector, S: Into<Scalar>> Div<S> for &LinearCombination<V> {
    type Output = LinearCombination<V>;

    fn div(self, divisor: S) -> LinearCombination<V> {
        self.clone() / divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn terms(pairs: &[(&'static str, f64)]) -> LinearCombination<&'static str> {
        LinearCombination::from_terms(pairs.iter().copied())
    }

    #[test]
    fn test_construction_last_write_wins() {
        let c = LinearCombination::from_terms([("x", 1.0), ("x", 2.0)]);
        assert_eq!(c.coefficient(&"x"), Scalar::new(2.0, 0.0));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_construction_drops_exact_zeros() {
        let c = LinearCombination::from_terms([("x", 0.0), ("y", 1.0)]);
        assert!(!c.contains(&"x"));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_from_vectors_collapses_duplicates() {
        let c = LinearCombination::from_vectors(["a", "b", "a"], 2.0);
        assert_eq!(c.len(), 2);
        assert_eq!(c.coefficient(&"a"), Scalar::new(2.0, 0.0));
        assert_eq!(c.coefficient(&"b"), Scalar::new(2.0, 0.0));
    }

    #[test]
    fn test_from_vectors_zero_coefficient_is_empty() {
        let c: LinearCombination<&str> = LinearCombination::from_vectors(["a", "b"], 0.0);
        assert!(c.is_empty());
    }

    #[test]
    fn test_coefficient_defaults_to_zero() {
        let c = terms(&[("x", 1.0)]);
        assert_eq!(c.coefficient(&"missing"), Scalar::new(0.0, 0.0));
        assert_eq!(c[&"missing"], Scalar::new(0.0, 0.0));
        assert_eq!(c[&"x"], Scalar::new(1.0, 0.0));
    }

    #[test]
    fn test_get_hides_absent_and_zero() {
        let c = terms(&[("x", 1.0)]);
        assert_eq!(c.get(&"x"), Some(Scalar::new(1.0, 0.0)));
        assert_eq!(c.get(&"y"), None);
        assert_eq!(c.get(&"y").unwrap_or(Scalar::new(5.0, 0.0)), Scalar::new(5.0, 0.0));
    }

    #[test]
    fn test_insert_zero_deletes() {
        let mut c = terms(&[("x", 1.0)]);
        c.insert("x", 0.0);
        assert!(!c.contains(&"x"));
        assert!(c.is_empty());
        assert_eq!(c, LinearCombination::new());

        // deleting an absent vector is a no-op
        c.insert("y", 0.0);
        assert!(c.is_empty());
    }

    #[test]
    fn test_update_overwrites_not_adds() {
        let mut c = terms(&[("x", 1.0)]);
        c.update([("x", 2.0)]);
        assert_eq!(c, terms(&[("x", 2.0)]));

        let mut d = terms(&[("x", 1.0)]);
        d += terms(&[("x", 2.0)]);
        assert_eq!(d, terms(&[("x", 3.0)]));
    }

    #[test]
    fn test_update_elides_incoming_zeros() {
        let mut c = terms(&[("x", 1.0), ("y", 2.0)]);
        c.update([("x", 0.0), ("z", 3.0)]);
        assert!(!c.contains(&"x"));
        assert_eq!(c, terms(&[("y", 2.0), ("z", 3.0)]));
    }

    #[test]
    fn test_extend_matches_update() {
        let mut c = terms(&[("x", 1.0)]);
        c.extend([("x", 4.0), ("y", 5.0)]);
        assert_eq!(c, terms(&[("x", 4.0), ("y", 5.0)]));
    }

    #[test]
    fn test_clean_threshold() {
        let mut c = terms(&[("x", 1e-12), ("y", 1.0), ("z", -1e-12)]);
        c.clean(1e-9);
        assert_eq!(c, terms(&[("y", 1.0)]));
    }

    #[test]
    fn test_clean_chains() {
        let mut c = terms(&[("x", 1e-12), ("y", 1.0)]);
        let len = c.clean(1e-9).len();
        assert_eq!(len, 1);
    }

    #[test]
    fn test_len_and_iteration_skip_zeros() {
        let mut c = terms(&[("x", 2.0), ("y", 3.0)]);
        c -= terms(&[("y", 3.0)]);
        assert_eq!(c.len(), 1);
        let collected: Vec<_> = c.iter().collect();
        assert_eq!(collected, vec![(&"x", Scalar::new(2.0, 0.0))]);
        assert_eq!(c.vectors().collect::<Vec<_>>(), vec![&"x"]);
        assert_eq!(c.coefficients().collect::<Vec<_>>(), vec![Scalar::new(2.0, 0.0)]);
    }

    #[test]
    fn test_into_iterator_owned() {
        let c = terms(&[("x", 2.0)]);
        let collected: Vec<_> = c.into_iter().collect();
        assert_eq!(collected, vec![("x", Scalar::new(2.0, 0.0))]);
    }

    #[test]
    fn test_additive_identity_and_inverse() {
        let a = terms(&[("x", 1.5), ("y", -2.0), ("z", 3.0)]);
        assert!((a.clone() + (-a.clone())).is_empty());
        assert!((a.clone() - a.clone()).is_empty());
        assert_eq!(a.clone() + LinearCombination::new(), a);
    }

    #[test]
    fn test_addition_commutes_and_associates() {
        let a = terms(&[("x", 1.0), ("y", 2.0)]);
        let b = terms(&[("y", -2.0), ("z", 4.0)]);
        let c = terms(&[("x", 0.5), ("z", -4.0)]);
        assert_eq!(&a + &b, &b + &a);
        assert_eq!((&a + &b) + &c, a + (b + c));
    }

    #[test]
    fn test_addition_merges_disjoint_keys() {
        let a = terms(&[("x", 1.0)]);
        let b = terms(&[("y", 2.0)]);
        assert_eq!(a + b, terms(&[("x", 1.0), ("y", 2.0)]));
    }

    #[test]
    fn test_operands_unmodified_by_value_ops() {
        let a = terms(&[("x", 1.0)]);
        let b = terms(&[("x", 2.0)]);
        let _ = &a + &b;
        let _ = &a - &b;
        let _ = &a * 2.0;
        let _ = -&a;
        assert_eq!(a, terms(&[("x", 1.0)]));
        assert_eq!(b, terms(&[("x", 2.0)]));
    }

    #[test]
    fn test_negation() {
        let a = terms(&[("x", 1.0), ("y", -2.5)]);
        let n = -&a;
        assert_eq!(n.coefficient(&"x"), Scalar::new(-1.0, 0.0));
        assert_eq!(n.coefficient(&"y"), Scalar::new(2.5, 0.0));
        assert_eq!(-n, a);
    }

    #[test]
    fn test_scalar_multiplication() {
        let a = terms(&[("x", 1.0), ("y", -2.0)]);
        let doubled = &a * 2.0;
        assert_eq!(doubled, terms(&[("x", 2.0), ("y", -4.0)]));
        assert_eq!(2.0 * a.clone(), doubled);
        assert_eq!(Scalar::new(2.0, 0.0) * a.clone(), doubled);

        let rotated = &a * Scalar::new(0.0, 1.0);
        assert_eq!(rotated.coefficient(&"x"), Scalar::new(0.0, 1.0));
        assert_eq!(rotated.coefficient(&"y"), Scalar::new(0.0, -2.0));
    }

    #[test]
    fn test_multiplication_by_zero_empties() {
        let mut a = terms(&[("x", 1.0), ("y", -2.0)]);
        a *= 0.0;
        assert!(a.is_empty());
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn test_distributivity() {
        let a = terms(&[("x", 1.0), ("y", 2.0)]);
        let b = terms(&[("y", 3.0), ("z", -4.0)]);
        let s = 2.0;
        assert_eq!((&a + &b) * s, a * s + b * s);
    }

    #[test]
    fn test_scalar_round_trip() {
        let a = terms(&[("x", 1.0), ("y", -2.7)]);
        let s = Scalar::new(0.3, -1.1);
        let round_tripped = (a.clone() * s) / s;
        assert!(round_tripped.approx_eq(&a, 1e-12));
    }

    #[test]
    fn test_checked_div_by_zero() {
        let a = terms(&[("x", 1.0)]);
        assert_eq!(a.checked_div(0.0), Err(LincombError::DivisionByZero));
        assert_eq!(
            a.checked_div(2.0),
            Ok(terms(&[("x", 0.5)]))
        );
    }

    #[test]
    #[should_panic(expected = "division of a linear combination by zero")]
    fn test_div_operator_panics_on_zero() {
        let a = terms(&[("x", 1.0)]);
        let _ = a / 0.0;
    }

    #[test]
    fn test_exact_equality_union_of_keys() {
        let a = terms(&[("x", 1.0)]);
        let b = terms(&[("x", 1.0), ("y", 0.0)]);
        assert_eq!(a, b);
        assert_ne!(a, terms(&[("x", 1.0), ("y", 2.0)]));
        assert_ne!(terms(&[("x", 1.0)]), terms(&[("y", 1.0)]));
    }

    #[test]
    fn test_equality_ignores_zero_padding() {
        let mut a: LinearCombination<&str> = LinearCombination::new();
        a.insert("x", 0.0);
        assert_eq!(a, LinearCombination::new());
        assert!(a.is_empty());
    }

    #[test]
    fn test_approx_eq() {
        let a = terms(&[("x", 1.0)]);
        let b = terms(&[("x", 1.0 + 1e-10)]);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&b, 1e-11));

        // disjoint keys compare against zero
        let c = terms(&[("y", 1e-10)]);
        assert!(LinearCombination::new().approx_eq(&c, 1e-9));
    }

    #[test]
    fn test_zero_elision_under_mutation_chains() {
        let mut c = terms(&[("x", 1.0), ("y", 2.0)]);
        c += terms(&[("x", -1.0)]);
        c -= terms(&[("y", 2.0)]);
        c.insert("z", 3.0);
        c *= 2.0;
        c.insert("z", 0.0);
        assert_eq!(c.len(), 0);
        assert!(c.iter().next().is_none());
        assert!(!c.contains(&"x"));
        assert!(!c.contains(&"y"));
        assert!(!c.contains(&"z"));
    }

    #[test]
    fn test_complex_coefficients_accumulate() {
        let mut c: LinearCombination<&str> = LinearCombination::new();
        c.insert("x", Scalar::new(1.0, 2.0));
        c += LinearCombination::from_terms([("x", Scalar::new(-1.0, 0.5))]);
        assert_eq!(c.coefficient(&"x"), Scalar::new(0.0, 2.5));

        c += LinearCombination::from_terms([("x", Scalar::new(0.0, -2.5))]);
        assert!(c.is_empty());
    }

    #[test]
    fn test_randomized_addition_laws() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let a: LinearCombination<u8> = (0..8)
                .map(|_| (rng.gen_range(0..16u8), Scalar::new(rng.gen(), rng.gen())))
                .collect();
            let b: LinearCombination<u8> = (0..8)
                .map(|_| (rng.gen_range(0..16u8), Scalar::new(rng.gen(), rng.gen())))
                .collect();
            assert_eq!(&a + &b, &b + &a);
            assert!((&a - &a).is_empty());
            assert!((&a + &-&a).is_empty());
        }
    }

    #[test]
    fn test_clone_is_independent_snapshot() {
        let a = terms(&[("x", 1.0)]);
        let mut snapshot = a.clone();
        snapshot.insert("x", 9.0);
        assert_eq!(a.coefficient(&"x"), Scalar::new(1.0, 0.0));
    }
}
