//! Module implement tuple adapters, the caller supplied equality and
//! hashing strategy for every dimension of a tuple.

use std::{hash::Hash, marker};

use crate::{hash, Error, Result};

/// Trait for tuple adapters. An adapter fixes the tuple type, reports
/// its rank and supplies equality and hashing per dimension.
///
/// Contract, for all tuples `a` and `b` and every dimension
/// `d` in `0..rank`:
///
/// * `equals(a, b)` implies `item_equals(a, b, d)`.
/// * `equals(a, b)` implies `item_hash(a, d) == item_hash(b, d)`.
///
/// Methods taking a dimension shall fail with
/// [Error::InvalidDimension] when `dim` is outside `0..rank`.
pub trait Adapter {
    type Tuple;

    /// Return the arity of tuples handled by this adapter.
    fn to_rank(&self) -> usize;

    /// Return whether `a` and `b` are equal in every dimension.
    fn equals(&self, a: &Self::Tuple, b: &Self::Tuple) -> bool;

    /// Return whether `a` and `b` are equal in dimension `dim`.
    fn item_equals(&self, a: &Self::Tuple, b: &Self::Tuple, dim: usize) -> Result<bool>;

    /// Return the hash of dimension `dim` of `tuple`.
    fn item_hash(&self, tuple: &Self::Tuple, dim: usize) -> Result<u32>;
}

/// Trait for per-dimension comparers, the equality and hashing
/// strategy for a single element type.
pub trait Comparer<I> {
    fn is_equal(&self, a: &I, b: &I) -> bool;

    fn to_hash(&self, item: &I) -> u32;
}

/// Default comparer, uses the element's [Hash] and [Eq]
/// implementations, hashing via [CityHasher][crate::CityHasher].
#[derive(Clone, Copy, Default)]
pub struct Natural;

impl<I> Comparer<I> for Natural
where
    I: Hash + Eq,
{
    #[inline]
    fn is_equal(&self, a: &I, b: &I) -> bool {
        a == b
    }

    #[inline]
    fn to_hash(&self, item: &I) -> u32 {
        hash::hash32(item)
    }
}

/// Adapter of rank 1, the relation degenerates to a persistent
/// hash set over `T`.
pub struct Unary<T, X = Natural> {
    cmp: X,
    _tuple: marker::PhantomData<T>,
}

impl<T> Unary<T>
where
    T: Hash + Eq,
{
    pub fn new() -> Unary<T> {
        Unary::with_comparer(Natural)
    }
}

impl<T> Default for Unary<T>
where
    T: Hash + Eq,
{
    fn default() -> Self {
        Unary::new()
    }
}

impl<T, X> Unary<T, X> {
    pub fn with_comparer(cmp: X) -> Unary<T, X> {
        Unary {
            cmp,
            _tuple: marker::PhantomData,
        }
    }
}

impl<T, X> Adapter for Unary<T, X>
where
    X: Comparer<T>,
{
    type Tuple = T;

    fn to_rank(&self) -> usize {
        1
    }

    fn equals(&self, a: &T, b: &T) -> bool {
        self.cmp.is_equal(a, b)
    }

    fn item_equals(&self, a: &T, b: &T, dim: usize) -> Result<bool> {
        match dim {
            0 => Ok(self.cmp.is_equal(a, b)),
            _ => err_at!(InvalidDimension, msg: "dim {} for rank 1", dim),
        }
    }

    fn item_hash(&self, tuple: &T, dim: usize) -> Result<u32> {
        match dim {
            0 => Ok(self.cmp.to_hash(tuple)),
            _ => err_at!(InvalidDimension, msg: "dim {} for rank 1", dim),
        }
    }
}

/// Adapter of rank 2, over `(A, B)` tuples.
pub struct Binary<A, B, X = Natural, Y = Natural> {
    x: X,
    y: Y,
    _tuple: marker::PhantomData<(A, B)>,
}

impl<A, B> Binary<A, B>
where
    A: Hash + Eq,
    B: Hash + Eq,
{
    pub fn new() -> Binary<A, B> {
        Binary::with_comparers(Natural, Natural)
    }
}

impl<A, B> Default for Binary<A, B>
where
    A: Hash + Eq,
    B: Hash + Eq,
{
    fn default() -> Self {
        Binary::new()
    }
}

impl<A, B, X, Y> Binary<A, B, X, Y> {
    pub fn with_comparers(x: X, y: Y) -> Binary<A, B, X, Y> {
        Binary {
            x,
            y,
            _tuple: marker::PhantomData,
        }
    }
}

impl<A, B, X, Y> Adapter for Binary<A, B, X, Y>
where
    X: Comparer<A>,
    Y: Comparer<B>,
{
    type Tuple = (A, B);

    fn to_rank(&self) -> usize {
        2
    }

    fn equals(&self, a: &(A, B), b: &(A, B)) -> bool {
        self.x.is_equal(&a.0, &b.0) && self.y.is_equal(&a.1, &b.1)
    }

    fn item_equals(&self, a: &(A, B), b: &(A, B), dim: usize) -> Result<bool> {
        match dim {
            0 => Ok(self.x.is_equal(&a.0, &b.0)),
            1 => Ok(self.y.is_equal(&a.1, &b.1)),
            _ => err_at!(InvalidDimension, msg: "dim {} for rank 2", dim),
        }
    }

    fn item_hash(&self, tuple: &(A, B), dim: usize) -> Result<u32> {
        match dim {
            0 => Ok(self.x.to_hash(&tuple.0)),
            1 => Ok(self.y.to_hash(&tuple.1)),
            _ => err_at!(InvalidDimension, msg: "dim {} for rank 2", dim),
        }
    }
}

/// Adapter of rank 3, over `(A, B, C)` tuples.
pub struct Ternary<A, B, C, X = Natural, Y = Natural, Z = Natural> {
    x: X,
    y: Y,
    z: Z,
    _tuple: marker::PhantomData<(A, B, C)>,
}

impl<A, B, C> Ternary<A, B, C>
where
    A: Hash + Eq,
    B: Hash + Eq,
    C: Hash + Eq,
{
    pub fn new() -> Ternary<A, B, C> {
        Ternary::with_comparers(Natural, Natural, Natural)
    }
}

impl<A, B, C> Default for Ternary<A, B, C>
where
    A: Hash + Eq,
    B: Hash + Eq,
    C: Hash + Eq,
{
    fn default() -> Self {
        Ternary::new()
    }
}

impl<A, B, C, X, Y, Z> Ternary<A, B, C, X, Y, Z> {
    pub fn with_comparers(x: X, y: Y, z: Z) -> Ternary<A, B, C, X, Y, Z> {
        Ternary {
            x,
            y,
            z,
            _tuple: marker::PhantomData,
        }
    }
}

impl<A, B, C, X, Y, Z> Adapter for Ternary<A, B, C, X, Y, Z>
where
    X: Comparer<A>,
    Y: Comparer<B>,
    Z: Comparer<C>,
{
    type Tuple = (A, B, C);

    fn to_rank(&self) -> usize {
        3
    }

    fn equals(&self, a: &(A, B, C), b: &(A, B, C)) -> bool {
        self.x.is_equal(&a.0, &b.0)
            && self.y.is_equal(&a.1, &b.1)
            && self.z.is_equal(&a.2, &b.2)
    }

    fn item_equals(&self, a: &(A, B, C), b: &(A, B, C), dim: usize) -> Result<bool> {
        match dim {
            0 => Ok(self.x.is_equal(&a.0, &b.0)),
            1 => Ok(self.y.is_equal(&a.1, &b.1)),
            2 => Ok(self.z.is_equal(&a.2, &b.2)),
            _ => err_at!(InvalidDimension, msg: "dim {} for rank 3", dim),
        }
    }

    fn item_hash(&self, tuple: &(A, B, C), dim: usize) -> Result<u32> {
        match dim {
            0 => Ok(self.x.to_hash(&tuple.0)),
            1 => Ok(self.y.to_hash(&tuple.1)),
            2 => Ok(self.z.to_hash(&tuple.2)),
            _ => err_at!(InvalidDimension, msg: "dim {} for rank 3", dim),
        }
    }
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;
