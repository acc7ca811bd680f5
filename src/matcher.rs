//! Module implement per-dimension matchers, the query interface for
//! partial-key operations.

use crate::{Adapter, Error, Result};

/// Matcher is the per-dimension predicate for [find][crate::Relation::find]
/// and [remove_matching][crate::Relation::remove_matching]. Queries
/// supply one matcher per dimension; a matcher slice with at least one
/// [Matcher::Any] is a partial key.
#[derive(Clone)]
pub enum Matcher<T> {
    /// Wildcard, matches every element along its dimension.
    Any,
    /// Matches elements equal to the example tuple in the dimension at
    /// which this matcher is placed. Other dimensions of the example
    /// are never examined.
    Equals(T),
}

impl<T> Matcher<T> {
    /// Return whether this matcher is a wildcard.
    #[inline]
    pub fn is_match_all(&self) -> bool {
        matches!(self, Matcher::Any)
    }

    /// Return the hash of the example's dimension `dim`. Valid only on
    /// non-wildcard matchers.
    pub fn key_hash<A>(&self, adapter: &A, dim: usize) -> Result<u32>
    where
        A: Adapter<Tuple = T>,
    {
        match self {
            Matcher::Equals(example) => adapter.item_hash(example, dim),
            Matcher::Any => err_at!(Fatal, msg: "key_hash on wildcard"),
        }
    }

    /// Return whether `tuple` matches this matcher along dimension `dim`.
    pub fn is_match<A>(&self, tuple: &T, adapter: &A, dim: usize) -> Result<bool>
    where
        A: Adapter<Tuple = T>,
    {
        match self {
            Matcher::Any => Ok(true),
            Matcher::Equals(example) => adapter.item_equals(tuple, example, dim),
        }
    }
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod matcher_test;
