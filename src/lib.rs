//! Package implement a persistent n-ary relation.
//!
//! A [Relation] is an immutable set of fixed-arity tuples supporting
//! partial-key retrieval over any subset of dimensions. Underneath it is
//! a hash trie whose nodes rotate round-robin through the tuple
//! dimensions, consuming 3 bits of the dimension's hash per level. Fixing
//! a dimension in a query walks a single bucket per level for that
//! dimension, pruning the search by a factor of 8 per level instead of
//! scanning the whole set.
//!
//! Mutations never touch the receiver. [Relation::add] and friends
//! return a new frozen snapshot sharing structure with the old one, so
//! applications can branch and snapshot cheaply and share frozen
//! instances across threads without synchronization. For batched loads,
//! [Relation::bulk] runs a callback against a transient copy that is
//! mutated in place and frozen on exit.
//!
//! Equality and hashing of tuple elements are supplied by the caller
//! through the [Adapter] trait, with ready-made [Unary], [Binary] and
//! [Ternary] adapters over Rust tuples and per-dimension [Comparer]
//! strategies.

use std::result;

/// Short form to compose Error values.
///
/// Here are few possible ways:
///
/// ```ignore
/// err_at!(Fatal, msg: "failure {}", cause)
/// ```
///
/// ```ignore
/// err_at!(InvalidInput, std::str::from_utf8(bytes))
/// ```
///
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod adapter;
mod error;
mod hash;
mod matcher;
mod rel;

pub use crate::adapter::{Adapter, Binary, Comparer, Natural, Ternary, Unary};
pub use crate::error::Error;
pub use crate::hash::CityHasher;
pub use crate::matcher::Matcher;
pub use crate::rel::{Depth, Iter, Matches, Relation, Stats};

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
