use std::{error, fmt, result};

/// Error enumerates over all possible errors that this package
/// shall return.
///
/// Every variant carries a prefix, identifying the file and line
/// that generated the error, followed by a message. Use the
/// [err_at][crate::err_at] macro to construct them.
#[derive(Debug)]
pub enum Error {
    /// Broken internal invariant, call the programmer.
    Fatal(String, String),
    /// API called with invalid argument, like a zero-rank adapter
    /// or a matcher slice whose length differ from the rank.
    InvalidInput(String, String),
    /// Adapter method called with a dimension outside `0..rank`.
    InvalidDimension(String, String),
    /// Indexed access past the relation's count.
    IndexOutOfRange(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::{Fatal, IndexOutOfRange, InvalidDimension, InvalidInput};

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
            InvalidDimension(p, msg) => write!(f, "{} InvalidDimension: {}", p, msg),
            IndexOutOfRange(p, msg) => write!(f, "{} IndexOutOfRange: {}", p, msg),
        }
    }
}

impl error::Error for Error {}
