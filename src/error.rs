//! Error types for merged weak collections.

use thiserror::Error;

/// Errors returned when building a merged view.
///
/// Every operation on a constructed view is total, so construction is the
/// only place an error can surface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A candidate source is not the collection the merge operation expects.
    #[error("{operation} expects {expected} (argument {index} is not one)")]
    InvalidArgument {
        /// The merge operation that rejected the candidate.
        operation: &'static str,
        /// The collection abstraction the operation accepts.
        expected: &'static str,
        /// Position of the first rejected candidate.
        index: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
