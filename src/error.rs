//! Error types shared by every container in the crate.

use thiserror::Error;

/// Result type for fallible container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the containers.
///
/// Absence of a key is not an error: lookups and removals return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The container holds no elements.
    #[error("List is empty")]
    Empty,

    #[error("Index: {index}, Size: {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An optional operation the implementation does not provide.
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
}
