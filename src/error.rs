//! The error module defines the errors a currency operation can raise.
//!
//! All errors are raised synchronously at the point of violation and a
//! failed operation leaves the value it was called on unchanged.

use thiserror::Error;

/// Define our error enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation had to merge or compare keys and metal but was given no
    /// usable conversion rate. A rate of zero (or below) counts as missing.
    #[error("conversion rate is required when mixing keys and metal")]
    MissingConversion,
    /// A subtraction would need to borrow or remove more keys than are
    /// present.
    #[error("operation requires more keys than are present")]
    InsufficientKeys,
}

/// Standard result, but curried with our error enum.
pub type Result<T> = std::result::Result<T, Error>;
