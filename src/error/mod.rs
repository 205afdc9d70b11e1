//! Error handling for the block cipher primitives

use core::fmt;

/// The error type for block cipher operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key material has a length the cipher does not accept
    InvalidKeyLength {
        /// Cipher that rejected the key
        context: &'static str,
        /// Length in bytes that was supplied
        actual: usize,
    },

    /// A block operation was invoked before a key was set (or after `clear`)
    KeyNotSet {
        /// Operation that required a key
        operation: &'static str,
    },

    /// Buffer length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

/// Result type for block cipher operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { context, actual } => {
                write!(f, "Invalid key length for {}: {} bytes", context, actual)
            }
            Error::KeyNotSet { operation } => {
                write!(f, "Key not set before {}", operation)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// Include the validation submodule
pub mod validate;

#[cfg(test)]
mod tests;
