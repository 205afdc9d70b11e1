//! Validation utilities for block cipher operations

use super::{Error, Result};

/// Validate that a key length is one the given cipher accepts
#[inline(always)]
pub fn key_length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidKeyLength { context, actual });
    }
    Ok(())
}

/// Validate an exact length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::Length {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate that a buffer is an exact multiple of the block size
#[inline(always)]
pub fn block_multiple(context: &'static str, actual: usize, block: usize) -> Result<()> {
    if actual % block != 0 {
        return Err(Error::Length {
            context,
            expected: (actual / block + 1) * block,
            actual,
        });
    }
    Ok(())
}
