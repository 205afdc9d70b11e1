//! Key containers
//!
//! Cipher keys are carried in [`SecretBytes`], which fixes the length in
//! the type and wipes the bytes when the value is dropped. Comparisons go
//! through `subtle` so equality checks on key material never short-circuit
//! on the first mismatching byte.

use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, Result};

/// `N` bytes of key material, zeroized on drop
///
/// The length is a type parameter, so a 24-byte key cannot be handed to a
/// cipher expecting 16 without going through the fallible slice
/// constructor. `Debug` output never shows the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> SecretBytes<N> {
    /// Wrap an existing array of key material
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// All-zero key material, typically overwritten in place afterwards
    pub fn zeroed() -> Self {
        Self::new([0u8; N])
    }

    /// Copy key material out of a slice, rejecting any length but `N`
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("SecretBytes::from_slice", slice.len(), N)?;

        let mut secret = Self::zeroed();
        secret.data.copy_from_slice(slice);
        Ok(secret)
    }

    /// Draw fresh key material from a cryptographic RNG
    pub fn random<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self {
        let mut secret = Self::zeroed();
        rng.fill_bytes(&mut secret.data);
        secret
    }

    /// Length in bytes (the const parameter `N`)
    pub fn len(&self) -> usize {
        N
    }

    /// True only for the degenerate `N == 0` instantiation
    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time: the comparison must not leak a prefix length
        self.data.ct_eq(&other.data).into()
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{}>([REDACTED])", N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_slice_length_check() {
        assert!(SecretBytes::<16>::from_slice(&[0u8; 16]).is_ok());

        let err = SecretBytes::<16>::from_slice(&[0u8; 15]).unwrap_err();
        match err {
            Error::Length {
                expected, actual, ..
            } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            _ => panic!("Expected Length error"),
        }
    }

    #[test]
    fn test_constant_time_eq() {
        let a = SecretBytes::<16>::new([0xAA; 16]);
        let b = SecretBytes::<16>::new([0xAA; 16]);
        let c = SecretBytes::<16>::new([0xAB; 16]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_redacted_debug() {
        let key = SecretBytes::<32>::zeroed();
        assert_eq!(format!("{:?}", key), "SecretBytes<32>([REDACTED])");
    }
}
