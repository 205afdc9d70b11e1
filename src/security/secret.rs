//! Zeroizing containers for key material
//!
//! Round keys and masks spend the whole cipher lifetime in these types.
//! Dropping any of them wipes the contents through `zeroize`, which the
//! compiler cannot optimize away, and none of them will print their
//! contents through `Debug`.

use core::fmt;
use core::ops::{Deref, DerefMut};
use zeroize::{Zeroize, ZeroizeOnDrop};

macro_rules! secret_array {
    ($(#[$doc:meta])* $name:ident, $elem:ty) => {
        $(#[$doc])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name<const N: usize> {
            data: [$elem; N],
        }

        impl<const N: usize> $name<N> {
            /// Take ownership of existing contents
            pub fn new(data: [$elem; N]) -> Self {
                Self { data }
            }

            /// A buffer of `N` zero elements
            pub fn zeroed() -> Self {
                Self { data: [0; N] }
            }

            /// Number of elements (the const parameter `N`)
            pub fn len(&self) -> usize {
                N
            }

            /// True only for the degenerate `N == 0` instantiation
            pub fn is_empty(&self) -> bool {
                N == 0
            }

            /// Borrow the contents as a slice
            pub fn as_slice(&self) -> &[$elem] {
                &self.data
            }

            /// Borrow the contents mutably as a slice
            pub fn as_mut_slice(&mut self) -> &mut [$elem] {
                &mut self.data
            }

            /// Borrow the contents with the length still in the type
            pub fn as_array(&self) -> &[$elem; N] {
                &self.data
            }
        }

        impl<const N: usize> AsRef<[$elem]> for $name<N> {
            fn as_ref(&self) -> &[$elem] {
                &self.data
            }
        }

        impl<const N: usize> AsMut<[$elem]> for $name<N> {
            fn as_mut(&mut self) -> &mut [$elem] {
                &mut self.data
            }
        }

        impl<const N: usize> fmt::Debug for $name<N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>([REDACTED])", stringify!($name), N)
            }
        }
    };
}

secret_array!(
    /// `N` secret bytes, wiped on drop
    ///
    /// Holds the final-round masks and any other fixed-size byte-level
    /// key material.
    SecretBuffer,
    u8
);

secret_array!(
    /// `N` secret 32-bit words, wiped on drop
    ///
    /// The expanded round-key schedules are words, not bytes; this keeps
    /// them under the same wiping discipline without round-tripping
    /// through a byte view.
    SecretWords,
    u32
);

/// Scratch value wiped as soon as it goes out of scope
///
/// Used for intermediates that hold key material only briefly, like the
/// key-schedule working buffers: the wrapper guarantees the wipe happens
/// on every exit path, early returns and panics included.
pub struct EphemeralSecret<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> EphemeralSecret<T> {
    /// Wrap a value for scope-bound wiping
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }
}

impl<T: Zeroize> Drop for EphemeralSecret<T> {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<T: Zeroize> AsRef<T> for EphemeralSecret<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

impl<T: Zeroize> AsMut<T> for EphemeralSecret<T> {
    fn as_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: Zeroize> Deref for EphemeralSecret<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Zeroize> DerefMut for EphemeralSecret<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T: Zeroize> fmt::Debug for EphemeralSecret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EphemeralSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_buffer_basic() {
        let mut buffer = SecretBuffer::<16>::new([42u8; 16]);
        assert_eq!(buffer.len(), 16);
        assert_eq!(buffer.as_slice()[0], 42);

        buffer.as_mut_slice()[0] = 1;
        assert_eq!(buffer.as_slice()[0], 1);
        assert_eq!(buffer.as_array().len(), 16);
    }

    #[test]
    fn test_secret_buffer_zeroed() {
        let zeroed = SecretBuffer::<16>::zeroed();
        assert_eq!(zeroed.as_slice(), &[0u8; 16]);
    }

    #[test]
    fn test_secret_words_basic() {
        let mut words = SecretWords::<4>::new([0xdeadbeef; 4]);
        assert_eq!(words.len(), 4);
        assert_eq!(words.as_slice()[3], 0xdeadbeef);

        words.as_mut_slice()[3] = 1;
        assert_eq!(words.as_slice()[3], 1);

        words.zeroize();
        assert_eq!(words.as_slice(), &[0u32; 4]);
    }

    #[test]
    fn test_redacted_debug() {
        let buffer = SecretBuffer::<16>::new([0xAA; 16]);
        assert_eq!(format!("{:?}", buffer), "SecretBuffer<16>([REDACTED])");

        let words = SecretWords::<4>::zeroed();
        assert_eq!(format!("{:?}", words), "SecretWords<4>([REDACTED])");

        let scratch = EphemeralSecret::new([1u32; 4]);
        assert_eq!(format!("{:?}", scratch), "EphemeralSecret([REDACTED])");
    }

    #[test]
    fn test_ephemeral_secret_access() {
        let mut secret = EphemeralSecret::new([1u32, 2, 3, 4]);
        assert_eq!(secret[1], 2);

        secret.as_mut()[1] = 5;
        assert_eq!(secret[1], 5);
    }
}
