//! Block cipher traits and implementations
//!
//! This module defines the raw block-primitive interface and the AES
//! family implementing it. The ciphers here are ECB-style primitives:
//! each 16-byte block is processed independently, and chaining is the
//! caller's responsibility.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::Result;

pub mod aes;

// Re-exports
pub use aes::{Aes128, Aes192, Aes256};

/// Marker trait for cipher algorithms with compile-time properties
pub trait CipherAlgorithm {
    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Algorithm name
    fn name() -> &'static str;
}

/// Marker trait for specific AES key sizes
pub trait AesVariant: CipherAlgorithm {
    /// Number of rounds (Nr)
    const ROUNDS: usize;

    /// Words of expanded key consumed by the round loop
    ///
    /// The final round key is lifted out of the schedule into a separate
    /// 16-byte mask, so this is `4 * (ROUNDS + 1) - 4`.
    const EK_WORDS: usize;
}

/// Trait for raw block cipher primitives
///
/// A cipher starts out unkeyed; every block operation before a successful
/// [`set_key`](Self::set_key) (or after [`clear`](Self::clear)) fails with
/// [`Error::KeyNotSet`](crate::Error::KeyNotSet).
///
/// A single keyed instance is read-only and may be shared across threads;
/// `set_key` and `clear` are exclusive writers.
pub trait BlockCipher {
    /// The algorithm this cipher implements
    type Algorithm: CipherAlgorithm;

    /// Key type with appropriate size guarantee
    type Key: AsRef<[u8]> + AsMut<[u8]> + Clone + Zeroize;

    /// Creates a new, unkeyed cipher instance
    fn new() -> Self;

    /// Expands `key` into round-key schedules for both directions
    ///
    /// Fails with `InvalidKeyLength` (leaving any previous key intact)
    /// unless `key` is exactly `Self::Algorithm::KEY_SIZE` bytes.
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    /// Encrypts `blocks` 16-byte blocks from `input` into `output`
    fn encrypt_n(&self, input: &[u8], output: &mut [u8], blocks: usize) -> Result<()>;

    /// Decrypts `blocks` 16-byte blocks from `input` into `output`
    fn decrypt_n(&self, input: &[u8], output: &mut [u8], blocks: usize) -> Result<()>;

    /// Encrypts a buffer of whole blocks in place
    fn encrypt_blocks(&self, data: &mut [u8]) -> Result<()>;

    /// Decrypts a buffer of whole blocks in place
    fn decrypt_blocks(&self, data: &mut [u8]) -> Result<()>;

    /// Wipes all round-key material, returning the cipher to the unkeyed state
    fn clear(&mut self);

    /// Name of the implementation actually performing the block operations
    fn provider(&self) -> &'static str;

    /// Advisory number of blocks higher-level modes should batch
    fn parallelism(&self) -> u8;

    /// Returns the key size in bytes
    fn key_size() -> usize {
        Self::Algorithm::KEY_SIZE
    }

    /// Returns the block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Returns the name of the block cipher
    fn name() -> &'static str {
        Self::Algorithm::name()
    }

    /// Generate a random key
    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key;
}
