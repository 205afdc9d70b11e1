//! Constant-time software AES block cipher
//!
//! This crate implements the Advanced Encryption Standard (FIPS 197) for all
//! three key sizes as a raw 16-byte block primitive, written for platforms
//! without hardware AES instructions.
//!
//! # Security Features
//!
//! The implementation is structured around its side-channel posture:
//!
//! - The forward S-box is a bitsliced Boolean circuit; encryption performs
//!   no data-dependent table lookups.
//! - The table-driven decryption path touches every cache line of its
//!   tables before the first secret-dependent index.
//! - Round keys live in zeroizing containers and are wiped on [`BlockCipher::clear`]
//!   and on drop.
//!
//! # Example
//!
//! ```
//! use aes_ct::{Aes128, BlockCipher};
//!
//! let mut cipher = Aes128::new();
//! cipher.set_key(&[0u8; 16])?;
//!
//! let mut block = [0u8; 16];
//! cipher.encrypt_blocks(&mut block)?;
//! cipher.decrypt_blocks(&mut block)?;
//! assert_eq!(block, [0u8; 16]);
//! # Ok::<(), aes_ct::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Algorithm parameters
pub mod params;

// Secret-memory handling
pub mod security;
pub use security::{barrier, EphemeralSecret, SecretBuffer, SecretWords};

// Key containers
pub mod types;
pub use types::SecretBytes;

// Block cipher implementations
pub mod block;
pub use block::{Aes128, Aes192, Aes256, BlockCipher, CipherAlgorithm};
