//! Secret-memory handling
//!
//! Zeroizing containers for key material and the memory-barrier utilities
//! used by the cache-timing countermeasures.

pub mod barrier;

mod secret;

pub use secret::{EphemeralSecret, SecretBuffer, SecretWords};
