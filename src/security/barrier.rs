//! Ordering fences for the cache-warming preambles
//!
//! The decrypt path warms its lookup tables and only then starts indexing
//! them with secret-derived bytes. That ordering is the whole
//! countermeasure, so the warm-up loop ends with a fence: without one the
//! optimizer is free to sink, merge, or hoist the table reads.

use core::sync::atomic::{compiler_fence, fence, Ordering};

/// Forbid the compiler from moving memory accesses across this point
///
/// Emits no instruction; only constrains instruction scheduling.
#[inline(always)]
pub fn compiler_barrier() {
    compiler_fence(Ordering::SeqCst);
}

/// Full fence, ordering accesses against other cores as well
#[inline(always)]
pub fn full_barrier() {
    fence(Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barriers_are_callable() {
        compiler_barrier();
        full_barrier();
    }
}
