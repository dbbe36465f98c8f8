//! # Error Types
//!
//! Purpose: Give every failure mode named by the core a distinct,
//! caller-recoverable variant instead of panicking or aborting.
//!
//! ## Design Principles
//!
//! 1. **Closed Set**: The core has a small, fixed list of failure modes;
//!    a closed enum documents all of them at the type level.
//! 2. **No Silent Failure**: Every error propagates to the caller as a
//!    `Result`; the core never logs-and-swallows on normal inputs.
//! 3. **Eviction Is Not An Error**: Displacement succeeding by evicting a
//!    live item is a normal `insert` outcome, not represented here.

use thiserror::Error;

/// All recoverable failure modes the core can report.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CuckooError {
    /// `klen + vlen + ITEM_OVERHEAD` exceeds `chunk_size`.
    #[error("record does not fit in a slot of this chunk size")]
    Oversized,

    /// Caller supplied `expire == 0`, which is reserved to mean "empty".
    #[error("expire of 0 is reserved for empty slots and cannot be stored")]
    InvalidExpire,

    /// `setup` called while the engine already holds a live slab.
    #[error("cuckoo table has already been set up")]
    AlreadyInitialized,

    /// Slab allocation failed (size overflow or allocator refusal).
    #[error("failed to allocate the cuckoo slab")]
    AllocFailed,

    /// An operation was attempted before `setup` or after `teardown`.
    #[error("cuckoo table has not been set up")]
    NotInitialized,

    /// `CuckooConfig` construction was rejected.
    #[error("invalid cuckoo table configuration: {reason}")]
    InvalidConfig {
        /// Human-readable reason, kept out of the error code path.
        reason: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type CuckooResult<T> = Result<T, CuckooError>;
