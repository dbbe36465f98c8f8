//! # Configuration
//!
//! Purpose: Bundle and validate the parameters `setup` needs before any
//! allocation happens, instead of scattering precondition checks across
//! the engine.
//!
//! ## Design Principles
//!
//! 1. **Validate Once**: Reject bad combinations (zero capacity, a chunk
//!    size too small for the fixed overhead) at construction time.
//! 2. **Explicit Defaults**: `D` and the displacement budget have sane
//!    defaults but are visible and overridable fields, not magic numbers
//!    buried in the engine.

use crate::error::CuckooError;
use crate::hash::D;
use crate::item::item_overhead;
use crate::policy::PolicyKind;

/// Default maximum displacement-walk depth.
///
/// Larger values reduce eviction rate but raise worst-case insert latency.
pub const DEFAULT_DISPLACE_BUDGET: usize = 4;

/// Hard ceiling on the displacement-walk depth.
///
/// The walk's visited-path buffer is a fixed-size stack array (no
/// allocation after `setup`), so the configured budget must fit in it.
pub const MAX_DISPLACE_BUDGET: usize = 64;

/// Validated construction parameters for a [`crate::engine::CuckooTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuckooConfig {
    /// Size in bytes of every slot in the slab.
    pub chunk_size: u32,
    /// Number of slots in the slab.
    pub max_item: u32,
    /// Victim-selection / displacement-ordering policy.
    pub policy: PolicyKind,
    /// Whether every item carries an 8-byte CAS token.
    pub cas_enabled: bool,
    /// Maximum displacement-walk depth (`CUCKOO_DISPLACE`).
    pub displace_budget: usize,
}

impl CuckooConfig {
    /// Builds a config with the default displacement budget.
    ///
    /// Returns [`CuckooError::InvalidConfig`] if `chunk_size` cannot hold
    /// even a zero-length key/value pair, or if `max_item` is zero.
    pub fn new(
        chunk_size: u32,
        max_item: u32,
        policy: PolicyKind,
        cas_enabled: bool,
    ) -> Result<Self, CuckooError> {
        Self::with_displace_budget(
            chunk_size,
            max_item,
            policy,
            cas_enabled,
            DEFAULT_DISPLACE_BUDGET,
        )
    }

    /// Builds a config with an explicit displacement budget.
    pub fn with_displace_budget(
        chunk_size: u32,
        max_item: u32,
        policy: PolicyKind,
        cas_enabled: bool,
        displace_budget: usize,
    ) -> Result<Self, CuckooError> {
        if max_item == 0 {
            return Err(CuckooError::InvalidConfig {
                reason: "max_item must be nonzero",
            });
        }

        let overhead = item_overhead(cas_enabled) as u32;
        if chunk_size <= overhead {
            return Err(CuckooError::InvalidConfig {
                reason: "chunk_size must exceed the fixed item overhead",
            });
        }

        if (chunk_size as u64) * (max_item as u64) > usize::MAX as u64 {
            return Err(CuckooError::InvalidConfig {
                reason: "chunk_size * max_item overflows the address space",
            });
        }

        if displace_budget > MAX_DISPLACE_BUDGET {
            return Err(CuckooError::InvalidConfig {
                reason: "displace_budget exceeds the fixed walk-path capacity",
            });
        }

        Ok(CuckooConfig {
            chunk_size,
            max_item,
            policy,
            cas_enabled,
            displace_budget,
        })
    }

    /// Maximum bytes available to key + value for any item under this config.
    pub fn max_record_len(&self) -> u32 {
        self.chunk_size - item_overhead(self.cas_enabled) as u32
    }

    /// Hash cardinality. Fixed at compile time; exposed for callers that
    /// want to size their own candidate-offset buffers.
    pub const fn degree(&self) -> usize {
        D
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_capacity() {
        let err = CuckooConfig::new(64, 0, PolicyKind::Random, false).unwrap_err();
        assert_eq!(
            err,
            CuckooError::InvalidConfig {
                reason: "max_item must be nonzero"
            }
        );
    }

    #[test]
    fn rejects_undersized_chunk() {
        let err = CuckooConfig::new(4, 16, PolicyKind::Random, false).unwrap_err();
        assert!(matches!(err, CuckooError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_oversized_displace_budget() {
        let err =
            CuckooConfig::with_displace_budget(64, 16, PolicyKind::Random, false, 1_000)
                .unwrap_err();
        assert!(matches!(err, CuckooError::InvalidConfig { .. }));
    }

    #[test]
    fn accepts_sane_config() {
        let config = CuckooConfig::new(64, 16, PolicyKind::Expire, true).unwrap();
        assert_eq!(config.chunk_size, 64);
        assert_eq!(config.max_item, 16);
        assert!(config.max_record_len() < 64);
    }
}
