//! # Eviction / Displacement Policy
//!
//! Purpose: Decide which of `D` candidate slots to sacrifice when an
//! insert finds every candidate occupied, and in what order to try
//! displacement targets during the walk.
//!
//! ## Design Principles
//!
//! 1. **Closed, Small Set**: Two policies exist today (`RANDOM`, `EXPIRE`);
//!    a tagged enum is a better fit than a trait object for a set this
//!    small and this unlikely to grow at runtime.
//! 2. **Policy Knows Nothing About The Slab**: Both operations take the
//!    caller-supplied `expire` values alongside the offsets, so this
//!    module has no dependency on the slab or item codec.

use rand::Rng;

use crate::hash::D;

/// Victim-selection / displacement-ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Pick a uniformly random candidate.
    Random,
    /// Pick the candidate with the smallest `expire` (earliest to die).
    Expire,
}

impl PolicyKind {
    /// Chooses a single victim among `offsets`, given each candidate's
    /// current `expire` value (`expires[i]` corresponds to `offsets[i]`).
    ///
    /// Used when a fresh insert finds every candidate bucket occupied and
    /// must pick exactly one slot to start a displacement chain from.
    pub fn select(&self, offsets: &[u32; D], expires: &[u32; D]) -> u32 {
        match self {
            PolicyKind::Random => {
                let idx = rand::thread_rng().gen_range(0..D);
                offsets[idx]
            }
            PolicyKind::Expire => {
                let mut selected = offsets[0];
                let mut min = expires[0];
                for i in 1..D {
                    if expires[i] < min {
                        min = expires[i];
                        selected = offsets[i];
                    }
                }
                selected
            }
        }
    }

    /// Returns a permutation of `offsets` reflecting displacement
    /// preference order.
    ///
    /// `RANDOM` rotates starting at a uniformly random index; `EXPIRE` is
    /// a stable ascending insertion sort by `expire`.
    pub fn order(&self, offsets: &[u32; D], expires: &[u32; D]) -> [u32; D] {
        match self {
            PolicyKind::Random => {
                let start = rand::thread_rng().gen_range(0..D);
                let mut ordered = [0u32; D];
                for i in 0..D {
                    ordered[i] = offsets[(start + i) % D];
                }
                ordered
            }
            PolicyKind::Expire => {
                let mut ordered = *offsets;
                let mut exp = *expires;
                // Insertion sort: small D, stability matters more than speed.
                for i in 1..D {
                    let mut j = i;
                    while j > 0 && exp[j] < exp[j - 1] {
                        exp.swap(j, j - 1);
                        ordered.swap(j, j - 1);
                        j -= 1;
                    }
                }
                ordered
            }
        }
    }
}
