//! # Slab
//!
//! Purpose: Own the single contiguous allocation backing the table and
//! translate slot indices to byte ranges within it. The slab knows
//! nothing about item encoding or validity; it just hands out slices.
//!
//! ## Design Principles
//!
//! 1. **One Allocation**: The whole table is one `Vec<u8>`; no per-item
//!    allocation ever happens, which is load-bearing for predictable
//!    latency (see the crate's design notes).
//! 2. **Index, Not Pointer**: Slots are addressed by `u32` index, not by
//!    raw pointer, so there is nothing for callers to dangle.

use crate::error::CuckooError;

/// The contiguous array of fixed-size slots backing a cuckoo table.
#[derive(Debug)]
pub struct Slab {
    bytes: Vec<u8>,
    chunk_size: usize,
    max_item: u32,
}

impl Slab {
    /// Allocates a zeroed slab of `max_item` slots of `chunk_size` bytes
    /// each. Returns [`CuckooError::AllocFailed`] if the total size would
    /// overflow `usize`.
    pub fn new(chunk_size: u32, max_item: u32) -> Result<Self, CuckooError> {
        let total = (chunk_size as u64)
            .checked_mul(max_item as u64)
            .ok_or(CuckooError::AllocFailed)?;
        let total = usize::try_from(total).map_err(|_| CuckooError::AllocFailed)?;

        Ok(Slab {
            bytes: vec![0u8; total],
            chunk_size: chunk_size as usize,
            max_item,
        })
    }

    /// Number of slots in the slab.
    #[inline]
    pub fn len(&self) -> u32 {
        self.max_item
    }

    /// Size in bytes of every slot.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    fn range(&self, index: u32) -> std::ops::Range<usize> {
        let start = index as usize * self.chunk_size;
        start..start + self.chunk_size
    }

    /// Borrows slot `index` immutably.
    #[inline]
    pub fn slot(&self, index: u32) -> &[u8] {
        let range = self.range(index);
        &self.bytes[range]
    }

    /// Borrows slot `index` mutably.
    #[inline]
    pub fn slot_mut(&mut self, index: u32) -> &mut [u8] {
        let range = self.range(index);
        &mut self.bytes[range]
    }

    /// Copies the full contents of `src` over `dst`. Used by the
    /// displacement walk to bump an occupant to its new slot.
    pub fn copy_slot(&mut self, src: u32, dst: u32) {
        if src == dst {
            return;
        }
        let chunk = self.chunk_size;
        let (lo, hi) = if src < dst { (src, dst) } else { (dst, src) };
        let split = (lo as usize + 1) * chunk;
        let (left, right) = self.bytes.split_at_mut(split);
        if src < dst {
            let from = &left[lo as usize * chunk..];
            let to_start = (hi as usize - lo as usize - 1) * chunk;
            right[to_start..to_start + chunk].copy_from_slice(from);
        } else {
            let to = &mut left[lo as usize * chunk..];
            let from_start = (hi as usize - lo as usize - 1) * chunk;
            to.copy_from_slice(&right[from_start..from_start + chunk]);
        }
    }

    /// Zeroes the entire slab in place; every slot becomes empty.
    pub fn zero(&mut self) {
        self.bytes.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_independently_addressable() {
        let mut slab = Slab::new(8, 4).unwrap();
        slab.slot_mut(0)[0] = 0xaa;
        slab.slot_mut(1)[0] = 0xbb;
        assert_eq!(slab.slot(0)[0], 0xaa);
        assert_eq!(slab.slot(1)[0], 0xbb);
    }

    #[test]
    fn copy_slot_moves_bytes_forward_and_backward() {
        let mut slab = Slab::new(4, 4).unwrap();
        slab.slot_mut(0).copy_from_slice(&[1, 2, 3, 4]);
        slab.copy_slot(0, 2);
        assert_eq!(slab.slot(2), &[1, 2, 3, 4]);

        slab.slot_mut(3).copy_from_slice(&[9, 9, 9, 9]);
        slab.copy_slot(3, 1);
        assert_eq!(slab.slot(1), &[9, 9, 9, 9]);
    }

    #[test]
    fn zero_clears_every_slot() {
        let mut slab = Slab::new(4, 2).unwrap();
        slab.slot_mut(0).copy_from_slice(&[1, 2, 3, 4]);
        slab.zero();
        assert_eq!(slab.slot(0), &[0, 0, 0, 0]);
    }

    #[test]
    fn overflowing_allocation_is_rejected() {
        let err = Slab::new(u32::MAX, u32::MAX).unwrap_err();
        assert_eq!(err, CuckooError::AllocFailed);
    }
}
