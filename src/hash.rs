//! # Hash Family
//!
//! Purpose: Derive `D` independent candidate slot indices for a key from
//! one base hash function run with `D` distinct seeds.
//!
//! ## Design Principles
//!
//! 1. **One Function, Many Seeds**: Cuckoo hashing wants `D` independent
//!    hash functions; we approximate that by keying a single fast,
//!    non-cryptographic hash (`lookup3`/`hashlittle`) with `D` distinct
//!    initial values, the same trick the reference implementation uses.
//! 2. **Fixed Seeds**: The seed table is a compile-time constant. Changing
//!    it at runtime would silently redistribute every existing key.
//! 3. **Tolerate Collisions**: Two seeds may hash a key to the same
//!    bucket; callers (the table engine) must not assume the `D` offsets
//!    are distinct.

/// Hash cardinality: number of candidate slots a key maps to.
pub const D: usize = 4;

/// Seed constants for the `D` keyed hash passes.
///
/// Carried over verbatim from the original cuckoo implementation this
/// crate is modeled on, so hash distribution matches it exactly. Picked
/// arbitrarily as long as they are distinct.
pub const SEEDS: [u32; D] = [0x3ac5d673, 0x6d7839d0, 0x2b581cf5, 0x4dd2be0a];

#[inline]
fn rot(x: u32, k: u32) -> u32 {
    x.rotate_left(k)
}

/// Bob Jenkins' `lookup3`/`hashlittle` mix, keyed with an initial value.
///
/// A fast, non-cryptographic 32-bit hash. Processes the key in 12-byte
/// chunks with a final mixing step over the tail, matching the reference
/// algorithm's little-endian byte handling.
pub fn hashlittle(data: &[u8], seed: u32) -> u32 {
    let mut length = data.len();
    let mut a: u32 = 0xdeadbeefu32
        .wrapping_add(length as u32)
        .wrapping_add(seed);
    let mut b = a;
    let mut c = a;

    let mut chunks = data.chunks_exact(12);

    for chunk in &mut chunks {
        a = a.wrapping_add(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        b = b.wrapping_add(u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]));
        c = c.wrapping_add(u32::from_le_bytes([
            chunk[8], chunk[9], chunk[10], chunk[11],
        ]));

        a = a.wrapping_sub(c);
        a ^= rot(c, 4);
        c = c.wrapping_add(b);
        b = b.wrapping_sub(a);
        b ^= rot(a, 6);
        a = a.wrapping_add(c);
        c = c.wrapping_sub(b);
        c ^= rot(b, 8);
        b = b.wrapping_add(a);
        a = a.wrapping_sub(c);
        a ^= rot(c, 16);
        c = c.wrapping_add(b);
        b = b.wrapping_sub(a);
        b ^= rot(a, 19);
        a = a.wrapping_add(c);
        c = c.wrapping_sub(b);
        c ^= rot(b, 4);
        b = b.wrapping_add(a);

        length -= 12;
    }

    let tail = chunks.remainder();
    let mut buf = [0u8; 12];
    buf[..tail.len()].copy_from_slice(tail);

    a = a.wrapping_add(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]));
    b = b.wrapping_add(u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]));
    c = c.wrapping_add(u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]));

    if length > 0 {
        c ^= b;
        c = c.wrapping_sub(rot(b, 14));
        a ^= c;
        a = a.wrapping_sub(rot(c, 11));
        b ^= a;
        b = b.wrapping_sub(rot(a, 25));
        c ^= b;
        c = c.wrapping_sub(rot(b, 16));
        a ^= c;
        a = a.wrapping_sub(rot(c, 4));
        b ^= a;
        b = b.wrapping_sub(rot(a, 14));
        c ^= b;
        c = c.wrapping_sub(rot(b, 24));
    }

    c
}

/// Computes the `D` candidate slot offsets for `key` under `max_item` slots.
///
/// Offsets may repeat; see module docs.
pub fn candidate_offsets(key: &[u8], max_item: u32) -> [u32; D] {
    let mut offsets = [0u32; D];
    for (i, seed) in SEEDS.iter().enumerate() {
        offsets[i] = hashlittle(key, *seed) % max_item;
    }
    offsets
}
