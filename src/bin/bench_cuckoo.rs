//! # Table Benchmark Harness
//!
//! Purpose: Provide a dependency-free, repeatable benchmark driver for the
//! cuckoo table so baseline insert/get throughput under displacement
//! pressure can be compared over time.
//!
//! ## Design Principles
//! 1. **Deterministic Workload**: Use a fixed PRNG seed for stable comparisons.
//! 2. **Allocation Control**: Pre-build keys/values to keep setup costs off the hot path.
//! 3. **Load The Table On Purpose**: Size `max_item` below the key count so
//!    inserts routinely walk the displacement path instead of measuring an
//!    empty-table best case.

use std::env;
use std::hint::black_box;
use std::time::Instant;

use cuckoo_core::{CuckooConfig, CuckooTable, PolicyKind, Value};

const DEFAULT_KEY_COUNT: usize = 1 << 14;
const DEFAULT_OP_COUNT: usize = 200_000;
const DEFAULT_KEY_SIZE: usize = 16;
const DEFAULT_VALUE_SIZE: usize = 32;
const DEFAULT_LOAD_FACTOR_PCT: usize = 90;

struct BenchConfig {
    key_count: usize,
    op_count: usize,
    key_size: usize,
    value_size: usize,
    max_item: u32,
    chunk_size: u32,
}

impl BenchConfig {
    fn from_args() -> Self {
        let mut args = env::args().skip(1);
        let key_count = parse_usize(args.next(), DEFAULT_KEY_COUNT);
        let op_count = parse_usize(args.next(), DEFAULT_OP_COUNT);
        let key_size = parse_usize(args.next(), DEFAULT_KEY_SIZE);
        let value_size = parse_usize(args.next(), DEFAULT_VALUE_SIZE);
        let load_factor_pct = parse_usize(args.next(), DEFAULT_LOAD_FACTOR_PCT).clamp(1, 100);

        // Table capacity below the key count so a fraction of inserts land
        // on an already-occupied bucket set and must displace or evict.
        let max_item = ((key_count * 100) / load_factor_pct).max(key_count + 1) as u32;
        let chunk_size = (key_size + value_size + 32) as u32;

        BenchConfig {
            key_count,
            op_count,
            key_size,
            value_size,
            max_item,
            chunk_size,
        }
    }
}

fn parse_usize(value: Option<String>, fallback: usize) -> usize {
    value.and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}

/// Tiny deterministic PRNG used to avoid external dependencies.
///
/// XorShift is fast enough for benchmarks and keeps the workload reproducible.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    #[inline]
    fn next_index(&mut self, count: usize) -> usize {
        (self.next_u64() as usize) % count
    }
}

fn write_u64_le(value: u64, buffer: &mut [u8]) {
    let bytes = value.to_le_bytes();
    let copy_len = buffer.len().min(bytes.len());
    buffer[..copy_len].copy_from_slice(&bytes[..copy_len]);
}

fn build_buffers(count: usize, size: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut buffers = Vec::with_capacity(count);
    for i in 0..count {
        let mut buffer = vec![0u8; size];
        write_u64_le(seed ^ (i as u64), &mut buffer);
        buffers.push(buffer);
    }
    buffers
}

fn report(label: &str, ops: usize, elapsed: std::time::Duration) {
    let secs = elapsed.as_secs_f64();
    let ops_per_sec = (ops as f64) / secs;
    let nanos_per_op = (secs * 1e9) / (ops as f64);
    println!("{label}: {ops} ops in {secs:.3}s ({ops_per_sec:.0} ops/s, {nanos_per_op:.1} ns/op)");
}

fn main() {
    let config = BenchConfig::from_args();

    let table_config =
        CuckooConfig::new(config.chunk_size, config.max_item, PolicyKind::Random, false)
            .expect("bench config must build a valid table");
    let mut table = CuckooTable::new();
    table.setup(table_config, None).expect("setup must succeed");

    let keys = build_buffers(config.key_count, config.key_size, 0xA5A5_A5A5_A5A5_A5A5);
    let values = build_buffers(config.key_count, config.value_size, 0x5A5A_5A5A_5A5A_5A5A);

    println!(
        "keys={}, ops={}, key_size={}, value_size={}, max_item={}, chunk_size={}",
        config.key_count,
        config.op_count,
        config.key_size,
        config.value_size,
        config.max_item,
        config.chunk_size
    );

    let start = Instant::now();
    let mut evicted_on_insert = 0usize;
    for idx in 0..config.key_count {
        let before = table.get(&keys[idx]).unwrap().is_some();
        table
            .insert(&keys[idx], Value::Str(values[idx].clone()), u32::MAX - 1)
            .expect("insert must not fail for a well-sized bench config");
        if !before && table.get(&keys[idx]).unwrap().is_none() {
            evicted_on_insert += 1;
        }
    }
    report("INSERT", config.key_count, start.elapsed());
    println!("evicted-before-first-read: {evicted_on_insert}");

    let mut rng = XorShift64::new(0x1234_5678_9ABC_DEF0);
    let start = Instant::now();
    for _ in 0..config.op_count {
        let idx = rng.next_index(config.key_count);
        let slot = table.get(&keys[idx]).unwrap();
        black_box(slot);
    }
    report("GET", config.op_count, start.elapsed());
}
