//! # cuckoo-core
//!
//! A fixed-size cuckoo hash table for an in-memory key-value store: point
//! lookup, insert-or-displace, in-place update, and delete over a bounded
//! slab of constant-size slots, with pluggable eviction policies.
//!
//! This crate is deliberately narrow. It owns the data structure — slab,
//! item codec, hash family, displacement walk, eviction policy — and
//! nothing else. Networking, wire protocol parsing, process bootstrap, and
//! metrics transport are the surrounding server's job; this crate only
//! emits counters through the abstract [`metrics::MetricsSink`] it is handed.
//!
//! ## Example
//!
//! ```
//! use cuckoo_core::{CuckooConfig, CuckooTable, PolicyKind, Value};
//!
//! let config = CuckooConfig::new(64, 1024, PolicyKind::Random, false).unwrap();
//! let mut table = CuckooTable::new();
//! table.setup(config, None).unwrap();
//!
//! table.insert(b"foo", Value::Str(b"bar".to_vec()), 1_900_000_000).unwrap();
//! let slot = table.get(b"foo").unwrap().expect("present");
//! assert_eq!(table.decode(slot).unwrap().value, Value::Str(b"bar".to_vec()));
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod hash;
pub mod item;
pub mod metrics;
pub mod policy;
pub mod slab;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CuckooConfig;
pub use engine::{CuckooTable, DecodedItem, SlotRef};
pub use error::{CuckooError, CuckooResult};
pub use hash::D;
pub use item::{Value, MAX_KEY_LEN, NEVER};
pub use metrics::{AtomicMetrics, Counter, Gauge, MetricsSink, MetricsSnapshot, NullMetrics};
pub use policy::PolicyKind;
