//! # Metrics Sink
//!
//! Purpose: Give the engine somewhere to report activity without coupling
//! it to any particular metrics transport (the surrounding server decides
//! how, or whether, to ship these numbers anywhere).
//!
//! ## Design Principles
//!
//! 1. **Accumulator Pattern**: One `AtomicU64` per counter/gauge so record
//!    calls are zero-allocation and cheap, mirroring the server-side
//!    metrics aggregator this crate is modeled on.
//! 2. **Opaque To The Engine**: The engine only ever increments or
//!    decrements named counters through the `MetricsSink` trait; it never
//!    reads them back.
//! 3. **No-Op By Default**: Metrics are optional. `NullMetrics` makes
//!    "disabled" a real, zero-cost implementation rather than an `Option`
//!    check sprinkled through the engine.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Counters and gauges the cuckoo table engine reports on.
///
/// Implementations must tolerate being called from a single thread only
/// (the engine itself is not `Sync`); no internal locking is required.
pub trait MetricsSink: Send + Sync {
    /// A call-count counter was incremented.
    fn incr(&self, counter: Counter);
    /// A per-item gauge changed by `delta` (may be negative).
    fn adjust_gauge(&self, gauge: Gauge, delta: i64);
}

/// Monotonic call-count / event-count counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    CuckooGet,
    CuckooInsert,
    CuckooUpdate,
    CuckooDelete,
    CuckooDisplace,
    CuckooInsertEx,
    CuckooUpdateEx,
    ItemInsert,
    ItemDelete,
    ItemDisplace,
    ItemEvict,
    ItemExpire,
}

/// Current-value gauges tracking live item footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gauge {
    ItemCurr,
    ItemKeyCurr,
    ItemValCurr,
    ItemDataCurr,
}

/// No-op sink used when the host doesn't care about metrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMetrics;

impl MetricsSink for NullMetrics {
    fn incr(&self, _counter: Counter) {}
    fn adjust_gauge(&self, _gauge: Gauge, _delta: i64) {}
}

/// Point-in-time snapshot of every counter and gauge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub cuckoo_get: u64,
    pub cuckoo_insert: u64,
    pub cuckoo_update: u64,
    pub cuckoo_delete: u64,
    pub cuckoo_displace: u64,
    pub cuckoo_insert_ex: u64,
    pub cuckoo_update_ex: u64,
    pub item_insert: u64,
    pub item_delete: u64,
    pub item_displace: u64,
    pub item_evict: u64,
    pub item_expire: u64,
    pub item_curr: i64,
    pub item_key_curr: i64,
    pub item_val_curr: i64,
    pub item_data_curr: i64,
}

/// Thread-safe metrics aggregator backed by atomics.
///
/// `Ordering::Relaxed` is sufficient throughout: counters are independent
/// and callers only need eventual consistency when sampling, not a
/// cross-field happens-before relation.
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    cuckoo_get: AtomicU64,
    cuckoo_insert: AtomicU64,
    cuckoo_update: AtomicU64,
    cuckoo_delete: AtomicU64,
    cuckoo_displace: AtomicU64,
    cuckoo_insert_ex: AtomicU64,
    cuckoo_update_ex: AtomicU64,
    item_insert: AtomicU64,
    item_delete: AtomicU64,
    item_displace: AtomicU64,
    item_evict: AtomicU64,
    item_expire: AtomicU64,
    item_curr: AtomicI64,
    item_key_curr: AtomicI64,
    item_val_curr: AtomicI64,
    item_data_curr: AtomicI64,
}

impl AtomicMetrics {
    /// Creates a fresh, zeroed metrics aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a point-in-time snapshot of every counter and gauge.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cuckoo_get: self.cuckoo_get.load(Ordering::Relaxed),
            cuckoo_insert: self.cuckoo_insert.load(Ordering::Relaxed),
            cuckoo_update: self.cuckoo_update.load(Ordering::Relaxed),
            cuckoo_delete: self.cuckoo_delete.load(Ordering::Relaxed),
            cuckoo_displace: self.cuckoo_displace.load(Ordering::Relaxed),
            cuckoo_insert_ex: self.cuckoo_insert_ex.load(Ordering::Relaxed),
            cuckoo_update_ex: self.cuckoo_update_ex.load(Ordering::Relaxed),
            item_insert: self.item_insert.load(Ordering::Relaxed),
            item_delete: self.item_delete.load(Ordering::Relaxed),
            item_displace: self.item_displace.load(Ordering::Relaxed),
            item_evict: self.item_evict.load(Ordering::Relaxed),
            item_expire: self.item_expire.load(Ordering::Relaxed),
            item_curr: self.item_curr.load(Ordering::Relaxed),
            item_key_curr: self.item_key_curr.load(Ordering::Relaxed),
            item_val_curr: self.item_val_curr.load(Ordering::Relaxed),
            item_data_curr: self.item_data_curr.load(Ordering::Relaxed),
        }
    }

    fn counter_cell(&self, counter: Counter) -> &AtomicU64 {
        match counter {
            Counter::CuckooGet => &self.cuckoo_get,
            Counter::CuckooInsert => &self.cuckoo_insert,
            Counter::CuckooUpdate => &self.cuckoo_update,
            Counter::CuckooDelete => &self.cuckoo_delete,
            Counter::CuckooDisplace => &self.cuckoo_displace,
            Counter::CuckooInsertEx => &self.cuckoo_insert_ex,
            Counter::CuckooUpdateEx => &self.cuckoo_update_ex,
            Counter::ItemInsert => &self.item_insert,
            Counter::ItemDelete => &self.item_delete,
            Counter::ItemDisplace => &self.item_displace,
            Counter::ItemEvict => &self.item_evict,
            Counter::ItemExpire => &self.item_expire,
        }
    }

    fn gauge_cell(&self, gauge: Gauge) -> &AtomicI64 {
        match gauge {
            Gauge::ItemCurr => &self.item_curr,
            Gauge::ItemKeyCurr => &self.item_key_curr,
            Gauge::ItemValCurr => &self.item_val_curr,
            Gauge::ItemDataCurr => &self.item_data_curr,
        }
    }
}

impl MetricsSink for AtomicMetrics {
    fn incr(&self, counter: Counter) {
        self.counter_cell(counter).fetch_add(1, Ordering::Relaxed);
    }

    fn adjust_gauge(&self, gauge: Gauge, delta: i64) {
        self.gauge_cell(gauge).fetch_add(delta, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_and_gauges_accumulate() {
        let metrics = AtomicMetrics::new();
        metrics.incr(Counter::CuckooGet);
        metrics.incr(Counter::CuckooGet);
        metrics.incr(Counter::ItemEvict);
        metrics.adjust_gauge(Gauge::ItemCurr, 3);
        metrics.adjust_gauge(Gauge::ItemCurr, -1);

        let snap = metrics.snapshot();
        assert_eq!(snap.cuckoo_get, 2);
        assert_eq!(snap.item_evict, 1);
        assert_eq!(snap.item_curr, 2);
    }

    #[test]
    fn null_metrics_is_inert() {
        let metrics = NullMetrics;
        metrics.incr(Counter::CuckooInsert);
        metrics.adjust_gauge(Gauge::ItemDataCurr, 100);
        // No observable state; this just must not panic.
    }
}
