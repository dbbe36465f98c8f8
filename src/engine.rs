//! # Table Engine
//!
//! Purpose: Implement `get`/`insert`/`update`/`delete` and the bounded
//! displacement walk that makes room for a new key, tying together the
//! slab, item codec, hash family, and policy.
//!
//! ## Design Principles
//!
//! 1. **One Mutator**: The engine is the only component that ever
//!    touches the slab; slab, codec, and hash modules stay dumb.
//! 2. **Borrow-Scoped Slot Refs**: `get` hands back a lightweight `Copy`
//!    index (`SlotRef`); decoding it borrows the engine immutably so the
//!    borrow checker — not caller discipline — rejects retaining a view
//!    across a later `&mut self` call.
//! 3. **Bounded Work, No Late Allocation**: The displacement walk's
//!    visited-path buffer is a fixed-size stack array sized to the
//!    configured budget; no allocation happens after `setup`.
//!
//! ## Structure Overview
//!
//! ```text
//! CuckooTable
//!   └── state: State
//!         ├── Uninitialized
//!         └── Ready(TableState)
//!               ├── slab: Slab
//!               ├── config: CuckooConfig
//!               ├── cas_counter: u64
//!               ├── metrics: Arc<dyn MetricsSink>
//!               └── clock: Arc<dyn Clock>
//! ```

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::CuckooConfig;
use crate::error::{CuckooError, CuckooResult};
use crate::hash::{candidate_offsets, D};
use crate::item::{self, Value, NEVER};
use crate::metrics::{Counter, Gauge, MetricsSink, NullMetrics};
use crate::slab::Slab;

/// Lightweight handle to a slot returned by [`CuckooTable::get`].
///
/// Plain `Copy` index, no lifetime: the literal translation of the C
/// pointer this crate is modeled on. Valid only until the next mutating
/// call on the table that produced it; using a stale handle does not
/// corrupt memory, but may read or update an unrelated key that has since
/// taken over the slot. That contract is documented, not enforced by the
/// type system, exactly as worded by the design this crate follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    index: u32,
}

impl SlotRef {
    /// The raw slab index this handle refers to.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// A decoded view of an item, borrowed from the table.
///
/// Borrowing `&CuckooTable` immutably means this view cannot outlive a
/// subsequent `&mut self` call on the same table: the borrow checker
/// enforces the "invalidated by the next mutation" rule from the design
/// this engine follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedItem<'a> {
    /// The stored key.
    pub key: &'a [u8],
    /// The stored value.
    pub value: Value,
    /// Absolute expiry (seconds); `NEVER` means no expiry.
    pub expire: u32,
    /// CAS token, if CAS is enabled for this table.
    pub cas: Option<u64>,
}

struct TableState {
    slab: Slab,
    config: CuckooConfig,
    cas_counter: u64,
    metrics: Arc<dyn MetricsSink>,
    clock: Arc<dyn Clock>,
}

enum State {
    Uninitialized,
    Ready(TableState),
}

/// The fixed-size cuckoo hash table engine.
///
/// Single-threaded by design: no internal synchronization guards the
/// slab, so concurrent callers must serialize their own access (see the
/// crate's concurrency design notes).
pub struct CuckooTable {
    state: State,
}

impl Default for CuckooTable {
    fn default() -> Self {
        CuckooTable {
            state: State::Uninitialized,
        }
    }
}

impl CuckooTable {
    /// Creates an uninitialized engine. Call [`CuckooTable::setup`] before
    /// using it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the slab and brings the engine up with the wall clock.
    ///
    /// Fails with [`CuckooError::AlreadyInitialized`] if called twice
    /// without an intervening [`CuckooTable::teardown`].
    pub fn setup(
        &mut self,
        config: CuckooConfig,
        metrics: Option<Arc<dyn MetricsSink>>,
    ) -> CuckooResult<()> {
        self.setup_with_clock(config, metrics, Arc::new(SystemClock))
    }

    /// Same as [`CuckooTable::setup`] but with an explicit clock source;
    /// tests use this to control expiry deterministically.
    pub fn setup_with_clock(
        &mut self,
        config: CuckooConfig,
        metrics: Option<Arc<dyn MetricsSink>>,
        clock: Arc<dyn Clock>,
    ) -> CuckooResult<()> {
        if matches!(self.state, State::Ready(_)) {
            return Err(CuckooError::AlreadyInitialized);
        }

        let slab = Slab::new(config.chunk_size, config.max_item)?;
        info!(
            chunk_size = config.chunk_size,
            max_item = config.max_item,
            cas_enabled = config.cas_enabled,
            "cuckoo table set up"
        );

        self.state = State::Ready(TableState {
            slab,
            config,
            cas_counter: 0,
            metrics: metrics.unwrap_or_else(|| Arc::new(NullMetrics)),
            clock,
        });

        Ok(())
    }

    /// Releases the slab. Idempotent: logs a warning if never set up.
    pub fn teardown(&mut self) {
        if matches!(self.state, State::Uninitialized) {
            warn!("cuckoo table teardown called but it was never set up");
            return;
        }
        info!("cuckoo table torn down");
        self.state = State::Uninitialized;
    }

    /// Zeroes the slab in place; every slot becomes empty. Idempotent.
    pub fn reset(&mut self) -> CuckooResult<()> {
        let state = self.ready_mut()?;
        state.slab.zero();
        state.cas_counter = 0;
        info!("cuckoo table reset");
        Ok(())
    }

    fn ready(&self) -> CuckooResult<&TableState> {
        match &self.state {
            State::Ready(s) => Ok(s),
            State::Uninitialized => Err(CuckooError::NotInitialized),
        }
    }

    fn ready_mut(&mut self) -> CuckooResult<&mut TableState> {
        match &mut self.state {
            State::Ready(s) => Ok(s),
            State::Uninitialized => Err(CuckooError::NotInitialized),
        }
    }

    /// Looks up `key`. Returns a [`SlotRef`] if a live item matches.
    ///
    /// Does not modify the table, and does not mark expired slots.
    pub fn get(&self, key: &[u8]) -> CuckooResult<Option<SlotRef>> {
        let state = self.ready()?;
        state.metrics.incr(Counter::CuckooGet);

        let now = state.clock.now_secs();
        let offsets = candidate_offsets(key, state.config.max_item);

        for off in offsets {
            let slot = state.slab.slot(off);
            if item::is_valid(slot, now) && item::matches(slot, key, state.config.cas_enabled) {
                trace!(offset = off, "get hit");
                return Ok(Some(SlotRef { index: off }));
            }
        }

        trace!("get miss");
        Ok(None)
    }

    /// Decodes the item at `slot`, borrowing the table immutably.
    pub fn decode(&self, slot: SlotRef) -> CuckooResult<DecodedItem<'_>> {
        let state = self.ready()?;
        let cas_enabled = state.config.cas_enabled;
        let raw = state.slab.slot(slot.index);

        Ok(DecodedItem {
            key: item::slot_key(raw, cas_enabled),
            value: item::decode_value(raw, cas_enabled),
            expire: item::slot_expire(raw),
            cas: item::slot_cas(raw, cas_enabled),
        })
    }

    /// Inserts a brand-new key, displacing or evicting if necessary.
    ///
    /// Does not check for a prior occurrence of `key`; callers wanting
    /// replace semantics should `get` first and route to
    /// [`CuckooTable::update`].
    pub fn insert(&mut self, key: &[u8], value: Value, expire: u32) -> CuckooResult<()> {
        let state = self.ready_mut()?;
        state.metrics.incr(Counter::CuckooInsert);

        if expire == 0 {
            warn!("insert rejected: expire of 0 is reserved for empty slots");
            return Err(CuckooError::InvalidExpire);
        }

        let too_long_for_klen_field = key.len() > item::MAX_KEY_LEN;
        let too_big_for_slot =
            item::encoded_len(key, &value, state.config.cas_enabled) > state.config.chunk_size as usize;
        if too_long_for_klen_field || too_big_for_slot {
            state.metrics.incr(Counter::CuckooInsertEx);
            return Err(CuckooError::Oversized);
        }

        let now = state.clock.now_secs();
        let offsets = candidate_offsets(key, state.config.max_item);

        let mut chosen = None;
        for off in offsets {
            let slot = state.slab.slot(off);
            if !item::is_valid(slot, now) {
                if item::is_expired(slot, now) {
                    decrement_item_gauges(&state.metrics, slot, state.config.cas_enabled);
                    state.metrics.incr(Counter::ItemExpire);
                }
                chosen = Some(off);
                break;
            }
        }

        let target = match chosen {
            Some(off) => off,
            None => {
                let mut expires = [0u32; D];
                for (i, &o) in offsets.iter().enumerate() {
                    expires[i] = item::slot_expire(state.slab.slot(o));
                }
                let selected = state.config.policy.select(&offsets, &expires);
                displacement_walk(state, selected);
                selected
            }
        };

        let cas = if state.config.cas_enabled {
            state.cas_counter = state.cas_counter.wrapping_add(1);
            Some(state.cas_counter)
        } else {
            None
        };

        let cas_enabled = state.config.cas_enabled;
        item::item_set(state.slab.slot_mut(target), key, &value, expire, cas_enabled, cas)?;

        state.metrics.incr(Counter::ItemInsert);
        increment_item_gauges(&state.metrics, key.len(), value.encoded_len());

        Ok(())
    }

    /// Replaces the value and expiry of the item at `slot`, preserving its
    /// key. `slot` must come from a `get` not yet invalidated by an
    /// intervening mutation (see [`SlotRef`]).
    pub fn update(&mut self, slot: SlotRef, value: Value, expire: u32) -> CuckooResult<()> {
        let state = self.ready_mut()?;
        state.metrics.incr(Counter::CuckooUpdate);

        if expire == 0 {
            warn!("update rejected: expire of 0 is reserved for empty slots");
            return Err(CuckooError::InvalidExpire);
        }

        let cas_enabled = state.config.cas_enabled;
        let raw = state.slab.slot(slot.index);
        let klen = item::slot_klen(raw) as usize;
        let old_vlen = item::slot_vlen(raw) as usize;

        if item::item_overhead(cas_enabled) + klen + value.encoded_len()
            > state.config.chunk_size as usize
        {
            state.metrics.incr(Counter::CuckooUpdateEx);
            return Err(CuckooError::Oversized);
        }

        state
            .metrics
            .adjust_gauge(Gauge::ItemValCurr, -(old_vlen as i64));
        state
            .metrics
            .adjust_gauge(Gauge::ItemDataCurr, -(old_vlen as i64));

        let cas = if cas_enabled {
            state.cas_counter = state.cas_counter.wrapping_add(1);
            Some(state.cas_counter)
        } else {
            None
        };

        let new_vlen = value.encoded_len();
        item::item_update(state.slab.slot_mut(slot.index), &value, expire, cas_enabled, cas)?;

        state
            .metrics
            .adjust_gauge(Gauge::ItemValCurr, new_vlen as i64);
        state
            .metrics
            .adjust_gauge(Gauge::ItemDataCurr, new_vlen as i64);

        Ok(())
    }

    /// Deletes `key` if present. Returns whether a live item was removed.
    pub fn delete(&mut self, key: &[u8]) -> CuckooResult<bool> {
        {
            let state = self.ready()?;
            state.metrics.incr(Counter::CuckooDelete);
        }

        match self.get(key)? {
            Some(slot) => {
                let state = self.ready_mut()?;
                let cas_enabled = state.config.cas_enabled;
                decrement_item_gauges(&state.metrics, state.slab.slot(slot.index), cas_enabled);
                state.metrics.incr(Counter::ItemDelete);
                item::item_delete(state.slab.slot_mut(slot.index));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn increment_item_gauges(metrics: &Arc<dyn MetricsSink>, klen: usize, vlen: usize) {
    metrics.adjust_gauge(Gauge::ItemCurr, 1);
    metrics.adjust_gauge(Gauge::ItemKeyCurr, klen as i64);
    metrics.adjust_gauge(Gauge::ItemValCurr, vlen as i64);
    metrics.adjust_gauge(Gauge::ItemDataCurr, (klen + vlen) as i64);
}

fn decrement_item_gauges(metrics: &Arc<dyn MetricsSink>, slot: &[u8], cas_enabled: bool) {
    let klen = item::slot_klen(slot) as i64;
    let vlen = item::slot_vlen(slot) as i64;
    metrics.adjust_gauge(Gauge::ItemCurr, -1);
    metrics.adjust_gauge(Gauge::ItemKeyCurr, -klen);
    metrics.adjust_gauge(Gauge::ItemValCurr, -vlen);
    metrics.adjust_gauge(Gauge::ItemDataCurr, -(klen + vlen));
    let _ = cas_enabled; // key/value lengths don't depend on CAS presence
}

/// Runs the bounded displacement walk starting at `start`, vacating it.
///
/// Mirrors the reference implementation's control flow with an explicit
/// path-membership test (see the crate's design notes on the original's
/// `continue`-vs-`break` bug) and resolves the "all candidates on path"
/// case by rolling the walk back to the last slot actually reached,
/// evicting there.
fn displacement_walk(state: &mut TableState, start: u32) {
    state.metrics.incr(Counter::CuckooDisplace);

    let budget = state.config.displace_budget;
    let cas_enabled = state.config.cas_enabled;
    let mut path = [0u32; crate::config::MAX_DISPLACE_BUDGET + 1];
    path[0] = start;
    let mut step: usize = 0;
    let mut ended = false;
    let mut evict = true;
    let mut displaced = start;

    while !ended && step < budget {
        step += 1;
        let now = state.clock.now_secs();
        let key_owned = item::slot_key(state.slab.slot(displaced), cas_enabled).to_vec();
        let offsets = candidate_offsets(&key_owned, state.config.max_item);

        let mut free_found = None;
        for &o in &offsets {
            if !item::is_valid(state.slab.slot(o), now) {
                free_found = Some(o);
                break;
            }
        }

        if let Some(free) = free_found {
            if item::is_expired(state.slab.slot(free), now) {
                decrement_item_gauges(&state.metrics, state.slab.slot(free), cas_enabled);
                state.metrics.incr(Counter::ItemExpire);
            }
            path[step] = free;
            ended = true;
            evict = false;
            state.metrics.incr(Counter::ItemDisplace);
        } else {
            let mut expires = [0u32; D];
            for (i, &o) in offsets.iter().enumerate() {
                expires[i] = item::slot_expire(state.slab.slot(o));
            }
            let ordered = state.config.policy.order(&offsets, &expires);

            let visited = &path[0..step];
            let candidate = ordered.iter().copied().find(|o| !visited.contains(o));

            match candidate {
                Some(next) => {
                    path[step] = next;
                    displaced = next;
                    state.metrics.incr(Counter::ItemDisplace);
                }
                None => {
                    debug!("displacement walk ran out of candidates, falling back to eviction");
                    ended = true;
                    step -= 1;
                }
            }
        }
    }

    if evict {
        debug!(slot = path[step], "displacement walk evicted a live item");
        decrement_item_gauges(&state.metrics, state.slab.slot(path[step]), cas_enabled);
        state.metrics.incr(Counter::ItemEvict);
    }

    for i in (1..=step).rev() {
        state.slab.copy_slot(path[i - 1], path[i]);
    }
    item::item_delete(state.slab.slot_mut(path[0]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::CuckooConfig;
    use crate::metrics::AtomicMetrics;
    use crate::policy::PolicyKind;

    fn setup(
        chunk_size: u32,
        max_item: u32,
        policy: PolicyKind,
        cas: bool,
    ) -> (CuckooTable, Arc<AtomicMetrics>, Arc<ManualClock>) {
        let config = CuckooConfig::new(chunk_size, max_item, policy, cas).unwrap();
        let metrics = Arc::new(AtomicMetrics::new());
        let clock = Arc::new(ManualClock::new(1000));
        let mut table = CuckooTable::new();
        table
            .setup_with_clock(config, Some(metrics.clone()), clock.clone())
            .unwrap();
        (table, metrics, clock)
    }

    #[test]
    fn fresh_get_is_a_miss() {
        let (table, _, _) = setup(64, 16, PolicyKind::Random, false);
        assert_eq!(table.get(b"foo").unwrap(), None);
    }

    #[test]
    fn insert_get_delete_roundtrips() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        table
            .insert(b"foo", Value::Str(b"bar".to_vec()), 2000)
            .unwrap();

        let slot = table.get(b"foo").unwrap().expect("present");
        let decoded = table.decode(slot).unwrap();
        assert_eq!(decoded.key, b"foo");
        assert_eq!(decoded.value, Value::Str(b"bar".to_vec()));
        assert_eq!(decoded.expire, 2000);

        assert!(table.delete(b"foo").unwrap());
        assert_eq!(table.get(b"foo").unwrap(), None);
        assert!(!table.delete(b"foo").unwrap());
    }

    #[test]
    fn oversized_insert_is_rejected_and_counted() {
        let (mut table, metrics, _) = setup(32, 16, PolicyKind::Random, false);
        let err = table
            .insert(b"k", Value::Str(vec![0u8; 64]), 2000)
            .unwrap_err();
        assert_eq!(err, CuckooError::Oversized);
        assert_eq!(metrics.snapshot().cuckoo_insert_ex, 1);
    }

    #[test]
    fn key_past_klen_field_width_is_rejected_despite_a_huge_chunk_size() {
        // chunk_size is generous enough to physically fit the key, but the
        // on-disk klen field is a u16 and would silently truncate it.
        let (mut table, metrics, _) = setup(100_000, 4, PolicyKind::Random, false);
        let oversized_key = vec![0x41u8; crate::item::MAX_KEY_LEN + 1];
        let err = table
            .insert(&oversized_key, Value::Str(b"v".to_vec()), 2000)
            .unwrap_err();
        assert_eq!(err, CuckooError::Oversized);
        assert_eq!(metrics.snapshot().cuckoo_insert_ex, 1);
        // Rejected before any displacement/eviction side effect ran.
        assert_eq!(metrics.snapshot().item_evict, 0);
    }

    #[test]
    fn zero_expire_is_rejected_on_insert() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        let err = table.insert(b"k", Value::Str(b"v".to_vec()), 0).unwrap_err();
        assert_eq!(err, CuckooError::InvalidExpire);
    }

    #[test]
    fn expired_slot_is_reused_without_eviction() {
        let (mut table, metrics, clock) = setup(64, 16, PolicyKind::Random, false);
        table
            .insert(b"alpha", Value::Str(b"v".to_vec()), 1001)
            .unwrap();
        clock.set(2000);

        // A fresh insert anywhere should not report an eviction purely
        // because an unrelated key already expired.
        table
            .insert(b"beta", Value::Str(b"v".to_vec()), 3000)
            .unwrap();
        assert_eq!(metrics.snapshot().item_evict, 0);
        assert_eq!(table.get(b"alpha").unwrap(), None);
    }

    #[test]
    fn update_preserves_key_and_changes_value() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        table
            .insert(b"foo", Value::Str(b"bar".to_vec()), 2000)
            .unwrap();
        let slot = table.get(b"foo").unwrap().unwrap();
        table
            .update(slot, Value::Str(b"baz!".to_vec()), 3000)
            .unwrap();

        let slot = table.get(b"foo").unwrap().unwrap();
        let decoded = table.decode(slot).unwrap();
        assert_eq!(decoded.value, Value::Str(b"baz!".to_vec()));
        assert_eq!(decoded.expire, 3000);
    }

    #[test]
    fn update_oversized_is_rejected_and_counted() {
        let (mut table, metrics, _) = setup(32, 16, PolicyKind::Random, false);
        table
            .insert(b"k", Value::Str(b"v".to_vec()), 2000)
            .unwrap();
        let slot = table.get(b"k").unwrap().unwrap();
        let err = table
            .update(slot, Value::Str(vec![0u8; 64]), 2000)
            .unwrap_err();
        assert_eq!(err, CuckooError::Oversized);
        assert_eq!(metrics.snapshot().cuckoo_update_ex, 1);
    }

    #[test]
    fn forced_eviction_with_zero_displace_budget() {
        let config =
            CuckooConfig::with_displace_budget(64, 4, PolicyKind::Random, false, 0).unwrap();
        let metrics = Arc::new(AtomicMetrics::new());
        let mut table = CuckooTable::new();
        table
            .setup_with_clock(config, Some(metrics.clone()), Arc::new(ManualClock::new(1)))
            .unwrap();

        for i in 0..4u32 {
            table
                .insert(
                    format!("key-{i}").as_bytes(),
                    Value::Int(i as i64),
                    NEVER,
                )
                .unwrap();
        }
        table
            .insert(b"one-too-many", Value::Int(99), NEVER)
            .unwrap();

        assert_eq!(metrics.snapshot().item_evict, 1);
        let present = (0..4)
            .filter(|i| table.get(format!("key-{i}").as_bytes()).unwrap().is_some())
            .count();
        assert_eq!(present, 3);
        assert!(table.get(b"one-too-many").unwrap().is_some());
    }

    #[test]
    fn displacement_walk_bumps_cuckoo_displace_call_count() {
        let config =
            CuckooConfig::with_displace_budget(64, 4, PolicyKind::Random, false, 0).unwrap();
        let metrics = Arc::new(AtomicMetrics::new());
        let mut table = CuckooTable::new();
        table
            .setup_with_clock(config, Some(metrics.clone()), Arc::new(ManualClock::new(1)))
            .unwrap();

        for i in 0..4u32 {
            table
                .insert(format!("key-{i}").as_bytes(), Value::Int(i as i64), NEVER)
                .unwrap();
        }
        assert_eq!(metrics.snapshot().cuckoo_displace, 0);

        table
            .insert(b"one-too-many", Value::Int(99), NEVER)
            .unwrap();
        assert_eq!(metrics.snapshot().cuckoo_displace, 1);
    }

    #[test]
    fn reset_clears_every_slot() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        table
            .insert(b"foo", Value::Str(b"bar".to_vec()), 2000)
            .unwrap();
        table.reset().unwrap();
        assert_eq!(table.get(b"foo").unwrap(), None);
    }

    #[test]
    fn operations_before_setup_fail_with_not_initialized() {
        let table = CuckooTable::new();
        assert_eq!(table.get(b"x").unwrap_err(), CuckooError::NotInitialized);
    }

    #[test]
    fn teardown_then_reuse_requires_setup_again() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        table.teardown();
        assert_eq!(table.get(b"x").unwrap_err(), CuckooError::NotInitialized);

        let config = CuckooConfig::new(64, 16, PolicyKind::Random, false).unwrap();
        table.setup(config, None).unwrap();
        assert_eq!(table.get(b"x").unwrap(), None);
    }

    #[test]
    fn double_setup_is_rejected() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        let config = CuckooConfig::new(64, 16, PolicyKind::Random, false).unwrap();
        assert_eq!(
            table.setup(config, None).unwrap_err(),
            CuckooError::AlreadyInitialized
        );
    }

    #[test]
    fn cas_token_advances_on_insert_and_update() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, true);
        table
            .insert(b"foo", Value::Str(b"bar".to_vec()), 2000)
            .unwrap();
        let slot = table.get(b"foo").unwrap().unwrap();
        let first_cas = table.decode(slot).unwrap().cas.unwrap();
        assert!(first_cas > 0);

        table
            .update(slot, Value::Str(b"baz".to_vec()), 2000)
            .unwrap();
        let slot = table.get(b"foo").unwrap().unwrap();
        let second_cas = table.decode(slot).unwrap().cas.unwrap();
        assert!(second_cas > first_cas);
    }

    #[test]
    fn int_values_roundtrip() {
        let (mut table, _, _) = setup(64, 16, PolicyKind::Random, false);
        table.insert(b"counter", Value::Int(-7), NEVER).unwrap();
        let slot = table.get(b"counter").unwrap().unwrap();
        assert_eq!(table.decode(slot).unwrap().value, Value::Int(-7));
    }

    #[test]
    fn expire_policy_prefers_soonest_to_die_candidate() {
        // With D=4 and max_item=4 every key's candidate set is the whole
        // table; filling it with ascending expiries and then forcing an
        // eviction should always take the earliest expiry first.
        let config =
            CuckooConfig::with_displace_budget(64, 4, PolicyKind::Expire, false, 0).unwrap();
        let metrics = Arc::new(AtomicMetrics::new());
        let mut table = CuckooTable::new();
        table
            .setup_with_clock(config, Some(metrics.clone()), Arc::new(ManualClock::new(1)))
            .unwrap();

        for (i, expire) in [10u32, 20, 30, 40].into_iter().enumerate() {
            table
                .insert(format!("k{i}").as_bytes(), Value::Int(i as i64), expire)
                .unwrap();
        }

        table.insert(b"newcomer", Value::Int(99), 50).unwrap();
        assert_eq!(metrics.snapshot().item_evict, 1);
    }
}
