use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

/// Independent oracle for the slot mapping: the unique index congruent to
/// `slot` modulo `slot_count` inside the window `[offset_index - 1,
/// offset_index + slot_count - 2]`, found by scanning.
fn expected_slot_index(slot: usize, offset_index: u64, slot_count: usize) -> i64 {
    let m = slot_count as i64;
    let lo = offset_index as i64 - 1;
    for v in lo..lo + m {
        if v.rem_euclid(m) as usize == slot {
            return v;
        }
    }
    unreachable!("a window of slot_count consecutive integers covers every residue");
}

#[test]
fn required_slot_count_matches_worked_allocation() {
    // ceil(450 / 200) + 1 = 3 + 1
    assert_eq!(window::required_slot_count(450, 200, 1), 4);
    assert_eq!(window::required_slot_count(400, 200, 1), 3);
    assert_eq!(window::required_slot_count(401, 200, 1), 4);
    assert_eq!(window::required_slot_count(0, 200, 1), 1);
    assert_eq!(window::required_slot_count(0, 200, 0), 0);
    assert_eq!(window::required_slot_count(200, 200, 0), 1);
}

#[test]
fn required_slot_count_tiles_the_viewport() {
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let item_size = rng.gen_range_u32(1, 500);
        let viewport = rng.gen_range_u32(0, 10_000);
        let buffer = rng.gen_range_usize(0, 4);
        let slots = window::required_slot_count(viewport, item_size, buffer);
        assert!(slots as u64 * item_size as u64 >= viewport as u64);
    }
}

#[test]
fn required_slot_count_is_monotonic_in_viewport() {
    let mut rng = Lcg::new(11);
    for _ in 0..500 {
        let item_size = rng.gen_range_u32(1, 500);
        let a = rng.gen_range_u32(0, 10_000);
        let b = rng.gen_range_u32(0, 10_000);
        let (lo, hi) = (a.min(b), a.max(b));
        assert!(
            window::required_slot_count(lo, item_size, 1)
                <= window::required_slot_count(hi, item_size, 1)
        );
    }
}

#[test]
fn offset_index_is_first_leading_edge_at_or_after() {
    assert_eq!(window::offset_index(0, 200), 0);
    assert_eq!(window::offset_index(1, 200), 1);
    assert_eq!(window::offset_index(199, 200), 1);
    assert_eq!(window::offset_index(200, 200), 1);
    assert_eq!(window::offset_index(201, 200), 2);
    assert_eq!(window::offset_index(400, 200), 2);
}

#[test]
fn slot_index_matches_worked_table() {
    // slot_count = 5, unit items
    assert_eq!(window::slot_index(0, 0, 5), 0);
    assert_eq!(window::slot_index(0, 2, 5), 5);
    assert_eq!(window::slot_index(1, 2, 5), 1);
    assert_eq!(window::slot_index(2, 9, 5), 12);

    // Full windows around those offsets. Near offset zero the highest slot is
    // parked at -1 (filtered out by assignment iteration).
    let window_at = |oi: u64| -> Vec<i64> {
        let mut out = Vec::new();
        window::for_each_slot(5, oi, |_, v| out.push(v));
        out
    };
    assert_eq!(window_at(0), [0, 1, 2, 3, -1]);
    assert_eq!(window_at(1), [0, 1, 2, 3, 4]);
    assert_eq!(window_at(2), [5, 1, 2, 3, 4]);
    assert_eq!(window_at(9), [10, 11, 12, 8, 9]);
}

#[test]
fn slot_index_matches_oracle() {
    let mut rng = Lcg::new(23);
    for _ in 0..2_000 {
        let slot_count = rng.gen_range_usize(1, 64);
        let slot = rng.gen_range_usize(0, slot_count);
        let oi = rng.gen_range_u64(0, 100_000);
        assert_eq!(
            window::slot_index(slot, oi, slot_count),
            expected_slot_index(slot, oi, slot_count),
            "slot={slot} oi={oi} slot_count={slot_count}"
        );
    }
}

#[test]
fn window_is_a_consecutive_run() {
    let mut rng = Lcg::new(31);
    for _ in 0..500 {
        let slot_count = rng.gen_range_usize(1, 48);
        let oi = rng.gen_range_u64(0, 10_000);
        let mut indices = Vec::new();
        window::for_each_slot(slot_count, oi, |slot, v| {
            assert_eq!(v.rem_euclid(slot_count as i64) as usize, slot);
            indices.push(v);
        });
        indices.sort_unstable();
        assert_eq!(indices.len(), slot_count);
        for pair in indices.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
    }
}

#[test]
fn window_advances_cyclically() {
    // Shifting the offset index by one full window advances every slot by
    // exactly slot_count items.
    let mut rng = Lcg::new(43);
    for _ in 0..500 {
        let slot_count = rng.gen_range_usize(1, 48);
        let slot = rng.gen_range_usize(0, slot_count);
        let oi = rng.gen_range_u64(0, 10_000);
        assert_eq!(
            window::slot_index(slot, oi + slot_count as u64, slot_count),
            window::slot_index(slot, oi, slot_count) + slot_count as i64
        );
    }
}

#[test]
fn slot_index_is_monotonic_in_offset() {
    let mut rng = Lcg::new(59);
    for _ in 0..500 {
        let slot_count = rng.gen_range_usize(1, 48);
        let slot = rng.gen_range_usize(0, slot_count);
        let oi = rng.gen_range_u64(0, 10_000);
        let step = rng.gen_range_u64(0, 100);
        assert!(
            window::slot_index(slot, oi + step, slot_count)
                >= window::slot_index(slot, oi, slot_count)
        );
    }
}

#[test]
fn assignments_are_filtered_to_existing_items() {
    // Five slots over three items: two slots always come up empty.
    let mut out = Vec::new();
    for offset in 0..20u64 {
        out.clear();
        window::for_each_assignment(5, 1, offset, 3, |a| out.push(a));
        assert!(out.len() <= 3);
        for a in &out {
            assert!(a.index < 3);
            assert_eq!(a.start, a.index as u64);
        }
    }

    out.clear();
    window::for_each_assignment(5, 1, 0, 3, |a| out.push(a));
    let indices: Vec<usize> = out.iter().map(|a| a.index).collect();
    assert_eq!(indices, [0, 1, 2]);
}

#[test]
fn empty_inputs_produce_no_assignments() {
    window::for_each_assignment(5, 1, 0, 0, |_| panic!("empty list"));
    window::for_each_assignment(0, 1, 0, 100, |_| panic!("empty pool"));
    // Far beyond the extent: everything is filtered, nothing panics.
    window::for_each_assignment(5, 1, u64::MAX, 100, |_| panic!("out of range"));
}

#[test]
fn total_size_matches_extent() {
    assert_eq!(window::total_size(200, 100_000), 20_000_000);
    assert_eq!(window::total_size(200, 0), 0);
    // Saturates instead of overflowing.
    assert_eq!(window::total_size(u32::MAX, usize::MAX), u64::MAX);
}

#[test]
fn engine_rejects_zero_item_size() {
    assert_eq!(
        Recycler::new(RecyclerOptions::new(10, 0)).err(),
        Some(ConfigError::ZeroItemSize)
    );

    let mut r = Recycler::new(RecyclerOptions::new(10, 2)).unwrap();
    assert_eq!(r.set_item_size(0), Err(ConfigError::ZeroItemSize));
    assert_eq!(
        r.set_options(RecyclerOptions::new(10, 0)),
        Err(ConfigError::ZeroItemSize)
    );
    // The failed updates left the configuration untouched.
    assert_eq!(r.item_size(), 2);
    assert_eq!(r.count(), 10);
}

#[test]
fn fresh_engine_starts_with_dirty_slots() {
    let r = Recycler::new(RecyclerOptions::new(100, 200).with_initial_viewport(450)).unwrap();
    assert_eq!(r.slot_count(), 4);
    assert!(r.slots_dirty());
    assert!(r.take_slots_dirty());
    assert!(!r.slots_dirty());
}

#[test]
fn resize_recomputes_slot_count_before_anyone_observes() {
    let mut r = Recycler::new(RecyclerOptions::new(100, 200).with_initial_viewport(450)).unwrap();
    r.take_slots_dirty();

    let observed = Arc::new(AtomicUsize::new(0));
    r.set_on_change(Some({
        let observed = Arc::clone(&observed);
        move |r: &Recycler, _| {
            observed.store(r.slot_count(), Ordering::Relaxed);
        }
    }));

    r.set_viewport_size(850);
    // ceil(850 / 200) + 1
    assert_eq!(r.slot_count(), 6);
    assert_eq!(observed.load(Ordering::Relaxed), 6);
    assert!(r.take_slots_dirty());
}

#[test]
fn scroll_leaves_slot_count_alone() {
    let mut r = Recycler::new(RecyclerOptions::new(100, 200).with_initial_viewport(450)).unwrap();
    r.take_slots_dirty();

    r.set_scroll_offset(10_000);
    assert_eq!(r.slot_count(), 4);
    assert!(!r.slots_dirty());
}

#[test]
fn buffer_slots_grow_the_pool() {
    let mut r = Recycler::new(
        RecyclerOptions::new(100, 200)
            .with_initial_viewport(450)
            .with_buffer_slots(0),
    )
    .unwrap();
    assert_eq!(r.slot_count(), 3);

    r.take_slots_dirty();
    r.set_buffer_slots(3);
    assert_eq!(r.slot_count(), 6);
    assert!(r.take_slots_dirty());
}

#[test]
fn assignment_of_matches_for_each() {
    let mut r = Recycler::new(RecyclerOptions::new(1_000, 20).with_initial_viewport(90)).unwrap();
    r.set_scroll_offset(333);

    let mut collected = Vec::new();
    r.collect_assignments(&mut collected);
    assert!(!collected.is_empty());

    let mut by_slot = Vec::new();
    for slot in 0..r.slot_count() {
        if let Some(a) = r.assignment_of(slot) {
            by_slot.push(a);
        }
    }
    assert_eq!(collected, by_slot);
}

#[test]
fn slot_of_index_is_the_residue_inverse() {
    let mut r = Recycler::new(RecyclerOptions::new(1_000, 20).with_initial_viewport(90)).unwrap();
    r.set_scroll_offset(777);
    r.for_each_assignment(|a| {
        assert_eq!(r.slot_of_index(a.index), Some(a.slot));
    });

    let disabled =
        Recycler::new(RecyclerOptions::new(1_000, 20).with_enabled(false)).unwrap();
    assert_eq!(disabled.slot_of_index(3), None);
}

#[test]
fn empty_list_and_out_of_range_offsets_yield_empty_output() {
    let mut r = Recycler::new(RecyclerOptions::new(0, 20).with_initial_viewport(90)).unwrap();
    r.for_each_assignment(|_| panic!("no items"));
    assert_eq!(r.index_at_offset(0), None);

    r.set_count(10);
    r.set_scroll_offset(u64::MAX);
    r.for_each_assignment(|_| panic!("beyond the extent"));
}

#[test]
fn count_changes_reflect_on_the_next_mapping() {
    let mut r = Recycler::new(RecyclerOptions::new(10, 1).with_initial_viewport(4)).unwrap();
    assert_eq!(r.slot_count(), 5);
    r.set_scroll_offset(5);

    let mut before = Vec::new();
    r.collect_assignments(&mut before);
    assert!(before.iter().any(|a| a.index >= 6));

    r.set_count(6);
    let mut after = Vec::new();
    r.collect_assignments(&mut after);
    assert!(after.iter().all(|a| a.index < 6));
    assert!(after.len() < before.len());
}

#[test]
fn clamping_respects_viewport_and_extent() {
    let mut r = Recycler::new(RecyclerOptions::new(100, 10).with_initial_viewport(30)).unwrap();
    assert_eq!(r.total_size(), 1_000);
    assert_eq!(r.max_scroll_offset(), 970);

    r.set_scroll_offset_clamped(5_000);
    assert_eq!(r.scroll_offset(), 970);

    r.set_scroll_offset_clamped(42);
    assert_eq!(r.scroll_offset(), 42);
}

#[test]
fn scroll_direction_tracks_movement() {
    let mut r = Recycler::new(RecyclerOptions::new(100, 10).with_initial_viewport(30)).unwrap();
    assert_eq!(r.scroll_direction(), None);

    r.set_scroll_offset(50);
    assert_eq!(r.scroll_direction(), Some(ScrollDirection::Forward));

    r.set_scroll_offset(20);
    assert_eq!(r.scroll_direction(), Some(ScrollDirection::Backward));

    // Setting the same offset keeps the last direction.
    r.set_scroll_offset(20);
    assert_eq!(r.scroll_direction(), Some(ScrollDirection::Backward));

    // Direction resets when scrolling stops.
    r.notify_scroll_event(0);
    assert!(r.is_scrolling());
    r.set_is_scrolling(false);
    assert_eq!(r.scroll_direction(), None);
}

#[test]
fn debounced_scrolling_reset() {
    let mut r = Recycler::new(RecyclerOptions::new(100, 10).with_initial_viewport(30)).unwrap();
    r.apply_scroll_offset_event(100, 1_000);
    assert!(r.is_scrolling());

    r.update_scrolling(1_100);
    assert!(r.is_scrolling());

    r.update_scrolling(1_150);
    assert!(!r.is_scrolling());
}

#[test]
fn batch_update_notifies_once() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut r = Recycler::new(RecyclerOptions::new(100, 10).with_on_change(Some({
        let fired = Arc::clone(&fired);
        move |_: &Recycler, _| {
            fired.fetch_add(1, Ordering::Relaxed);
        }
    })))
    .unwrap();

    fired.store(0, Ordering::Relaxed);
    r.batch_update(|r| {
        r.set_viewport_size(30);
        r.set_scroll_offset(500);
        r.notify_scroll_event(0);
    });
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}

#[test]
fn disabled_engine_is_empty_and_side_effect_free() {
    let mut r = Recycler::new(
        RecyclerOptions::new(100, 10)
            .with_initial_viewport(30)
            .with_enabled(false),
    )
    .unwrap();

    assert_eq!(r.slot_count(), 0);
    assert_eq!(r.total_size(), 0);
    assert_eq!(r.index_at_offset(0), None);
    r.for_each_assignment(|_| panic!("disabled"));

    // Setters must not panic and keep returning empty results.
    r.set_viewport_and_scroll_clamped(30, 500);
    assert_eq!(r.slot_count(), 0);

    r.set_enabled(true);
    assert!(r.slot_count() > 0);
    assert!(r.slots_dirty());
}

#[test]
fn scroll_to_index_offset_alignment() {
    let mut r = Recycler::new(RecyclerOptions::new(100, 10).with_initial_viewport(30)).unwrap();

    assert_eq!(r.scroll_to_index_offset(5, Align::Start), 50);
    assert_eq!(r.scroll_to_index_offset(5, Align::End), 30);
    assert_eq!(r.scroll_to_index_offset(5, Align::Center), 40);

    // Auto: already fully visible keeps the current offset.
    r.set_scroll_offset(45);
    assert_eq!(r.scroll_to_index_offset(5, Align::Auto), 45);
    // Auto: before the viewport behaves like Start, after like End.
    assert_eq!(r.scroll_to_index_offset(2, Align::Auto), 20);
    assert_eq!(r.scroll_to_index_offset(90, Align::Auto), 880);

    // Targets clamp to the scrollable extent.
    assert_eq!(r.scroll_to_index_offset(99, Align::Start), 970);
}

#[test]
fn snapshot_roundtrip_restores_geometry() {
    let mut a = Recycler::new(RecyclerOptions::new(500, 10).with_initial_viewport(70)).unwrap();
    a.apply_scroll_offset_event(400, 0);
    let frame = a.frame_state();
    assert!(frame.scroll.is_scrolling);

    let mut b = Recycler::new(RecyclerOptions::new(500, 10)).unwrap();
    b.restore_frame_state(frame, 0);
    assert_eq!(b.viewport_size(), 70);
    assert_eq!(b.scroll_offset(), 400);
    assert!(b.is_scrolling());
    assert_eq!(b.slot_count(), a.slot_count());

    let mut assignments_a = Vec::new();
    let mut assignments_b = Vec::new();
    a.collect_assignments(&mut assignments_a);
    b.collect_assignments(&mut assignments_b);
    assert_eq!(assignments_a, assignments_b);
}

#[test]
fn initial_offset_provider_runs_at_construction() {
    let calls = Arc::new(AtomicU64::new(0));
    let r = Recycler::new(RecyclerOptions::new(1_000, 1).with_initial_offset_provider({
        let calls = Arc::clone(&calls);
        move || {
            calls.fetch_add(1, Ordering::Relaxed);
            120
        }
    }))
    .unwrap();
    assert_eq!(r.scroll_offset(), 120);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn example_basic_smoke_large_count() {
    let mut r = Recycler::new(RecyclerOptions::new(1_000_000, 1)).unwrap();
    r.set_viewport_and_scroll(10, 123_456);

    assert_eq!(r.slot_count(), 11);
    let mut indices = Vec::new();
    r.for_each_assignment(|a| indices.push(a.index));
    assert_eq!(indices.len(), r.slot_count());
    assert!(indices.iter().all(|&i| i.abs_diff(123_456) <= 11));

    let offset = r.scroll_to_index_offset(999_999, Align::End);
    assert_eq!(offset, 999_990);
    r.set_scroll_offset_clamped(offset);
    assert_eq!(r.scroll_offset(), 999_990);
}
