//! Pure window math: how many slots a viewport needs, and which item each
//! slot displays at a given scroll offset.
//!
//! Slots are recycled cyclically: slot `s` only ever displays items congruent
//! to `s` modulo the slot count, so advancing the scroll position rebinds each
//! slot at most once per `slot_count` items and never moves content between
//! slots. With 5 slots over unit-size items, the window advances like this
//! (`item <- slot`):
//!
//! ```text
//! offset index 1:   0<-0  1<-1  2<-2  3<-3  4<-4
//! offset index 2:         1<-1  2<-2  3<-3  4<-4  5<-0
//! offset index 3:               2<-2  3<-3  4<-4  5<-0  6<-1
//! ```
//!
//! Everything here is a free function over plain integers; the caller owns
//! all state. [`crate::Recycler`] wraps these with viewport/scroll
//! bookkeeping.

use crate::SlotAssignment;

/// Number of physical slots needed to tile a viewport with room to spare.
///
/// `ceil(viewport_size / item_size)` slots cover the fully and partially
/// visible items; `buffer_slots` (normally 1) absorbs the extra partial item
/// that a scroll offset between item edges exposes at both viewport edges at
/// once. The result satisfies `result * item_size >= viewport_size`.
///
/// Growing a pool to a larger count must allocate fresh high-index slots;
/// shrinking must discard the highest indices. An existing slot index is never
/// reassigned to a different slot.
///
/// # Panics
///
/// Panics if `item_size` is zero. [`crate::Recycler`] validates its
/// configuration up front and never passes one.
pub fn required_slot_count(viewport_size: u32, item_size: u32, buffer_slots: usize) -> usize {
    assert!(item_size > 0, "item_size must be greater than zero");
    (viewport_size.div_ceil(item_size) as usize).saturating_add(buffer_slots)
}

/// The virtual index of the first item whose leading edge sits at or after
/// `scroll_offset`.
///
/// # Panics
///
/// Panics if `item_size` is zero.
pub fn offset_index(scroll_offset: u64, item_size: u32) -> u64 {
    assert!(item_size > 0, "item_size must be greater than zero");
    scroll_offset.div_ceil(item_size as u64)
}

/// The virtual index slot `slot` displays at `offset_index`, before range
/// filtering.
///
/// This is a residue-class assignment: the result is the unique index
/// congruent to `slot` modulo `slot_count` inside the window of `slot_count`
/// consecutive indices starting at `offset_index - 1`. For a fixed slot the
/// result is non-decreasing in `offset_index` and advances in steps of
/// `slot_count`, flipping exactly when the slot's previous item has fully
/// left the buffered window — one offset later than the unbiased variant of
/// this formula would flip it.
///
/// Near offset zero the result can be negative: the slot is parked one window
/// behind the list and displays nothing. Callers filter to `0..count`
/// ([`for_each_assignment`] does).
///
/// # Panics
///
/// Panics in debug builds if `slot >= slot_count`; `slot_count` must be at
/// least 1.
pub fn slot_index(slot: usize, offset_index: u64, slot_count: usize) -> i64 {
    debug_assert!(slot < slot_count, "slot out of pool bounds");
    let m = slot_count as i128;
    let lead = offset_index as i128 - slot as i128 - 1;
    let index = ceil_div(lead, m) * m + slot as i128;
    index.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Visits every slot in the pool with its unfiltered virtual index.
///
/// The visited indices always form a run of `slot_count` consecutive
/// integers, so the window fully covers the viewport plus one buffered item
/// in each scroll direction.
pub fn for_each_slot(slot_count: usize, offset_index: u64, mut f: impl FnMut(usize, i64)) {
    for slot in 0..slot_count {
        f(slot, slot_index(slot, offset_index, slot_count));
    }
}

/// Visits the current window's assignments: every slot whose virtual index
/// lands inside `0..count`, with the item's pixel offset along the scroll
/// axis.
///
/// An empty list, an empty pool, or a scroll offset beyond the extent
/// produces no calls; absence is the normal outcome for a slot, not an error.
///
/// # Panics
///
/// Panics if `item_size` is zero.
pub fn for_each_assignment(
    slot_count: usize,
    item_size: u32,
    scroll_offset: u64,
    count: usize,
    mut f: impl FnMut(SlotAssignment),
) {
    if slot_count == 0 || count == 0 {
        return;
    }
    let at = offset_index(scroll_offset, item_size);
    for_each_slot(slot_count, at, |slot, raw| {
        if raw >= 0 && (raw as u64) < count as u64 {
            let index = raw as usize;
            f(SlotAssignment {
                slot,
                index,
                start: (index as u64).saturating_mul(item_size as u64),
            });
        }
    });
}

/// Total extent of the list along the scroll axis: the size the scrollable
/// placeholder must take so native scrollbars are proportioned to the full
/// list.
pub fn total_size(item_size: u32, count: usize) -> u64 {
    (item_size as u64).saturating_mul(count as u64)
}

fn ceil_div(n: i128, d: i128) -> i128 {
    debug_assert!(d > 0);
    n.div_euclid(d) + (n.rem_euclid(d) != 0) as i128
}
