use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::window;
use crate::{
    Align, ConfigError, FrameState, InitialOffset, RecyclerOptions, ScrollDirection, ScrollState,
    SlotAssignment, ViewportState,
};

/// A headless slot-recycling engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; the slot pool it sizes is owned by the
///   adapter (see `recycler-adapter`'s `SlotPool`).
/// - Your adapter drives it by providing viewport size and scroll offsets.
/// - Rendering is exposed via zero-allocation iteration
///   (`for_each_assignment`) over the current slot→item assignments.
///
/// Every size-affecting mutation (viewport, item size, buffer slots,
/// enabling) recomputes the slot count immediately, before any observer can
/// ask for assignments, so a mapping never runs against a stale pool size.
/// When the slot count changes, a dirty flag is raised for adapters to
/// consume via [`Recycler::take_slots_dirty`]: dirty means "resize your slot
/// pool", not dirty means "rebind content only".
#[derive(Clone, Debug)]
pub struct Recycler {
    options: RecyclerOptions,
    viewport_size: u32,
    scroll_offset: u64,
    slot_count: usize,
    slots_dirty: Cell<bool>,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Recycler {
    /// Creates a new engine from options.
    ///
    /// Fails fast on invalid configuration (`item_size == 0`). A freshly
    /// created enabled engine with a nonzero viewport starts with its dirty
    /// flag raised so the adapter allocates the initial pool.
    pub fn new(options: RecyclerOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let viewport_size = options.initial_viewport;
        let scroll_offset = options.initial_offset.resolve();
        rdebug!(
            count = options.count,
            item_size = options.item_size,
            buffer_slots = options.buffer_slots,
            "Recycler::new"
        );
        let mut r = Self {
            viewport_size,
            scroll_offset,
            slot_count: 0,
            slots_dirty: Cell::new(false),
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        r.resync_slot_count();
        Ok(r)
    }

    pub fn options(&self) -> &RecyclerOptions {
        &self.options
    }

    fn reset_to_initial(&mut self) {
        self.viewport_size = self.options.initial_viewport;
        self.scroll_offset = self.options.initial_offset.resolve();
        self.is_scrolling = false;
        self.scroll_direction = None;
        self.last_scroll_event_ms = None;
    }

    /// Replaces the configuration wholesale.
    ///
    /// Fails fast on invalid configuration, leaving the engine untouched.
    pub fn set_options(&mut self, options: RecyclerOptions) -> Result<(), ConfigError> {
        options.validate()?;
        let was_enabled = self.options.enabled;
        self.options = options;
        rtrace!(
            count = self.options.count,
            item_size = self.options.item_size,
            enabled = self.options.enabled,
            "Recycler::set_options"
        );

        if !self.options.enabled {
            self.viewport_size = 0;
            self.scroll_offset = self.options.initial_offset.resolve();
            self.is_scrolling = false;
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        } else if !was_enabled {
            self.reset_to_initial();
        }

        self.resync_slot_count();
        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut RecyclerOptions),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Recycler, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame an adapter updates viewport size, scroll offset, and
    /// scrolling state together; without batching, each setter may trigger
    /// `on_change`.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Replaces the item count (the data source changed). Not an error at any
    /// point: the next mapping reflects the new count, and slots whose items
    /// vanished simply lose their assignments.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.notify();
    }

    pub fn item_size(&self) -> u32 {
        self.options.item_size
    }

    pub fn set_item_size(&mut self, item_size: u32) -> Result<(), ConfigError> {
        if item_size == 0 {
            return Err(ConfigError::ZeroItemSize);
        }
        if self.options.item_size == item_size {
            return Ok(());
        }
        self.options.item_size = item_size;
        self.resync_slot_count();
        self.notify();
        Ok(())
    }

    pub fn buffer_slots(&self) -> usize {
        self.options.buffer_slots
    }

    pub fn set_buffer_slots(&mut self, buffer_slots: usize) {
        if self.options.buffer_slots == buffer_slots {
            return;
        }
        self.options.buffer_slots = buffer_slots;
        self.resync_slot_count();
        self.notify();
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        if !enabled {
            self.viewport_size = 0;
            self.scroll_offset = self.options.initial_offset.resolve();
            self.is_scrolling = false;
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        } else {
            self.reset_to_initial();
        }
        self.resync_slot_count();
        self.notify();
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        if !self.options.enabled {
            return;
        }
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Debounced `is_scrolling` reset; call periodically (e.g. per frame).
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.options.enabled || !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    /// Updates the viewport size, recomputing the slot count before
    /// notifying, so observers always see a pool size consistent with the
    /// viewport.
    pub fn set_viewport_size(&mut self, size: u32) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.resync_slot_count();
        self.notify();
    }

    /// Applies a viewport resize from your UI layer.
    pub fn apply_resize_event(&mut self, size: u32) {
        rtrace!(size, "apply_resize_event");
        self.batch_update(|r| {
            r.set_viewport_size(size);
        });
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll offset update from your UI layer (e.g. wheel/drag),
    /// and marks the engine as scrolling.
    pub fn apply_scroll_offset_event(&mut self, offset: u64, now_ms: u64) {
        rtrace!(offset, now_ms, "apply_scroll_offset_event");
        self.batch_update(|r| {
            r.set_scroll_offset(offset);
            r.notify_scroll_event(now_ms);
        });
    }

    /// Same as `apply_scroll_offset_event`, but clamps the offset.
    pub fn apply_scroll_offset_event_clamped(&mut self, offset: u64, now_ms: u64) {
        rtrace!(offset, now_ms, "apply_scroll_offset_event_clamped");
        self.batch_update(|r| {
            r.set_scroll_offset_clamped(offset);
            r.notify_scroll_event(now_ms);
        });
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|r| {
            r.set_viewport_size(viewport_size);
            r.set_scroll_offset(scroll_offset);
        });
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|r| {
            r.set_viewport_size(viewport_size);
            r.set_scroll_offset_clamped(scroll_offset);
        });
    }

    /// Applies viewport size and scroll offset in a single coalesced update.
    ///
    /// The recommended entry point for adapters that receive scroll events
    /// along with updated viewport geometry.
    pub fn apply_frame(&mut self, viewport_size: u32, scroll_offset: u64, now_ms: u64) {
        rtrace!(viewport_size, scroll_offset, now_ms, "apply_frame");
        self.batch_update(|r| {
            r.set_viewport_size(viewport_size);
            r.set_scroll_offset(scroll_offset);
            r.notify_scroll_event(now_ms);
        });
    }

    /// Same as `apply_frame`, but clamps the offset.
    pub fn apply_frame_clamped(&mut self, viewport_size: u32, scroll_offset: u64, now_ms: u64) {
        rtrace!(viewport_size, scroll_offset, now_ms, "apply_frame_clamped");
        self.batch_update(|r| {
            r.set_viewport_size(viewport_size);
            r.set_scroll_offset_clamped(scroll_offset);
            r.notify_scroll_event(now_ms);
        });
    }

    /// The current physical slot pool size:
    /// `ceil(viewport_size / item_size) + buffer_slots`, or 0 when disabled.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Whether the slot count changed since the flag was last taken.
    pub fn slots_dirty(&self) -> bool {
        self.slots_dirty.get()
    }

    /// Consumes the dirty flag. Adapters call this once per frame: `true`
    /// means resize the slot pool before rebinding, `false` means the
    /// existing pool can be rebound in place.
    pub fn take_slots_dirty(&self) -> bool {
        self.slots_dirty.replace(false)
    }

    fn resync_slot_count(&mut self) {
        let next = if self.options.enabled {
            window::required_slot_count(
                self.viewport_size,
                self.options.item_size,
                self.options.buffer_slots,
            )
        } else {
            0
        };
        if next != self.slot_count {
            rdebug!(from = self.slot_count, to = next, "slot count changed");
            self.slot_count = next;
            self.slots_dirty.set(true);
        }
    }

    /// The virtual index of the first item whose leading edge sits at or
    /// after the current scroll offset.
    pub fn offset_index(&self) -> u64 {
        window::offset_index(self.scroll_offset, self.options.item_size)
    }

    /// Total extent of the list along the scroll axis (`item_size * count`).
    pub fn total_size(&self) -> u64 {
        if !self.options.enabled {
            return 0;
        }
        window::total_size(self.options.item_size, self.options.count)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        if !self.options.enabled {
            return self.options.initial_offset.resolve();
        }
        self.total_size().saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Visits the current slot→item assignments without allocating.
    ///
    /// Only slots whose item exists are visited; a slot absent from the
    /// output keeps its identity and should be hidden by the rendering layer.
    pub fn for_each_assignment(&self, f: impl FnMut(SlotAssignment)) {
        self.for_each_assignment_at(self.scroll_offset, f);
    }

    /// Visits the assignments the engine would produce at `scroll_offset`,
    /// without mutating any state.
    pub fn for_each_assignment_at(&self, scroll_offset: u64, f: impl FnMut(SlotAssignment)) {
        if !self.options.enabled {
            return;
        }
        window::for_each_assignment(
            self.slot_count,
            self.options.item_size,
            scroll_offset,
            self.options.count,
            f,
        );
    }

    /// Collects the current assignments into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_assignment`]; for maximum
    /// performance, prefer the callback form and reuse a scratch buffer.
    pub fn collect_assignments(&self, out: &mut Vec<SlotAssignment>) {
        self.collect_assignments_at(self.scroll_offset, out);
    }

    /// Collects the assignments for a given `scroll_offset` into `out`
    /// (clears `out` first).
    pub fn collect_assignments_at(&self, scroll_offset: u64, out: &mut Vec<SlotAssignment>) {
        out.clear();
        self.for_each_assignment_at(scroll_offset, |a| out.push(a));
    }

    /// The assignment currently held by one physical slot, if its item
    /// exists.
    pub fn assignment_of(&self, slot: usize) -> Option<SlotAssignment> {
        if !self.options.enabled || slot >= self.slot_count || self.options.count == 0 {
            return None;
        }
        let raw = window::slot_index(slot, self.offset_index(), self.slot_count);
        if raw < 0 || raw as u64 >= self.options.count as u64 {
            return None;
        }
        let index = raw as usize;
        Some(SlotAssignment {
            slot,
            index,
            start: (index as u64).saturating_mul(self.options.item_size as u64),
        })
    }

    /// The slot that displays `index` whenever it is windowed (`index` modulo
    /// the slot count). `None` when the pool is empty.
    pub fn slot_of_index(&self, index: usize) -> Option<usize> {
        (self.slot_count > 0).then(|| index % self.slot_count)
    }

    /// The item whose extent contains `offset`, clamped to the last item for
    /// offsets beyond the end. `None` when the list is empty or the engine is
    /// disabled.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if !self.options.enabled || self.options.count == 0 {
            return None;
        }
        let index = offset / self.options.item_size as u64;
        Some(cmp::min(index, (self.options.count - 1) as u64) as usize)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        if !self.options.enabled || index >= self.options.count {
            return None;
        }
        Some((index as u64).saturating_mul(self.options.item_size as u64))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        let start = self.item_start(index)?;
        Some(start.saturating_add(self.options.item_size as u64))
    }

    /// Programmatically scrolls to an index (no animation).
    ///
    /// This sets the internal `scroll_offset` to the computed (clamped)
    /// target and triggers `on_change`. It does **not** mark the engine as
    /// "scrolling"; for user-scrolling semantics, pass
    /// `scroll_to_index_offset(..)` through
    /// `apply_scroll_offset_event_clamped` instead.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if !self.options.enabled {
            return self.options.initial_offset.resolve();
        }
        if self.options.count == 0 {
            return 0;
        }
        let index = index.min(self.options.count - 1);
        let item = self.options.item_size as u64;
        let start = (index as u64).saturating_mul(item);
        let end = start.saturating_add(item);
        let view = self.viewport_size as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(item / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    /// Returns a lightweight snapshot of the current viewport state.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            size: self.viewport_size,
        }
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            is_scrolling: self.is_scrolling,
        }
    }

    /// Returns a combined snapshot of viewport + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport geometry from a previously captured snapshot.
    pub fn restore_viewport_state(&mut self, viewport: ViewportState) {
        self.set_viewport_size(viewport.size);
    }

    /// Restores scroll state from a previously captured snapshot.
    ///
    /// When `scroll.is_scrolling` is `true`, this updates the internal
    /// scrolling timers as if a scroll event happened at `now_ms`.
    pub fn restore_scroll_state(&mut self, scroll: ScrollState, now_ms: u64) {
        if scroll.is_scrolling {
            self.apply_scroll_offset_event_clamped(scroll.offset, now_ms);
            return;
        }
        self.batch_update(|r| {
            r.set_scroll_offset_clamped(scroll.offset);
            r.set_is_scrolling(false);
        });
    }

    /// Restores both viewport + scroll state from a previously captured
    /// snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        if frame.scroll.is_scrolling {
            self.apply_frame_clamped(frame.viewport.size, frame.scroll.offset, now_ms);
            return;
        }
        self.batch_update(|r| {
            r.set_viewport_size(frame.viewport.size);
            r.set_scroll_offset_clamped(frame.scroll.offset);
            r.set_is_scrolling(false);
        });
    }

    pub fn set_initial_offset(&mut self, initial_offset: u64) {
        self.options.initial_offset = InitialOffset::Value(initial_offset);
        self.notify();
    }

    pub fn set_is_scrolling_reset_delay_ms(&mut self, delay_ms: u64) {
        self.options.is_scrolling_reset_delay_ms = delay_ms;
        self.notify();
    }
}
