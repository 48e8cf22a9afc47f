use recycler::{Align, ConfigError, Recycler, RecyclerOptions};

use crate::{Easing, ScrollAnchor, Tween, apply_anchor, capture_first_visible_anchor};

/// A framework-neutral controller that wraps a [`Recycler`] and provides
/// common adapter workflows (event ordering, anchoring, tween-driven
/// scrolling).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_resize` / `on_scroll` when UI events occur — `on_resize` lets the
///   engine recompute its slot count before anything can observe the new
///   geometry, `on_scroll` only remaps the existing slots
/// - `tick(now_ms)` each frame/timer tick (for tween scrolling and
///   `is_scrolling` debouncing)
///
/// For scroll containers that own the real scroll position, use the offset
/// returned from `tick()` to drive the container while keeping the engine in
/// sync.
#[derive(Clone, Debug)]
pub struct Controller {
    engine: Recycler,
    tween: Option<Tween>,
}

impl Controller {
    pub fn new(options: RecyclerOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: Recycler::new(options)?,
            tween: None,
        })
    }

    pub fn from_engine(engine: Recycler) -> Self {
        Self {
            engine,
            tween: None,
        }
    }

    pub fn engine(&self) -> &Recycler {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Recycler {
        &mut self.engine
    }

    pub fn into_engine(self) -> Recycler {
        self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Call this when the host reports a viewport size change.
    pub fn on_resize(&mut self, viewport_size: u32) {
        self.engine.apply_resize_event(viewport_size);
    }

    /// Call this when the host reports a scroll offset change (e.g. user
    /// wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.cancel_animation();
        self.engine.apply_scroll_offset_event(scroll_offset, now_ms);
    }

    /// Advances the controller.
    ///
    /// - If a tween is active, updates the scroll offset and returns it.
    /// - Otherwise, runs `is_scrolling` debouncing and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let Some(tween) = self.tween else {
            self.engine.update_scrolling(now_ms);
            return None;
        };

        let offset = tween.sample(now_ms);
        self.engine.apply_scroll_offset_event_clamped(offset, now_ms);

        if tween.is_done(now_ms) {
            self.tween = None;
            self.engine.set_is_scrolling(false);
        }

        Some(self.engine.scroll_offset())
    }

    /// Computes and applies a scroll-to-index immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align, now_ms: u64) -> u64 {
        let offset = self.engine.scroll_to_index_offset(index, align);
        self.engine.apply_scroll_offset_event_clamped(offset, now_ms);
        self.engine.scroll_offset()
    }

    /// Applies a scroll-to-offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: u64, now_ms: u64) -> u64 {
        self.engine.apply_scroll_offset_event_clamped(offset, now_ms);
        self.engine.scroll_offset()
    }

    /// Starts a tween to an index (adapter-driven).
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> u64 {
        let to = self.engine.scroll_to_index_offset(index, align);
        self.start_tween_to_offset(to, now_ms, duration_ms, easing)
    }

    /// Starts a tween to an offset (adapter-driven).
    ///
    /// Retargets a running tween from its current sampled position, so
    /// repeated requests stay continuous.
    pub fn start_tween_to_offset(
        &mut self,
        offset: u64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> u64 {
        let to = self.engine.clamp_scroll_offset(offset);
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, to, duration_ms),
            None => {
                let from = self.engine.scroll_offset();
                self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
            }
        }
        to
    }

    pub fn capture_first_visible_anchor(&self) -> Option<ScrollAnchor> {
        capture_first_visible_anchor(&self.engine)
    }

    /// Captures an anchor for the item at a given offset into the viewport.
    ///
    /// `offset_in_viewport = 0` anchors the item at the viewport's leading
    /// edge.
    pub fn capture_anchor_at_offset_in_viewport(
        &self,
        offset_in_viewport: u64,
    ) -> Option<ScrollAnchor> {
        let abs = self
            .engine
            .scroll_offset()
            .saturating_add(offset_in_viewport);
        let index = self.engine.index_at_offset(abs)?;
        let start = self.engine.item_start(index)?;
        Some(ScrollAnchor {
            index,
            offset_in_viewport: self.engine.scroll_offset().saturating_sub(start),
        })
    }

    /// Applies a previously captured anchor by adjusting the scroll offset.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor(
        &mut self,
        anchor: &ScrollAnchor,
        map_index: impl FnOnce(usize) -> Option<usize>,
    ) -> bool {
        self.cancel_animation();
        apply_anchor(&mut self.engine, anchor, map_index)
    }
}
