use recycler::Recycler;

/// A scroll anchor that preserves visual position across item-set changes.
///
/// Typical use case: a timeline "prepend" (load older entries above the
/// current view) without the content jumping. Items carry no identity beyond
/// their index, so the caller supplies the old→new index mapping when the
/// anchor is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    /// Index of the anchored item at capture time.
    pub index: usize,
    /// Distance from the anchor item's start to the viewport's scroll offset.
    pub offset_in_viewport: u64,
}

/// Captures an anchor for the first item whose extent contains the current
/// scroll offset.
///
/// Returns `None` if the engine is disabled or the list is empty.
pub fn capture_first_visible_anchor(engine: &Recycler) -> Option<ScrollAnchor> {
    let index = engine.index_at_offset(engine.scroll_offset())?;
    let start = engine.item_start(index)?;
    Some(ScrollAnchor {
        index,
        offset_in_viewport: engine.scroll_offset().saturating_sub(start),
    })
}

/// Applies a previously captured anchor by adjusting the scroll offset.
///
/// `map_index` translates the captured index into the *current* item set
/// (e.g. `|i| Some(i + prepended)` after a prepend); returning `None` means
/// the anchored item no longer exists.
///
/// Returns `true` when the anchor was applied.
pub fn apply_anchor(
    engine: &mut Recycler,
    anchor: &ScrollAnchor,
    map_index: impl FnOnce(usize) -> Option<usize>,
) -> bool {
    let Some(index) = map_index(anchor.index) else {
        return false;
    };
    let Some(start) = engine.item_start(index) else {
        return false;
    };
    engine.set_scroll_offset_clamped(start.saturating_add(anchor.offset_in_viewport));
    true
}
