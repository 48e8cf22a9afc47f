/// Alignment for programmatic scrolling (`Recycler::scroll_to_index`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A slot's current assignment: which item it displays and where.
///
/// `slot` is the stable physical identity (`0..slot_count`); it never changes
/// across recomputation. `index` and `start` are recomputed on every scroll or
/// resize event. Slots whose item falls outside `0..count` produce no
/// assignment at all; they keep their identity and are simply absent from the
/// output until the window moves back over valid items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAssignment {
    /// Physical slot index in the pool.
    pub slot: usize,
    /// Virtual item index within the full list.
    pub index: usize,
    /// Pixel offset of the item along the scroll axis (`index * item_size`).
    pub start: u64,
}
