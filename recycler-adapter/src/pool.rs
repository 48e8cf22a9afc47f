use alloc::vec::Vec;

use recycler::{Recycler, SlotAssignment};

/// An index-keyed pool of rendering slot handles.
///
/// `H` is whatever the rendering layer keeps per slot: a DOM node, a texture,
/// a retained widget. The handle at position `s` *is* slot `s`; that identity
/// holds for the handle's whole lifetime. Growing the pool creates fresh
/// handles for the new high indices; shrinking drops the highest indices. A
/// surviving handle is never moved to a different slot, which is what lets
/// the rendering layer reuse its per-slot resources across scroll events
/// instead of recreating them.
///
/// Typical per-frame driving:
///
/// ```ignore
/// if engine.take_slots_dirty() {
///     pool.sync(engine.slot_count(), |slot| make_handle(slot));
/// }
/// pool.bind(&engine, |handle, assignment| match assignment {
///     Some(a) => handle.show_at(a.start, a.index),
///     None => handle.hide(),
/// });
/// ```
#[derive(Clone, Debug)]
pub struct SlotPool<H> {
    handles: Vec<H>,
}

impl<H> Default for SlotPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SlotPool<H> {
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&H> {
        self.handles.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut H> {
        self.handles.get_mut(slot)
    }

    /// Iterates over `(slot, handle)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &H)> {
        self.handles.iter().enumerate()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut H)> {
        self.handles.iter_mut().enumerate()
    }

    /// Resizes the pool to `slot_count`, creating fresh handles for new slots
    /// and dropping the handles of discarded high-index slots. Handles in
    /// `0..min(old, new)` are untouched.
    pub fn sync(&mut self, slot_count: usize, mut create: impl FnMut(usize) -> H) {
        if slot_count < self.handles.len() {
            self.handles.truncate(slot_count);
            return;
        }
        self.handles.reserve(slot_count - self.handles.len());
        for slot in self.handles.len()..slot_count {
            self.handles.push(create(slot));
        }
    }

    /// Resizes the pool only when the engine's slot count changed since the
    /// last call (consumes the engine's dirty flag). Returns whether a resize
    /// happened.
    pub fn sync_with(&mut self, engine: &Recycler, create: impl FnMut(usize) -> H) -> bool {
        let dirty = engine.take_slots_dirty();
        if dirty || self.handles.len() != engine.slot_count() {
            self.sync(engine.slot_count(), create);
            return true;
        }
        false
    }

    /// Rebinds every handle against the engine's current assignments.
    ///
    /// Handles whose slot has no assignment (item out of range, or the slot
    /// is parked behind offset zero) receive `None` and should be hidden,
    /// not destroyed.
    pub fn bind(&mut self, engine: &Recycler, mut f: impl FnMut(&mut H, Option<SlotAssignment>)) {
        for (slot, handle) in self.handles.iter_mut().enumerate() {
            f(handle, engine.assignment_of(slot));
        }
    }
}
