use alloc::sync::Arc;

use crate::error::ConfigError;
use crate::recycler::Recycler;

/// A callback fired when an engine state update occurs.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&Recycler, bool) + Send + Sync>;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called by `Recycler::new`).
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`Recycler`].
///
/// Cheap to clone: the callback field is stored in an `Arc`, so adapters can
/// tweak a few fields and call `Recycler::set_options` without reallocating
/// closures.
#[derive(Clone)]
pub struct RecyclerOptions {
    /// Number of items in the list. May change between computations; the next
    /// mapping simply reflects the new count.
    pub count: usize,

    /// Size of every item along the scroll axis, in pixels. Must be positive;
    /// [`Recycler::new`] and `set_options` reject a zero value with
    /// [`ConfigError::ZeroItemSize`].
    pub item_size: u32,

    /// Extra slots beyond exact viewport coverage. The default of 1 absorbs
    /// the partially visible item that a scroll offset between item edges
    /// exposes at each end of the viewport simultaneously.
    pub buffer_slots: usize,

    /// Enables/disables the engine. When disabled, query methods return empty
    /// results and the slot pool size is zero.
    pub enabled: bool,

    /// The initial viewport size along the scroll axis.
    pub initial_viewport: u32,

    /// Initial scroll offset.
    pub initial_offset: InitialOffset,

    /// Optional callback fired when the engine's internal state changes.
    ///
    /// The `sync` argument indicates whether a scroll is in progress.
    pub on_change: Option<OnChangeCallback>,

    /// Debounced fallback duration for resetting `is_scrolling`, driven by
    /// `Recycler::update_scrolling`.
    pub is_scrolling_reset_delay_ms: u64,
}

impl RecyclerOptions {
    /// Creates options for a list of `count` items of `item_size` pixels each.
    pub fn new(count: usize, item_size: u32) -> Self {
        Self {
            count,
            item_size,
            buffer_slots: 1,
            enabled: true,
            initial_viewport: 0,
            initial_offset: InitialOffset::default(),
            on_change: None,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    /// Checks the configuration without constructing an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_size == 0 {
            return Err(ConfigError::ZeroItemSize);
        }
        Ok(())
    }

    pub fn with_buffer_slots(mut self, buffer_slots: usize) -> Self {
        self.buffer_slots = buffer_slots;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: u32) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Recycler, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl core::fmt::Debug for RecyclerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclerOptions")
            .field("count", &self.count)
            .field("item_size", &self.item_size)
            .field("buffer_slots", &self.buffer_slots)
            .field("enabled", &self.enabled)
            .field("initial_viewport", &self.initial_viewport)
            .field("initial_offset", &self.initial_offset)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
