use thiserror::Error;

/// Invalid engine configuration, rejected at setup time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `item_size` must be greater than zero; every mapping step divides by it.
    #[error("item_size must be greater than zero")]
    ZeroItemSize,
}
