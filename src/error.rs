//! Error types shared by the component registries and adapters
//!
//! Absence of a component is never an error: queries answer `false` or
//! `Ok(None)`. Errors here are adapter failures and misuse of the registry.

/// Result type for component operations
pub type ComponentResult<T> = Result<T, ComponentError>;

/// Component system errors
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("Invalid slot {slot} (component has {size} slots)")]
    InvalidSlot { slot: usize, size: usize },

    #[error("Invalid tank {tank} (component has {tanks} tanks)")]
    InvalidTank { tank: usize, tanks: usize },

    #[error("Hook registry is frozen, cannot add hook '{hook_id}'")]
    RegistryFrozen { hook_id: String },

    #[error("Item stack is already borrowed by another component")]
    StackBorrowed,

    #[error("Provider '{provider}' answered {requested} with a {received} handle")]
    CapabilityMismatch {
        provider: String,
        requested: &'static str,
        received: &'static str,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::cell::BorrowError> for ComponentError {
    fn from(_: std::cell::BorrowError) -> Self {
        ComponentError::StackBorrowed
    }
}

impl From<std::cell::BorrowMutError> for ComponentError {
    fn from(_: std::cell::BorrowMutError) -> Self {
        ComponentError::StackBorrowed
    }
}
