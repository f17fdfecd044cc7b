//! Error types for type rendering.

use thiserror::Error;

/// Error raised when a [`crate::Type`] cannot describe itself as Go source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A name that must be a Go identifier was empty.
    #[error("empty {what} name")]
    EmptyName { what: &'static str },
    /// A name that must be a Go identifier was not one.
    #[error("invalid {what} name {name:?}")]
    InvalidName { what: &'static str, name: String },
}
